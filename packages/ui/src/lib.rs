//! This crate contains all shared UI for the workspace: session, data hooks,
//! payment flow and the dashboard views.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::{FaInstagram, FaYoutube};
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::{make_client, Client, PlatformStore};

pub mod forms;
pub mod guard;
pub mod hooks;
pub mod navigation;
pub mod payment;
pub mod query;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod stripe;

pub mod views;

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{use_auth, use_client, use_config, AppProviders, AuthProvider, LogoutButton};
pub use session::AuthState;

pub mod notifications;
pub use notifications::{notify, use_notifications, NoticeLevel, Notifications};

mod notification_tray;
pub use notification_tray::NotificationTray;
