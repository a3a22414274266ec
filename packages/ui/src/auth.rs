//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use store::ClientConfig;

use crate::notifications::Notifications;
use crate::platform::{make_client, Client};
use crate::query::{use_query_client, QueryClientProvider};
use crate::session::{self, AuthState};
use crate::navigation;

/// Get the current authentication state.
/// Returns a signal that updates when the session is hydrated or dropped.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The API client shared by every hook.
pub fn use_client() -> Client {
    use_context::<Client>()
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Provides configuration, API client, query cache, notifications and the
/// session to its children.
#[component]
pub fn AppProviders(config: ClientConfig, children: Element) -> Element {
    let config = use_context_provider(|| config);
    use_context_provider(|| make_client(&config));
    let notifications = use_signal(Notifications::default);
    use_context_provider(|| notifications);

    rsx! {
        QueryClientProvider {
            AuthProvider {
                {children}
            }
        }
    }
}

/// Provider component that manages authentication state.
/// Hydrates the session from the stored token once on mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let client = use_client();

    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            let state = session::hydrate(client.tokens(), &client).await;
            auth_state.set(state);
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Drop the session after the server rejected the token.
pub fn expire(auth_state: &mut Signal<AuthState>, client: &Client) {
    tracing::warn!("session rejected by the server, signing out");
    session::expire_session(client.tokens(), &mut auth_state.write());
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let client = use_client();
    let queries = use_query_client();

    let onclick = move |_| {
        let target = session::end_session(client.tokens(), &mut auth_state.write());
        queries.reset();
        navigation::redirect(target);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
