use dioxus::prelude::*;
use dioxus::router::Navigator;

use store::ClientConfig;
use ui::guard::{self, GuardDecision};
use ui::{use_auth, AppProviders, Navbar, NotificationTray};
use views::{Dashboard, Home, Landing, Login, Pricing, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Landing {},
        #[route("/home")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/pricing")]
        Pricing {},
        #[route("/dashboard")]
        Dashboard {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const STRIPE_JS: &str = "https://js.stripe.com/v3/";
const CLIENT_TOML: &str = include_str!("../client.toml");

fn main() {
    let (config, problem) = load_config();

    let level = config
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("Failed to initialise logging: {e}");
    }
    if let Some(problem) = problem {
        tracing::error!("Invalid {}, using defaults: {}", ClientConfig::filename(), problem);
    }
    tracing::info!(api = %config.api.base_url, "starting web client");

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

/// Embedded configuration with the compile-time API URL override applied.
fn load_config() -> (ClientConfig, Option<String>) {
    let (config, problem) = match ClientConfig::from_toml(CLIENT_TOML) {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e.to_string())),
    };
    let config = match option_env!("CREATOR_API_URL") {
        Some(url) if !url.is_empty() => config.with_base_url(url),
        _ => config,
    };
    (config, problem)
}

#[component]
fn App() -> Element {
    let config = use_context::<ClientConfig>();

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Script { src: STRIPE_JS }

        AppProviders {
            config,
            Router::<Route> {}
        }
    }
}

/// Top bar, the active page and the notification tray.
#[component]
fn Shell() -> Element {
    let auth = use_auth();
    let signed_in = auth.read().is_authenticated();

    rsx! {
        Navbar {
            Link { to: Route::Landing {}, "Home" }
            Link { to: Route::Pricing {}, "Pricing" }
            if signed_in {
                Link { to: Route::Dashboard {}, "Dashboard" }
            } else {
                Link { to: Route::Login {}, "Log in" }
                Link { to: Route::Signup {}, class: "button-link", "Sign up" }
            }
        }
        Outlet::<Route> {}
        NotificationTray {}
    }
}

/// Unknown paths go back to the landing page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("no route for /{}", segments.join("/"));
    nav.replace(Route::Landing {});
    rsx! {}
}

fn route_for(path: &str) -> Route {
    path.parse().unwrap_or(Route::Landing {})
}

fn apply(nav: Navigator, decision: GuardDecision, children: Element) -> Element {
    match decision {
        GuardDecision::Wait => rsx! {
            div { class: "page-placeholder" }
        },
        GuardDecision::Render => children,
        GuardDecision::Redirect(path) => {
            nav.replace(route_for(path));
            rsx! {}
        }
    }
}

/// Renders `children` only for a signed-in session.
#[component]
fn Protected(children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let decision = guard::protect(&auth.read());
    apply(nav, decision, children)
}

/// Renders `children` only while nobody is signed in.
#[component]
fn GuestOnly(children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let decision = guard::guest_only(&auth.read());
    apply(nav, decision, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_paths_are_routes() {
        assert_eq!(route_for("/login"), Route::Login {});
        assert_eq!(route_for("/dashboard"), Route::Dashboard {});
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = ClientConfig::from_toml(CLIENT_TOML).unwrap();
        assert_eq!(config.storage.token_key, "authToken");
        assert_eq!(config.search.page_size, 20);
    }
}
