use dioxus::prelude::*;

/// Empty state for dashboard sections that are not available yet.
#[component]
pub fn ComingSoon(title: String) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h2 { "{title}" }
            p { "Coming soon. We are still building this part of the dashboard." }
        }
    }
}
