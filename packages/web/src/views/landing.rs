//! Public landing page.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Landing() -> Element {
    rsx! {
        div {
            class: "landing",
            h1 { "Find the right creators for your brand" }
            p {
                class: "lead",
                "Search thousands of content creators by niche and country, review their reach and reach out directly."
            }
            div {
                class: "landing-actions",
                Link { to: Route::Signup {}, class: "button-link", "Get started" }
                Link { to: Route::Pricing {}, "See pricing" }
            }
            div {
                class: "feature-grid",
                div {
                    class: "feature",
                    h3 { "Search by niche" }
                    p { "Filter creators by keyword and country." }
                }
                div {
                    class: "feature",
                    h3 { "Know their reach" }
                    p { "Follower counts and profile links in one place." }
                }
                div {
                    class: "feature",
                    h3 { "Keep track" }
                    p { "Your searches and visited profiles stay on your dashboard." }
                }
            }
        }
    }
}

/// `/home` shows the landing page as well.
#[component]
pub fn Home() -> Element {
    rsx! { Landing {} }
}
