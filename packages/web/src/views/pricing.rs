use dioxus::prelude::*;
use ui::{use_auth, use_config};

use crate::Route;

#[component]
pub fn Pricing() -> Element {
    let price = use_config().payment.price_label;
    let signed_in = use_auth().read().is_authenticated();

    rsx! {
        div {
            class: "pricing",
            h1 { "Pricing" }
            div {
                class: "plan-card",
                h3 { "Full access" }
                p { class: "plan-price", "{price}" }
                ul {
                    li { "Unlimited creator searches" }
                    li { "Full creator profiles and contact links" }
                    li { "Search history and visited profiles" }
                }
                if signed_in {
                    Link { to: Route::Dashboard {}, class: "button-link", "Go to billing" }
                } else {
                    Link { to: Route::Signup {}, class: "button-link", "Create an account" }
                }
            }
        }
    }
}
