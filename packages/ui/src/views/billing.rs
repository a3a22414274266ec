use dioxus::prelude::*;

use crate::auth::use_config;
use crate::hooks::{use_payment, use_user_profile};
use crate::icons::FaCreditCard;
use crate::payment::{PaymentStage, PlatformProvider, CARD_ELEMENT_ID};
use crate::Icon;

/// One-off payment for full directory access.
#[component]
pub fn BillingView() -> Element {
    let config = use_config();
    let profile = use_user_profile();
    let payment = use_payment();
    let mut provider = use_signal(|| Option::<PlatformProvider>::None);
    let mut provider_error = use_signal(|| Option::<String>::None);

    let publishable_key = config.payment.publishable_key.clone();
    use_effect(move || {
        if !payment.stage().needs_card() || provider.peek().is_some() {
            return;
        }
        match PlatformProvider::mount(&publishable_key, CARD_ELEMENT_ID) {
            Ok(mounted) => provider.set(Some(mounted)),
            Err(err) => {
                tracing::error!(error = %err, "could not mount the card form");
                provider_error.set(Some(err.message));
            }
        }
    });

    let stage = payment.stage();
    let has_paid = profile.data().is_some_and(|user| user.has_paid);
    let price = config.payment.price_label.clone();
    let show_card = stage.intent().is_some();
    let outcome = match &stage {
        PaymentStage::Succeeded(transaction) => {
            let amount = transaction.display_amount();
            rsx! {
                div {
                    class: "notice-panel success",
                    "Payment of {amount} confirmed. Access is granted once it has been processed."
                }
            }
        }
        PaymentStage::Failed { message, .. } => rsx! {
            p { class: "form-error", "{message}" }
        },
        _ => rsx! {},
    };

    rsx! {
        section {
            class: "dashboard-section",
            h2 { "Billing" }

            if has_paid {
                div {
                    class: "notice-panel success",
                    "You have full access to the creator database."
                }
            } else {
                div {
                    class: "plan-card",
                    h3 { "Full access" }
                    p { class: "plan-price", "{price}" }
                    p { class: "muted", "One payment, unlimited searches and profile details." }

                    if stage.can_start() {
                        button {
                            class: "primary",
                            onclick: move |_| payment.start(),
                            Icon { icon: FaCreditCard, width: 14, height: 14 }
                            " Continue to payment"
                        }
                    }
                    if matches!(stage, PaymentStage::CreatingIntent) {
                        p { class: "muted", "Preparing your payment..." }
                    }

                    if show_card {
                        div { id: CARD_ELEMENT_ID, class: "card-element" }
                        if let Some(message) = provider_error() {
                            p { class: "form-error", "{message}" }
                        }
                        button {
                            class: "primary",
                            disabled: stage.is_busy() || provider.read().is_none(),
                            onclick: move |_| {
                                if let Some(mounted) = provider() {
                                    payment.confirm(mounted);
                                }
                            },
                            if stage.is_busy() { "Processing..." } else { "Pay {price}" }
                        }
                    }
                }
            }

            {outcome}
        }
    }
}
