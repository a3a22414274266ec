//! Stripe.js v3 card payments. Expects `https://js.stripe.com/v3/` to be loaded.

use js_sys::{Object, Reflect};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::payment::{CardPaymentProvider, ProviderError, ProviderPaymentIntent};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Stripe;

    #[wasm_bindgen(js_name = Stripe, catch)]
    fn load_stripe(publishable_key: &str) -> Result<Stripe, JsValue>;

    #[wasm_bindgen(method)]
    fn elements(this: &Stripe) -> Elements;

    #[wasm_bindgen(method, js_name = confirmCardPayment)]
    fn confirm_card_payment(this: &Stripe, client_secret: &str, data: &JsValue) -> js_sys::Promise;

    type Elements;

    #[wasm_bindgen(method)]
    fn create(this: &Elements, kind: &str) -> CardElement;

    #[derive(Clone)]
    type CardElement;

    #[wasm_bindgen(method, catch)]
    fn mount(this: &CardElement, selector: &str) -> Result<(), JsValue>;
}

/// `{ error }` or `{ paymentIntent }` as resolved by `confirmCardPayment`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmOutcome {
    #[serde(default)]
    error: Option<ProviderError>,
    #[serde(default)]
    payment_intent: Option<ProviderPaymentIntent>,
}

/// Card element mounted on the page plus the Stripe instance that owns it.
#[derive(Clone)]
pub struct StripeProvider {
    stripe: Stripe,
    card: CardElement,
}

impl StripeProvider {
    /// Create the card element and mount it into `#element_id`.
    pub fn mount(publishable_key: &str, element_id: &str) -> Result<Self, ProviderError> {
        if publishable_key.is_empty() {
            return Err(ProviderError::new("Payments are not configured"));
        }
        let stripe = load_stripe(publishable_key).map_err(js_error)?;
        let card = stripe.elements().create("card");
        card.mount(&format!("#{element_id}")).map_err(js_error)?;
        Ok(Self { stripe, card })
    }

    fn payment_data(&self, billing_email: &str) -> Result<JsValue, JsValue> {
        let billing_details = Object::new();
        Reflect::set(&billing_details, &"email".into(), &billing_email.into())?;

        let payment_method = Object::new();
        Reflect::set(&payment_method, &"card".into(), self.card.as_ref())?;
        Reflect::set(&payment_method, &"billing_details".into(), &billing_details)?;

        let data = Object::new();
        Reflect::set(&data, &"payment_method".into(), &payment_method)?;
        Ok(data.into())
    }
}

impl CardPaymentProvider for StripeProvider {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        billing_email: &str,
    ) -> Result<ProviderPaymentIntent, ProviderError> {
        let data = self.payment_data(billing_email).map_err(js_error)?;
        let result = JsFuture::from(self.stripe.confirm_card_payment(client_secret, &data))
            .await
            .map_err(js_error)?;

        let outcome: ConfirmOutcome = serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::new(e.to_string()))?;
        match outcome {
            ConfirmOutcome {
                error: Some(error), ..
            } => Err(error),
            ConfirmOutcome {
                payment_intent: Some(intent),
                ..
            } => Ok(intent),
            _ => Err(ProviderError::new("The payment provider returned no result")),
        }
    }
}

fn js_error(value: JsValue) -> ProviderError {
    let message = value.as_string().or_else(|| {
        Reflect::get(&value, &"message".into())
            .ok()
            .and_then(|message| message.as_string())
    });
    ProviderError::new(message.unwrap_or_else(|| "Payment provider error".to_string()))
}
