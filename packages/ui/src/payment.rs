//! Two-step card payment.
//!
//! 1. Ask the API for a payment intent for the signed-in user.
//! 2. Hand its client secret to a [`CardPaymentProvider`], which collects the
//!    card and confirms the charge with the payment processor.
//!
//! The client only reports the provider's verdict. Marking the transaction
//! paid is left to the backend.

use std::future::Future;

use api::{ApiClient, ApiError, PaymentIntent, Transaction, User};
use serde::Deserialize;
use store::KeyValueStore;
use thiserror::Error;

/// The only provider status that counts as paid.
pub const STATUS_SUCCEEDED: &str = "succeeded";

/// Element the card input is mounted into.
pub const CARD_ELEMENT_ID: &str = "card-element";

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentStage {
    Idle,
    CreatingIntent,
    AwaitingCard(PaymentIntent),
    Confirming(PaymentIntent),
    Succeeded(Transaction),
    /// `intent` is kept when the card step failed so it can be retried.
    Failed {
        message: String,
        intent: Option<PaymentIntent>,
    },
}

impl PaymentStage {
    pub fn intent(&self) -> Option<&PaymentIntent> {
        match self {
            PaymentStage::AwaitingCard(intent) | PaymentStage::Confirming(intent) => Some(intent),
            PaymentStage::Failed { intent, .. } => intent.as_ref(),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, PaymentStage::CreatingIntent | PaymentStage::Confirming(_))
    }

    /// Whether the card form should be shown.
    pub fn needs_card(&self) -> bool {
        !self.is_busy() && self.intent().is_some()
    }

    /// Whether a new intent may be requested.
    pub fn can_start(&self) -> bool {
        matches!(self, PaymentStage::Idle)
            || matches!(self, PaymentStage::Failed { intent: None, .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PaymentStage::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Subset of the provider's payment intent the client looks at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderPaymentIntent {
    pub status: String,
}

/// Error reported by the payment provider; its message is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{message}")]
pub struct ProviderError {
    #[serde(default)]
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirms a card payment for a client secret.
pub trait CardPaymentProvider {
    fn confirm_card_payment(
        &self,
        client_secret: &str,
        billing_email: &str,
    ) -> impl Future<Output = Result<ProviderPaymentIntent, ProviderError>>;
}

/// Stand-in outside the browser, where no card form can be rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

impl UnavailableProvider {
    pub fn mount(_publishable_key: &str, _element_id: &str) -> Result<Self, ProviderError> {
        Err(Self::unavailable())
    }

    fn unavailable() -> ProviderError {
        ProviderError::new("Card payments are only available in the browser")
    }
}

impl CardPaymentProvider for UnavailableProvider {
    async fn confirm_card_payment(
        &self,
        _client_secret: &str,
        _billing_email: &str,
    ) -> Result<ProviderPaymentIntent, ProviderError> {
        Err(Self::unavailable())
    }
}

#[cfg(target_arch = "wasm32")]
pub use crate::stripe::StripeProvider as PlatformProvider;
#[cfg(not(target_arch = "wasm32"))]
pub use UnavailableProvider as PlatformProvider;

/// Step 1: request a payment intent for `user`.
pub async fn create_intent<S: KeyValueStore>(
    client: &ApiClient<S>,
    user: Option<&User>,
) -> Result<PaymentIntent, ApiError> {
    let user = user.ok_or(ApiError::NotAuthenticated)?;
    let intent = client.create_payment_intent(&user.id).await?;
    tracing::debug!(transaction_id = %intent.transaction.id, "payment intent created");
    Ok(intent)
}

/// Step 2: confirm `intent` with the provider and return the resulting stage.
pub async fn confirm<P: CardPaymentProvider>(
    provider: &P,
    intent: PaymentIntent,
    billing_email: &str,
) -> PaymentStage {
    match provider
        .confirm_card_payment(&intent.client_secret, billing_email)
        .await
    {
        Ok(result) if result.status == STATUS_SUCCEEDED => {
            tracing::info!(transaction_id = %intent.transaction.id, "card payment confirmed");
            PaymentStage::Succeeded(intent.transaction)
        }
        Ok(result) => {
            tracing::warn!(status = %result.status, "card payment not completed");
            PaymentStage::Failed {
                message: format!("Payment not completed (status: {})", result.status),
                intent: Some(intent),
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "card payment failed");
            PaymentStage::Failed {
                message: err.message,
                intent: Some(intent),
            }
        }
    }
}
