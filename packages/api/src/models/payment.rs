//! Payment intent and transaction records.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-side record of a (pending) charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Amount in minor currency units (cents).
    #[serde(deserialize_with = "minor_units")]
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(rename = "stripeInvoiceId", default)]
    pub provider_invoice_id: Option<String>,
}

impl Transaction {
    /// `49.90 EUR`
    pub fn display_amount(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let minor = self.amount.unsigned_abs();
        format!(
            "{sign}{}.{:02} {}",
            minor / 100,
            minor % 100,
            self.currency.to_uppercase()
        )
    }
}

/// Integers are already minor units; decimals are major units (`49.9` is `4990`).
#[derive(Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Minor(i64),
    Major(f64),
}

fn minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WireAmount::deserialize(deserializer)? {
        WireAmount::Minor(minor) => minor,
        WireAmount::Major(major) => (major * 100.0).round() as i64,
    })
}

/// `POST /payment/create-intent/{userId}` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    /// Handed to the payment provider to confirm the charge in the browser.
    pub client_secret: String,
    pub transaction: Transaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_deserializes() {
        let body = r#"{
            "Message": "Payment intent created",
            "clientSecret": "pi_123_secret_456",
            "transaction": {
                "id": "t-1",
                "userId": "u-1",
                "amount": 4990,
                "currency": "eur",
                "status": "pending",
                "stripeInvoiceId": "pi_123"
            }
        }"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(intent.message.as_deref(), Some("Payment intent created"));
        assert_eq!(intent.client_secret, "pi_123_secret_456");
        assert_eq!(intent.transaction.provider_invoice_id.as_deref(), Some("pi_123"));
        assert_eq!(intent.transaction.display_amount(), "49.90 EUR");
    }

    #[test]
    fn test_decimal_amount_is_major_units() {
        let body = r#"{"clientSecret":"pi_1_secret","transaction":{"id":"t-1","userId":"u-1","amount":49.9,"currency":"eur","status":"pending"}}"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(intent.client_secret, "pi_1_secret");
        assert_eq!(intent.transaction.amount, 4990);
        assert_eq!(intent.transaction.display_amount(), "49.90 EUR");
    }

    #[test]
    fn test_display_amount_pads_cents() {
        let transaction = Transaction {
            id: "t".into(),
            user_id: "u".into(),
            amount: 505,
            currency: "usd".into(),
            status: "pending".into(),
            provider_invoice_id: None,
        };
        assert_eq!(transaction.display_amount(), "5.05 USD");
    }
}
