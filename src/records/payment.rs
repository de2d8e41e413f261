use serde::{Deserialize, Serialize};

/// Where payouts go, e.g. PayPal or Stripe. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub provider: String,
    pub account: String,
}

impl PaymentMethod {
    pub fn new(provider: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            account: account.into(),
        }
    }

    pub fn examples() -> Vec<PaymentMethod> {
        vec![
            PaymentMethod::new("PayPal", "seller@example.com"),
            PaymentMethod::new("Stripe", "acct_1234"),
        ]
    }
}
