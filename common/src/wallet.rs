use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::error::ValidationError;
use crate::order::PaymentMethod;

/// Preset buttons of the top-up screen, in reais.
pub const QUICK_AMOUNTS: [Money; 4] = [Money(2000), Money(5000), Money(10000), Money(20000)];

/// Body of the balance top-up call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
    pub amount: Money,
    pub payment_method: PaymentMethod,
}

/// What the student typed on the top-up screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopUpForm {
    pub amount: String,
    pub method: Option<PaymentMethod>,
}

impl TopUpForm {
    /// Fill the amount field from one of the preset buttons.
    pub fn pick(&mut self, amount: Money) {
        self.amount = format!("{:.2}", amount.as_reais());
    }

    /// Credit can only be bought with an external method.
    pub fn validate(&self) -> Result<TopUpRequest, ValidationError> {
        let amount = Money::parse(&self.amount)
            .filter(|m| m.is_positive())
            .ok_or(ValidationError::InvalidAmount)?;
        match self.method {
            Some(method @ (PaymentMethod::Pix | PaymentMethod::Card)) => Ok(TopUpRequest {
                amount,
                payment_method: method,
            }),
            _ => Err(ValidationError::PaymentMethodRequired),
        }
    }
}
