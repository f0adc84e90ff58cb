use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::currency::Money;
use crate::error::ValidationError;
use crate::identity::UserId;
use crate::order::PaymentMethod;
use crate::phone::pickup_code_for;
use crate::product::ProductId;
use crate::user::User;

/// One line of the order submitted at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price the student saw; the backend re-prices authoritatively.
    pub price: Money,
}

/// Body of the order creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: UserId,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    pub items: Vec<CheckoutLine>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub pickup_code: String,
}

/// Whether `method` can pay `total` for `user`.
pub fn can_pay(user: &User, total: Money, method: PaymentMethod) -> bool {
    method != PaymentMethod::Balance || user.can_afford(total)
}

/// Turn the cart into an order request.
///
/// Refuses an empty cart, and a balance payment larger than the balance.
pub fn build_checkout(
    user: &User,
    cart: &Cart,
    method: PaymentMethod,
) -> Result<CheckoutRequest, ValidationError> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    let total = cart.total();
    if !can_pay(user, total, method) {
        return Err(ValidationError::InsufficientBalance {
            needed: total,
            available: user.balance,
        });
    }
    Ok(CheckoutRequest {
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        user_phone: user.phone.clone(),
        items: cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
                price: item.product.price,
            })
            .collect(),
        total,
        payment_method: method,
        pickup_code: pickup_code_for(user.phone.as_deref()),
    })
}
