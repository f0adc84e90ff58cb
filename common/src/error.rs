use thiserror::Error;

use crate::currency::Money;

/// Failure talking to the canteen backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("could not reach the server: {0}")]
    Network(String),
    /// Non-2xx response.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The backend answered `success: false` with a message.
    #[error("{0}")]
    Rejected(String),
    /// The request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Message suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not connect to the server.".to_string(),
            ApiError::Status { status, .. } if *status >= 500 => {
                "The server failed to process the request.".to_string()
            }
            ApiError::Status { status, .. } => format!("Request refused (HTTP {status})."),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::Encode(_) => "Could not prepare the request.".to_string(),
        }
    }
}

/// A client-side rule rejected user input before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Full name is required")]
    NameRequired,
    #[error("Registration number is required")]
    RegistrationRequired,
    #[error("Select a class")]
    ClassRequired,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid phone number")]
    InvalidPhone,
    #[error("Password must have at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("{product} is out of stock")]
    OutOfStock { product: String },
    #[error("Only {available} of {product} left in stock")]
    StockExceeded { product: String, available: u32 },
    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Money, available: Money },
    #[error("Enter a valid amount")]
    InvalidAmount,
    #[error("Choose a payment method")]
    PaymentMethodRequired,
    #[error("A cancellation reason is required")]
    CancelReasonRequired,
    #[error("Only pending orders can be cancelled")]
    NotCancellable,
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: String, to: String },
    #[error("Product name is required")]
    ProductNameRequired,
    #[error("Enter a valid price")]
    InvalidPrice,
    #[error("Enter a valid stock quantity")]
    InvalidStock,
    #[error("Choose a category")]
    CategoryRequired,
    #[error("Message cannot be empty")]
    MessageRequired,
    #[error("Response cannot be empty")]
    ResponseRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let err = ApiError::Rejected("Email already registered".into());
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn status_errors_distinguish_server_faults() {
        let e = ApiError::Status { status: 503, body: String::new() };
        assert_eq!(e.user_message(), "The server failed to process the request.");
        let e = ApiError::Status { status: 404, body: "nope".into() };
        assert_eq!(e.user_message(), "Request refused (HTTP 404).");
        assert_eq!(e.to_string(), "HTTP 404: nope");
    }

    #[test]
    fn insufficient_balance_formats_money() {
        let e = ValidationError::InsufficientBalance {
            needed: Money(1250),
            available: Money(1000),
        };
        assert_eq!(e.to_string(), "Insufficient balance: need R$ 12.50, have R$ 10.00");
    }
}
