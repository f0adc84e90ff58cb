use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::error::ValidationError;
use crate::identity::{Role, UserId};
use crate::phone::{digits_only, is_valid_phone};
use crate::product::{Product, ProductId};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Classes a student can enrol under at registration.
pub const CLASSES: &[&str] = &["1º Ano A", "2º Ano A", "3º Ano A"];

/// A logged-in account, as returned by the auth and user endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default)]
    pub favorites: Vec<Product>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.iter().any(|p| &p.id == product_id)
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        amount <= self.balance
    }

    /// Apply a local debit after a balance-paid checkout.
    pub fn debit(&mut self, amount: Money) {
        self.balance = self.balance - amount;
    }
}

/// Login form contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form as typed by the student.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub registration: String,
    pub class_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// Body of the register call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub class_name: String,
    pub phone: String,
    pub registration: String,
}

impl RegistrationForm {
    /// Check every field, reporting the first failing rule in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.registration.trim().is_empty() {
            return Err(ValidationError::RegistrationRequired);
        }
        if self.class_name.is_empty() {
            return Err(ValidationError::ClassRequired);
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Validate and build the request body; the phone is sent as bare digits.
    pub fn to_request(&self) -> Result<RegisterRequest, ValidationError> {
        self.validate()?;
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            class_name: self.class_name.clone(),
            phone: digits_only(&self.phone),
            registration: self.registration.trim().to_string(),
        })
    }
}
