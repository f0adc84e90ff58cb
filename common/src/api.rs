//! The REST surface of the canteen backend, as plain request values.
//!
//! Each endpoint the client calls has a constructor here returning an
//! [`ApiRequest`]; a transport (browser `fetch` in the UI, `reqwest` in the
//! integration tests) executes it and hands the status and body back to
//! [`decode`] or one of its siblings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutRequest;
use crate::error::ApiError;
use crate::identity::UserId;
use crate::order::{CancelRequest, OrderId, StatusUpdate};
use crate::product::{Product, ProductId};
use crate::stock::NewProduct;
use crate::user::{Credentials, RegisterRequest, User};
use crate::wallet::TopUpRequest;

/// Shown when the backend refuses a login without saying why.
pub const DEFAULT_REJECTION: &str = "Invalid credentials";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A call relative to the API base URL. `path` includes any query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<String>,
}

impl ApiRequest {
    fn bare(method: Method, path: String) -> Self {
        Self { method, path, body: None }
    }

    fn json<T: Serialize>(method: Method, path: String, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self { method, path, body: Some(body) })
    }

    pub fn login(credentials: &Credentials) -> Result<Self, ApiError> {
        Self::json(Method::Post, "/auth/login".into(), credentials)
    }

    pub fn register(form: &RegisterRequest) -> Result<Self, ApiError> {
        Self::json(Method::Post, "/auth/register".into(), form)
    }

    pub fn list_products() -> Self {
        Self::bare(Method::Get, "/produtos".into())
    }

    pub fn create_product(product: &NewProduct) -> Result<Self, ApiError> {
        Self::json(Method::Post, "/produtos".into(), product)
    }

    pub fn update_product(product: &Product) -> Result<Self, ApiError> {
        Self::json(Method::Put, format!("/produtos/{}", product.id), product)
    }

    pub fn set_stock(id: &ProductId, quantity: u32) -> Self {
        Self::bare(
            Method::Patch,
            format!("/produtos/{id}/estoque?quantidade={quantity}"),
        )
    }

    pub fn delete_product(id: &ProductId) -> Self {
        Self::bare(Method::Delete, format!("/produtos/{id}"))
    }

    /// Every order, for the admin board.
    pub fn all_orders() -> Self {
        Self::bare(Method::Get, "/pedidos".into())
    }

    pub fn user_orders(user_id: &UserId) -> Self {
        Self::bare(Method::Get, format!("/pedidos/usuario/{user_id}"))
    }

    pub fn place_order(order: &CheckoutRequest) -> Result<Self, ApiError> {
        Self::json(Method::Post, "/pedidos".into(), order)
    }

    pub fn update_status(id: &OrderId, update: &StatusUpdate) -> Result<Self, ApiError> {
        Self::json(Method::Patch, format!("/pedidos/{id}/status"), update)
    }

    pub fn cancel_order(id: &OrderId, cancel: &CancelRequest) -> Result<Self, ApiError> {
        Self::json(Method::Patch, format!("/pedidos/{id}/cancelar"), cancel)
    }

    pub fn top_up(user_id: &UserId, top_up: &TopUpRequest) -> Result<Self, ApiError> {
        Self::json(Method::Post, format!("/users/{user_id}/saldo"), top_up)
    }

    /// Adds the product to favorites, or removes it if already there.
    pub fn toggle_favorite(user_id: &UserId, product_id: &ProductId) -> Self {
        Self::bare(
            Method::Post,
            format!("/users/{user_id}/favorites/{product_id}"),
        )
    }
}

/// Envelope of the login and register replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AuthResponse {
    /// The session user and the message to greet them with.
    pub fn into_session(self) -> Result<(User, String), ApiError> {
        match (self.success, self.user) {
            (true, Some(user)) => Ok((user, self.message.unwrap_or_default())),
            _ => Err(ApiError::Rejected(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            )),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn status_error(status: u16, body: &str) -> ApiError {
    ApiError::Status {
        status,
        body: body.to_string(),
    }
}

/// Decode a 2xx JSON body.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`decode`], but an empty 2xx body yields `T::default()`.
pub fn decode_or_default<T: DeserializeOwned + Default>(
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    if is_success(status) && body.trim().is_empty() {
        return Ok(T::default());
    }
    decode(status, body)
}

/// For calls whose reply body is ignored.
pub fn expect_success(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(status_error(status, body))
    }
}

/// Login and register reply: the envelope is honoured whatever the status,
/// so a 401 carrying `{success:false, message}` surfaces its message.
pub fn decode_auth(status: u16, body: &str) -> Result<(User, String), ApiError> {
    match serde_json::from_str::<AuthResponse>(body) {
        Ok(envelope) => envelope.into_session(),
        Err(_) if !is_success(status) => Err(status_error(status, body)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}
