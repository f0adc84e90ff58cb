//! WASM HTTP client for the canteen backend.
//!
//! Base URL comes from `CANTEEN_API_URL` at build time, or from the `?api=`
//! query parameter at runtime (a full URL or just a port, e.g. `?api=8081`).

use canteen_common::api::{self, ApiRequest};
use canteen_common::checkout::CheckoutRequest;
use canteen_common::config::ClientConfig;
use canteen_common::error::ApiError;
use canteen_common::identity::UserId;
use canteen_common::order::{CancelRequest, CancelResponse, Order, OrderId, StatusUpdate};
use canteen_common::product::{Product, ProductId};
use canteen_common::stock::NewProduct;
use canteen_common::user::{Credentials, RegisterRequest, User};
use canteen_common::wallet::TopUpRequest;

/// Read the `?api=` query parameter of the current page.
fn query_override() -> Option<String> {
    #[cfg(target_family = "wasm")]
    {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|qs| web_sys::UrlSearchParams::new_with_str(&qs).ok()?.get("api"))
    }
    #[cfg(not(target_family = "wasm"))]
    {
        None
    }
}

pub fn client_config() -> ClientConfig {
    ClientConfig::resolve(option_env!("CANTEEN_API_URL"), query_override().as_deref())
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Execute a request, returning the HTTP status and raw body.
    async fn send(&self, req: ApiRequest) -> Result<(u16, String), ApiError> {
        let url = self.config.url(&req.path);
        tracing::debug!("{} {}", req.method.as_str(), url);
        fetch_json(&url, req.method.as_str(), req.body).await
    }

    /// Log in. Yields the user and the backend's greeting.
    pub async fn login(&self, credentials: &Credentials) -> Result<(User, String), ApiError> {
        let (status, body) = self.send(ApiRequest::login(credentials)?).await?;
        api::decode_auth(status, &body)
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<(User, String), ApiError> {
        let (status, body) = self.send(ApiRequest::register(form)?).await?;
        api::decode_auth(status, &body)
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let (status, body) = self.send(ApiRequest::list_products()).await?;
        api::decode(status, &body)
    }

    /// Orders visible to `user`: everything for admins, their own otherwise.
    pub async fn orders_for(&self, user: &User) -> Result<Vec<Order>, ApiError> {
        let req = if user.is_admin() {
            ApiRequest::all_orders()
        } else {
            ApiRequest::user_orders(&user.id)
        };
        let (status, body) = self.send(req).await?;
        api::decode(status, &body)
    }

    pub async fn place_order(&self, order: &CheckoutRequest) -> Result<Order, ApiError> {
        let (status, body) = self.send(ApiRequest::place_order(order)?).await?;
        api::decode(status, &body)
    }

    pub async fn update_status(&self, id: &OrderId, update: &StatusUpdate) -> Result<(), ApiError> {
        let (status, body) = self.send(ApiRequest::update_status(id, update)?).await?;
        api::expect_success(status, &body)
    }

    pub async fn cancel_order(
        &self,
        id: &OrderId,
        cancel: &CancelRequest,
    ) -> Result<CancelResponse, ApiError> {
        let (status, body) = self.send(ApiRequest::cancel_order(id, cancel)?).await?;
        api::decode_or_default(status, &body)
    }

    pub async fn top_up(&self, user_id: &UserId, top_up: &TopUpRequest) -> Result<User, ApiError> {
        let (status, body) = self.send(ApiRequest::top_up(user_id, top_up)?).await?;
        api::decode(status, &body)
    }

    pub async fn toggle_favorite(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<User, ApiError> {
        let (status, body) = self
            .send(ApiRequest::toggle_favorite(user_id, product_id))
            .await?;
        api::decode(status, &body)
    }

    pub async fn set_stock(&self, id: &ProductId, quantity: u32) -> Result<(), ApiError> {
        let (status, body) = self.send(ApiRequest::set_stock(id, quantity)).await?;
        api::expect_success(status, &body)
    }

    pub async fn update_product(&self, product: &Product) -> Result<(), ApiError> {
        let (status, body) = self.send(ApiRequest::update_product(product)?).await?;
        api::expect_success(status, &body)
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let (status, body) = self.send(ApiRequest::delete_product(id)).await?;
        api::expect_success(status, &body)
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        let (status, body) = self.send(ApiRequest::create_product(product)?).await?;
        api::expect_success(status, &body)
    }
}

// ─── HTTP helpers (WASM) ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
async fn fetch_json(url: &str, method: &str, body: Option<String>) -> Result<(u16, String), ApiError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let opts = web_sys::RequestInit::new();
    opts.set_method(method);
    opts.set_mode(web_sys::RequestMode::Cors);

    let has_body = body.is_some();
    if let Some(b) = body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(&b));
    }

    let request = web_sys::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| ApiError::Network(format!("Failed to create request: {:?}", e)))?;

    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Network(format!("Failed to set header: {:?}", e)))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("No window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("Fetch failed: {:?}", e)))?;

    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Network("Response is not a Response object".into()))?;

    let text = JsFuture::from(
        resp.text()
            .map_err(|e| ApiError::Network(format!("Failed to get text: {:?}", e)))?,
    )
    .await
    .map_err(|e| ApiError::Network(format!("Failed to read body: {:?}", e)))?;

    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

// Non-WASM stub for type checking
#[cfg(not(target_family = "wasm"))]
async fn fetch_json(_url: &str, _method: &str, _body: Option<String>) -> Result<(u16, String), ApiError> {
    Err(ApiError::Network("HTTP client only available in WASM".to_string()))
}
