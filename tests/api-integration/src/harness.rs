//! An in-memory stand-in for the canteen backend.
//!
//! Serves the same REST surface the browser client talks to, on an ephemeral
//! localhost port, so request building and reply decoding can be exercised
//! end to end without the real server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use canteen_common::api::AuthResponse;
use canteen_common::cart::CartItem;
use canteen_common::checkout::CheckoutRequest;
use canteen_common::config::ClientConfig;
use canteen_common::currency::Money;
use canteen_common::identity::{EntityId, Role};
use canteen_common::order::{
    CancelRequest, CancelResponse, Order, OrderStatus, PaymentMethod, StatusUpdate,
};
use canteen_common::product::{Product, ProductCategory};
use canteen_common::stock::NewProduct;
use canteen_common::user::{Credentials, RegisterRequest, User};
use canteen_common::wallet::TopUpRequest;

use crate::HttpTransport;

pub const ADMIN_EMAIL: &str = "admin@canteen.test";
pub const ADMIN_PASSWORD: &str = "admin123";

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
struct Backend {
    accounts: Vec<Account>,
    products: Vec<Product>,
    orders: Vec<Order>,
    last_id: i64,
}

impl Backend {
    fn seeded() -> Self {
        let mut backend = Backend::default();
        let admin = User {
            id: backend.next_id(),
            name: "Canteen Admin".into(),
            email: ADMIN_EMAIL.into(),
            role: Role::Admin,
            class_name: None,
            balance: Money::ZERO,
            phone: None,
            registration: None,
            favorites: Vec::new(),
        };
        backend.accounts.push(Account {
            user: admin,
            password: ADMIN_PASSWORD.into(),
        });
        for (name, category, cents, stock) in [
            ("Baked Pastry", ProductCategory::Savory, 450, 25),
            ("Hot Dog", ProductCategory::Snacks, 800, 20),
            ("Orange Juice", ProductCategory::Drinks, 550, 40),
            ("Brownie", ProductCategory::Desserts, 600, 3),
        ] {
            let id = backend.next_id();
            backend.products.push(Product {
                id,
                name: name.into(),
                description: String::new(),
                price: Money(cents),
                category,
                image: String::new(),
                available: true,
                stock,
            });
        }
        backend
    }

    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        EntityId::from(self.last_id)
    }

    fn user_mut(&mut self, id: &EntityId) -> Result<&mut User, Failure> {
        self.accounts
            .iter_mut()
            .map(|a| &mut a.user)
            .find(|u| &u.id == id)
            .ok_or_else(|| not_found("user"))
    }

    fn product_mut(&mut self, id: &EntityId) -> Result<&mut Product, Failure> {
        self.products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| not_found("product"))
    }

    fn order_mut(&mut self, id: &EntityId) -> Result<&mut Order, Failure> {
        self.orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| not_found("order"))
    }
}

type Shared = Arc<Mutex<Backend>>;
type Failure = (StatusCode, String);

fn lock(db: &Shared) -> MutexGuard<'_, Backend> {
    db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found(what: &str) -> Failure {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn bad_request(message: impl Into<String>) -> Failure {
    (StatusCode::BAD_REQUEST, message.into())
}

/// A running stand-in backend. Stops serving when dropped.
pub struct TestBackend {
    pub config: ClientConfig,
    db: Shared,
    server: tokio::task::JoinHandle<()>,
}

impl TestBackend {
    pub async fn start() -> std::io::Result<Self> {
        let db: Shared = Arc::new(Mutex::new(Backend::seeded()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new().nest("/api", routes(db.clone()));

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("stand-in backend stopped: {e}");
            }
        });
        tracing::info!("stand-in backend listening on {addr}");

        let config = ClientConfig::resolve(Some(&format!("http://{addr}/api/")), None);
        Ok(Self { config, db, server })
    }

    pub fn transport(&self) -> HttpTransport {
        HttpTransport::new(self.config.clone())
    }

    /// Current stock of a product, read directly from the backend.
    pub fn stock_of(&self, id: &EntityId) -> Option<u32> {
        lock(&self.db)
            .products
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.stock)
    }

    /// Current balance of a user, read directly from the backend.
    pub fn balance_of(&self, id: &EntityId) -> Option<Money> {
        lock(&self.db)
            .accounts
            .iter()
            .find(|a| &a.user.id == id)
            .map(|a| a.user.balance)
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn routes(db: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/produtos", get(list_products).post(create_product))
        .route("/produtos/{id}", put(update_product).delete(delete_product))
        .route("/produtos/{id}/estoque", patch(set_stock))
        .route("/pedidos", get(all_orders).post(place_order))
        .route("/pedidos/usuario/{id}", get(user_orders))
        .route("/pedidos/{id}/status", patch(update_status))
        .route("/pedidos/{id}/cancelar", patch(cancel_order))
        .route("/users/{id}/saldo", post(top_up))
        .route("/users/{id}/favorites/{product_id}", post(toggle_favorite))
        .with_state(db)
}

// ─── Auth ────────────────────────────────────────────────────────────────────

fn refused(status: StatusCode, message: &str) -> (StatusCode, Json<AuthResponse>) {
    (
        status,
        Json(AuthResponse {
            success: false,
            message: Some(message.to_string()),
            user: None,
        }),
    )
}

async fn login(
    State(db): State<Shared>,
    Json(credentials): Json<Credentials>,
) -> (StatusCode, Json<AuthResponse>) {
    let db = lock(&db);
    let account = db
        .accounts
        .iter()
        .find(|a| a.user.email == credentials.email && a.password == credentials.password);
    match account {
        Some(account) => (
            StatusCode::OK,
            Json(AuthResponse {
                success: true,
                message: Some(format!("Welcome, {}!", account.user.name)),
                user: Some(account.user.clone()),
            }),
        ),
        None => refused(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn register(
    State(db): State<Shared>,
    Json(form): Json<RegisterRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let mut db = lock(&db);
    if db.accounts.iter().any(|a| a.user.email == form.email) {
        return refused(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let user = User {
        id: db.next_id(),
        name: form.name,
        email: form.email,
        role: Role::Student,
        class_name: Some(form.class_name),
        balance: Money::ZERO,
        phone: Some(form.phone),
        registration: Some(form.registration),
        favorites: Vec::new(),
    };
    db.accounts.push(Account {
        user: user.clone(),
        password: form.password,
    });
    (
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: Some("Account created".into()),
            user: Some(user),
        }),
    )
}

// ─── Products ────────────────────────────────────────────────────────────────

async fn list_products(State(db): State<Shared>) -> Json<Vec<Product>> {
    Json(lock(&db).products.clone())
}

async fn create_product(
    State(db): State<Shared>,
    Json(new): Json<NewProduct>,
) -> (StatusCode, Json<Product>) {
    let mut db = lock(&db);
    let id = db.next_id();
    let product = new.with_id(id);
    db.products.push(product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(db): State<Shared>,
    Path(id): Path<String>,
    Json(product): Json<Product>,
) -> Result<Json<Product>, Failure> {
    let mut db = lock(&db);
    let slot = db.product_mut(&EntityId::new(id))?;
    *slot = Product {
        id: slot.id.clone(),
        ..product
    };
    Ok(Json(slot.clone()))
}

async fn delete_product(
    State(db): State<Shared>,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure> {
    let id = EntityId::new(id);
    let mut db = lock(&db);
    let before = db.products.len();
    db.products.retain(|p| p.id != id);
    if db.products.len() == before {
        return Err(not_found("product"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct StockQuery {
    quantidade: u32,
}

async fn set_stock(
    State(db): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<StockQuery>,
) -> Result<Json<Product>, Failure> {
    let mut db = lock(&db);
    let product = db.product_mut(&EntityId::new(id))?;
    product.stock = query.quantidade;
    Ok(Json(product.clone()))
}

// ─── Orders ──────────────────────────────────────────────────────────────────

async fn all_orders(State(db): State<Shared>) -> Json<Vec<Order>> {
    Json(lock(&db).orders.clone())
}

async fn user_orders(State(db): State<Shared>, Path(id): Path<String>) -> Json<Vec<Order>> {
    let id = EntityId::new(id);
    Json(
        lock(&db)
            .orders
            .iter()
            .filter(|o| o.user_id == id)
            .cloned()
            .collect(),
    )
}

async fn place_order(
    State(db): State<Shared>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), Failure> {
    let mut db = lock(&db);
    if req.items.is_empty() {
        return Err(bad_request("Order has no items"));
    }

    let mut items = Vec::with_capacity(req.items.len());
    for line in &req.items {
        let product = db
            .products
            .iter()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| not_found("product"))?;
        if !product.available || product.stock < line.quantity {
            return Err(bad_request(format!("Insufficient stock for {}", product.name)));
        }
        items.push(CartItem {
            product: product.clone(),
            quantity: line.quantity,
        });
    }
    let total: Money = items.iter().map(|i| i.product.price * i.quantity).sum();

    if req.payment_method == PaymentMethod::Balance {
        let user = db.user_mut(&req.user_id)?;
        if !user.can_afford(total) {
            return Err(bad_request("Insufficient balance"));
        }
        user.debit(total);
    }
    for item in &items {
        let product = db.product_mut(&item.product.id)?;
        product.stock -= item.quantity;
    }

    let order = Order {
        id: db.next_id(),
        user_id: req.user_id,
        user_name: req.user_name,
        user_phone: req.user_phone,
        items,
        total,
        status: OrderStatus::Pending,
        payment_method: req.payment_method.wire_name().to_string(),
        created_at: Some(chrono::Utc::now()),
        pickup_code: Some(req.pickup_code),
        cancel_reason: None,
    };
    db.orders.push(order.clone());
    Ok((StatusCode::CREATED, Json(order)))
}

async fn update_status(
    State(db): State<Shared>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Order>, Failure> {
    let mut db = lock(&db);
    let order = db.order_mut(&EntityId::new(id))?;
    if !order.status.can_transition_to(update.status) {
        return Err((
            StatusCode::CONFLICT,
            format!("cannot move {} to {}", order.status, update.status),
        ));
    }
    order.apply_status(update.status, update.reason);
    Ok(Json(order.clone()))
}

async fn cancel_order(
    State(db): State<Shared>,
    Path(id): Path<String>,
    Json(cancel): Json<CancelRequest>,
) -> Result<Json<CancelResponse>, Failure> {
    let mut db = lock(&db);
    let order = db.order_mut(&EntityId::new(id))?;
    if !order.can_cancel() || cancel.status != OrderStatus::Cancelled {
        return Err((StatusCode::CONFLICT, "order can no longer be cancelled".into()));
    }
    order.apply_status(OrderStatus::Cancelled, Some(cancel.reason));
    let order = order.clone();

    for item in &order.items {
        if let Ok(product) = db.product_mut(&item.product.id) {
            product.stock += item.quantity;
        }
    }

    if order.payment_method != PaymentMethod::Balance.wire_name() {
        return Ok(Json(CancelResponse::default()));
    }
    let user = db.user_mut(&order.user_id)?;
    user.balance += order.total;
    Ok(Json(CancelResponse {
        updated_balance: Some(user.balance),
    }))
}

// ─── Users ───────────────────────────────────────────────────────────────────

async fn top_up(
    State(db): State<Shared>,
    Path(id): Path<String>,
    Json(req): Json<TopUpRequest>,
) -> Result<Json<User>, Failure> {
    if !req.amount.is_positive() || req.payment_method == PaymentMethod::Balance {
        return Err(bad_request("Invalid top-up"));
    }
    let mut db = lock(&db);
    let user = db.user_mut(&EntityId::new(id))?;
    user.balance += req.amount;
    Ok(Json(user.clone()))
}

async fn toggle_favorite(
    State(db): State<Shared>,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<Json<User>, Failure> {
    let product_id = EntityId::new(product_id);
    let mut db = lock(&db);
    let product = db.product_mut(&product_id)?.clone();
    let user = db.user_mut(&EntityId::new(id))?;
    if user.is_favorite(&product_id) {
        user.favorites.retain(|p| p.id != product_id);
    } else {
        user.favorites.push(product);
    }
    Ok(Json(user.clone()))
}
