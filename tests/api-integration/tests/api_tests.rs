//! Cumulative client-against-backend tests.
//!
//! All steps run in order inside a single `#[tokio::test]` against one
//! stand-in backend. Each step builds on the state left by the previous ones
//! (accounts, balances, stock and orders), so a failing step stops the run.

use canteen_common::api::{self, ApiRequest};
use canteen_common::cart::Cart;
use canteen_common::checkout::build_checkout;
use canteen_common::config::ClientConfig;
use canteen_common::currency::Money;
use canteen_common::error::{ApiError, ValidationError};
use canteen_common::order::{
    CancelRequest, CancelResponse, Order, OrderStatus, PaymentMethod, StatusUpdate,
};
use canteen_common::pickup::{complete_pickup, find_by_pickup_code, PickupLookup};
use canteen_common::product::Product;
use canteen_common::sales::{DateRange, SalesReport};
use canteen_common::stock::ProductForm;
use canteen_common::user::{RegistrationForm, User};
use canteen_common::wallet::TopUpForm;

use canteen_api_integration::harness::{TestBackend, ADMIN_EMAIL, ADMIN_PASSWORD};
use canteen_api_integration::HttpTransport;

const STUDENT_EMAIL: &str = "ana@school.test";
const STUDENT_PASSWORD: &str = "segredo1";

fn registration() -> RegistrationForm {
    RegistrationForm {
        name: "Ana Souza".into(),
        registration: "2025001".into(),
        class_name: "1º Ano A".into(),
        email: STUDENT_EMAIL.into(),
        password: STUDENT_PASSWORD.into(),
        confirm_password: STUDENT_PASSWORD.into(),
        phone: "(11) 98765-4321".into(),
    }
}

async fn products(api: &HttpTransport) -> Vec<Product> {
    let (status, body) = api.send(ApiRequest::list_products()).await.unwrap();
    api::decode(status, &body).unwrap()
}

fn by_name<'a>(products: &'a [Product], name: &str) -> &'a Product {
    products
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("{name} missing from catalog"))
}

async fn checkout(
    api: &HttpTransport,
    user: &User,
    lines: &[(&Product, u32)],
    method: PaymentMethod,
) -> Order {
    let mut cart = Cart::new();
    for (product, quantity) in lines {
        for _ in 0..*quantity {
            cart.add(product).unwrap();
        }
    }
    let req = build_checkout(user, &cart, method).unwrap();
    let (status, body) = api.send(ApiRequest::place_order(&req).unwrap()).await.unwrap();
    api::decode(status, &body).unwrap()
}

async fn orders_of(api: &HttpTransport, user: &User) -> Vec<Order> {
    let req = if user.is_admin() {
        ApiRequest::all_orders()
    } else {
        ApiRequest::user_orders(&user.id)
    };
    let (status, body) = api.send(req).await.unwrap();
    api::decode(status, &body).unwrap()
}

async fn set_status(api: &HttpTransport, order: &Order, next: OrderStatus) {
    let update = StatusUpdate::for_order(order, next, None).unwrap();
    let (status, body) = api
        .send(ApiRequest::update_status(&order.id, &update).unwrap())
        .await
        .unwrap();
    api::expect_success(status, &body).unwrap();
}

async fn cancel(api: &HttpTransport, order: &Order, reason: &str) -> CancelResponse {
    let req = CancelRequest::for_order(order, reason).unwrap();
    let (status, body) = api
        .send(ApiRequest::cancel_order(&order.id, &req).unwrap())
        .await
        .unwrap();
    api::decode_or_default(status, &body).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cumulative_api_tests() {
    tracing_subscriber::fmt::try_init().ok();

    let backend = TestBackend::start().await.unwrap();
    let api = backend.transport();

    // ═══════════════════════════════════════════════════════════════════
    // Step 1: Register, then refuse a second account on the same email
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 1: register_student ──");
    let request = registration().to_request().unwrap();
    assert_eq!(request.phone, "11987654321");
    let (status, body) = api.send(ApiRequest::register(&request).unwrap()).await.unwrap();
    let (registered, _) = api::decode_auth(status, &body).unwrap();
    assert!(!registered.is_admin());
    assert_eq!(registered.balance, Money::ZERO);

    let (status, body) = api.send(ApiRequest::register(&request).unwrap()).await.unwrap();
    assert_eq!(status, 400);
    assert_eq!(
        api::decode_auth(status, &body),
        Err(ApiError::Rejected("Email already registered".into()))
    );
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 2: Login failures carry the backend's message
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 2: login ──");
    let refused = api.login(STUDENT_EMAIL, "wrong-password").await;
    assert_eq!(
        refused,
        Err(ApiError::Rejected("Invalid email or password".into()))
    );
    let mut student = api.login(STUDENT_EMAIL, STUDENT_PASSWORD).await.unwrap();
    assert_eq!(student.id, registered.id);
    assert_eq!(student.name, "Ana Souza");

    let admin = api.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert!(admin.is_admin());
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 3: Top up the wallet
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 3: top_up ──");
    let mut form = TopUpForm::default();
    form.pick(Money(5000));
    assert_eq!(
        form.validate(),
        Err(ValidationError::PaymentMethodRequired)
    );
    form.method = Some(PaymentMethod::Pix);
    let top_up = form.validate().unwrap();
    let (status, body) = api
        .send(ApiRequest::top_up(&student.id, &top_up).unwrap())
        .await
        .unwrap();
    student = api::decode(status, &body).unwrap();
    assert_eq!(student.balance, Money(5000));
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 4: Checkout debits balance and stock
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 4: checkout ──");
    let menu = products(&api).await;
    assert_eq!(menu.len(), 4);
    let pastry = by_name(&menu, "Baked Pastry").clone();
    let hot_dog = by_name(&menu, "Hot Dog").clone();
    let juice = by_name(&menu, "Orange Juice").clone();
    let brownie = by_name(&menu, "Brownie").clone();

    let paid_with_balance = checkout(
        &api,
        &student,
        &[(&pastry, 2), (&juice, 1)],
        PaymentMethod::Balance,
    )
    .await;
    assert_eq!(paid_with_balance.total, Money(450 * 2 + 550));
    assert_eq!(paid_with_balance.status, OrderStatus::Pending);
    assert_eq!(paid_with_balance.pickup_code.as_deref(), Some("4321"));
    assert_eq!(paid_with_balance.payment_label(), "Account balance");
    student.debit(paid_with_balance.total);
    assert_eq!(backend.balance_of(&student.id), Some(student.balance));
    assert_eq!(backend.stock_of(&pastry.id), Some(23));

    let paid_with_pix = checkout(&api, &student, &[(&hot_dog, 1)], PaymentMethod::Pix).await;
    let sweet = checkout(&api, &student, &[(&brownie, 1)], PaymentMethod::Balance).await;
    student.debit(sweet.total);
    assert_eq!(backend.balance_of(&student.id), Some(Money(5000 - 1450 - 600)));

    let mine = orders_of(&api, &student).await;
    assert_eq!(mine.len(), 3);
    assert!(mine.iter().all(|o| o.user_id == student.id));
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 5: Kitchen board moves the first order along
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 5: kitchen_board ──");
    set_status(&api, &paid_with_balance, OrderStatus::Preparing).await;
    let board = orders_of(&api, &admin).await;
    let preparing = board.iter().find(|o| o.id == paid_with_balance.id).unwrap();
    assert_eq!(preparing.status, OrderStatus::Preparing);

    // The backend refuses a move the client would never build.
    let backwards = StatusUpdate {
        status: OrderStatus::Pending,
        reason: None,
    };
    let (status, body) = api
        .send(ApiRequest::update_status(&preparing.id, &backwards).unwrap())
        .await
        .unwrap();
    assert!(matches!(
        api::expect_success(status, &body),
        Err(ApiError::Status { status: 409, .. })
    ));
    assert!(StatusUpdate::for_order(preparing, OrderStatus::Completed, None).is_err());

    set_status(&api, preparing, OrderStatus::Ready).await;
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 6: Pickup at the counter by phone code
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 6: pickup ──");
    let board = orders_of(&api, &admin).await;
    let ready = match find_by_pickup_code(&board, "4321") {
        PickupLookup::Found(order) => order,
        other => panic!("expected the ready order, got {other:?}"),
    };
    assert_eq!(ready.id, paid_with_balance.id);
    assert_eq!(find_by_pickup_code(&board, "0000"), PickupLookup::NotFound);

    let handoff = complete_pickup(&ready).unwrap();
    let (status, body) = api
        .send(ApiRequest::update_status(&ready.id, &handoff).unwrap())
        .await
        .unwrap();
    api::expect_success(status, &body).unwrap();
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 7: Student cancellations and refunds
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 7: cancel ──");
    let reply = cancel(&api, &paid_with_pix, "Changed my mind").await;
    assert_eq!(reply.updated_balance, None);

    let reply = cancel(&api, &sweet, "Ordered twice").await;
    assert_eq!(reply.updated_balance, Some(Money(5000 - 1450)));
    assert_eq!(backend.stock_of(&brownie.id), Some(3));

    let mine = orders_of(&api, &student).await;
    let completed = mine.iter().find(|o| o.id == paid_with_balance.id).unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert_eq!(
        CancelRequest::for_order(completed, "too late"),
        Err(ValidationError::NotCancellable)
    );
    let cancelled = mine.iter().find(|o| o.id == sweet.id).unwrap();
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("Ordered twice"));
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 8: Sales report skips cancelled orders
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 8: sales ──");
    let board = orders_of(&api, &admin).await;
    let report = SalesReport::compute(&board, DateRange::default(), chrono::Utc::now());
    assert_eq!(report.total_orders, 1);
    assert_eq!(report.total_revenue, Money(1450));
    assert_eq!(report.total_items, 3);
    assert_eq!(report.top_products[0].name, "Baked Pastry");
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 9: Favorites toggle on and off
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 9: favorites ──");
    let (status, body) = api
        .send(ApiRequest::toggle_favorite(&student.id, &juice.id))
        .await
        .unwrap();
    let user: User = api::decode(status, &body).unwrap();
    assert!(user.is_favorite(&juice.id));

    let (status, body) = api
        .send(ApiRequest::toggle_favorite(&student.id, &juice.id))
        .await
        .unwrap();
    let user: User = api::decode(status, &body).unwrap();
    assert!(user.favorites.is_empty());
    println!("   PASSED");

    // ═══════════════════════════════════════════════════════════════════
    // Step 10: Stock management
    // ═══════════════════════════════════════════════════════════════════
    println!("── Step 10: stock ──");
    let (status, body) = api
        .send(ApiRequest::set_stock(&brownie.id, 0))
        .await
        .unwrap();
    api::expect_success(status, &body).unwrap();

    let mut edit = ProductForm::from_product(&hot_dog);
    edit.price = "9.00".into();
    let edited = edit.apply_to(&hot_dog).unwrap();
    let (status, body) = api
        .send(ApiRequest::update_product(&edited).unwrap())
        .await
        .unwrap();
    api::expect_success(status, &body).unwrap();

    let menu = products(&api).await;
    assert!(!by_name(&menu, "Brownie").is_orderable());
    assert_eq!(by_name(&menu, "Hot Dog").price, Money(900));
    assert_eq!(by_name(&menu, "Hot Dog").id, hot_dog.id);

    let new = ProductForm {
        name: "Cheese Bread".into(),
        price: "3,50".into(),
        category: Some(pastry.category.clone()),
        stock: "12".into(),
        ..ProductForm::default()
    }
    .validate()
    .unwrap();
    let (status, body) = api
        .send(ApiRequest::create_product(&new).unwrap())
        .await
        .unwrap();
    api::expect_success(status, &body).unwrap();

    let menu = products(&api).await;
    assert_eq!(menu.len(), 5);
    let created = by_name(&menu, "Cheese Bread").clone();
    assert_eq!(created.price, Money(350));
    assert_eq!(created.stock, 12);

    let (status, body) = api
        .send(ApiRequest::delete_product(&created.id))
        .await
        .unwrap();
    api::expect_success(status, &body).unwrap();
    let (status, body) = api
        .send(ApiRequest::delete_product(&created.id))
        .await
        .unwrap();
    assert!(matches!(
        api::expect_success(status, &body),
        Err(ApiError::Status { status: 404, .. })
    ));
    assert_eq!(products(&api).await.len(), 4);
    println!("   PASSED");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let config = ClientConfig::resolve(Some("http://127.0.0.1:9/api"), None);
    let api = HttpTransport::new(config);
    let err = api.send(ApiRequest::list_products()).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), "Could not connect to the server.");
}
