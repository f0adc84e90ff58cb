use dioxus::prelude::*;

use canteen_common::phone::format_phone;

use super::add_product::AddProductView;
use super::admin_orders::AdminOrdersView;
use super::api_actions::{use_api_coroutine, use_order_polling};
use super::api_client::client_config;
use super::balance_view::BalanceView;
use super::cart_view::CartView;
use super::catalog_view::CatalogView;
use super::favorites_view::FavoritesView;
use super::login_view::LoginView;
use super::order_history::OrderHistoryView;
use super::pickup_view::PickupView;
use super::register_view::RegisterView;
use super::sales_dashboard::SalesDashboardView;
use super::shared_state::{use_shared_state, SharedState};
use super::stock_manager::StockManagerView;
use super::support_inbox::SupportInboxView;
use super::support_view::SupportView;
use super::user_state::{use_user_state, UserState};

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(StudentLayout)]
    #[route("/menu")]
    Menu {},
    #[route("/cart")]
    Cart {},
    #[route("/orders")]
    Orders {},
    #[route("/favorites")]
    Favorites {},
    #[route("/balance")]
    Balance {},
    #[route("/support")]
    Support {},
    #[end_layout]
    #[nest("/admin")]
    #[layout(AdminLayout)]
    #[route("/")]
    AdminOrders {},
    #[route("/pickup")]
    Pickup {},
    #[route("/stock")]
    Stock {},
    #[route("/stock/new")]
    NewProduct {},
    #[route("/sales")]
    Sales {},
    #[route("/support")]
    AdminSupport {},
    #[end_layout]
    #[end_nest]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Landing page for a freshly logged-in user.
    pub fn dashboard(is_admin: bool) -> Self {
        if is_admin {
            Route::AdminOrders {}
        } else {
            Route::Menu {}
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(UserState::restore()));
    use_context_provider(|| Signal::new(SharedState::new(client_config())));
    use_api_coroutine();
    use_order_polling();

    rsx! { Router::<Route> {} }
}

/// Dismissible error and success banners.
#[component]
fn Banners() -> Element {
    let mut shared_state = use_shared_state();
    let error = shared_state.read().last_error.clone();
    let notice = shared_state.read().notice.clone();

    rsx! {
        if let Some(err) = error {
            div { class: "banner banner-error",
                span { "{err}" }
                button { onclick: move |_| shared_state.write().last_error = None, "×" }
            }
        }
        if let Some(msg) = notice {
            div { class: "banner banner-notice",
                span { "{msg}" }
                button { onclick: move |_| shared_state.write().notice = None, "×" }
            }
        }
    }
}

#[component]
fn LogoutButton() -> Element {
    let mut user_state = use_user_state();
    let nav = use_navigator();
    rsx! {
        button {
            class: "logout-btn",
            onclick: move |_| {
                user_state.write().logout();
                nav.replace(Route::Login {});
            },
            "Log out"
        }
    }
}

#[component]
fn StudentLayout() -> Element {
    let user_state = use_user_state();
    let nav = use_navigator();

    let state = user_state.read();
    let Some(user) = state.user.clone() else {
        nav.replace(Route::Login {});
        return rsx! {};
    };
    if user.is_admin() {
        nav.replace(Route::AdminOrders {});
        return rsx! {};
    }
    let cart_count = state.cart.item_count();
    drop(state);

    let class_name = user.class_name.clone().unwrap_or_default();
    let balance = user.balance.to_string();

    rsx! {
        div { class: "canteen-app student",
            header { class: "app-header",
                div { class: "header-top",
                    h1 { "Canteen" }
                    div { class: "user-info",
                        span { class: "user-name", "{user.name}" }
                        if !class_name.is_empty() {
                            span { class: "user-class", " - {class_name}" }
                        }
                        span { class: "user-balance", " | Balance: {balance}" }
                    }
                    LogoutButton {}
                }
                nav {
                    button { onclick: move |_| { nav.push(Route::Menu {}); }, "Menu" }
                    button { onclick: move |_| { nav.push(Route::Cart {}); }, "Cart ({cart_count})" }
                    button { onclick: move |_| { nav.push(Route::Orders {}); }, "My Orders" }
                    button { onclick: move |_| { nav.push(Route::Favorites {}); }, "Favorites" }
                    button { onclick: move |_| { nav.push(Route::Balance {}); }, "Add Balance" }
                    button { onclick: move |_| { nav.push(Route::Support {}); }, "Support" }
                }
            }
            Banners {}
            main {
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn AdminLayout() -> Element {
    let user_state = use_user_state();
    let nav = use_navigator();

    let Some(user) = user_state.read().user.clone() else {
        nav.replace(Route::Login {});
        return rsx! {};
    };
    if !user.is_admin() {
        nav.replace(Route::Menu {});
        return rsx! {};
    }
    let phone = user.phone.as_deref().map(format_phone).unwrap_or_default();

    rsx! {
        div { class: "canteen-app admin",
            header { class: "app-header",
                div { class: "header-top",
                    h1 { "Canteen Admin" }
                    div { class: "user-info",
                        span { class: "user-name", "{user.name}" }
                        if !phone.is_empty() {
                            span { class: "user-phone", " - {phone}" }
                        }
                    }
                    LogoutButton {}
                }
                nav {
                    button { onclick: move |_| { nav.push(Route::AdminOrders {}); }, "Orders" }
                    button { onclick: move |_| { nav.push(Route::Pickup {}); }, "Pickup" }
                    button { onclick: move |_| { nav.push(Route::Stock {}); }, "Stock" }
                    button { onclick: move |_| { nav.push(Route::Sales {}); }, "Sales" }
                    button { onclick: move |_| { nav.push(Route::AdminSupport {}); }, "Support" }
                }
            }
            Banners {}
            main {
                Outlet::<Route> {}
            }
        }
    }
}

/// Route component: renders the login form.
#[component]
fn Login() -> Element {
    rsx! { LoginView {} }
}

#[component]
fn Register() -> Element {
    rsx! { RegisterView {} }
}

#[component]
fn Menu() -> Element {
    rsx! { CatalogView {} }
}

#[component]
fn Cart() -> Element {
    rsx! { CartView {} }
}

#[component]
fn Orders() -> Element {
    rsx! { OrderHistoryView {} }
}

#[component]
fn Favorites() -> Element {
    rsx! { FavoritesView {} }
}

#[component]
fn Balance() -> Element {
    rsx! { BalanceView {} }
}

#[component]
fn Support() -> Element {
    rsx! { SupportView {} }
}

#[component]
fn AdminOrders() -> Element {
    rsx! { AdminOrdersView {} }
}

#[component]
fn Pickup() -> Element {
    rsx! { PickupView {} }
}

#[component]
fn Stock() -> Element {
    rsx! { StockManagerView {} }
}

#[component]
fn NewProduct() -> Element {
    rsx! { AddProductView {} }
}

#[component]
fn Sales() -> Element {
    rsx! { SalesDashboardView {} }
}

#[component]
fn AdminSupport() -> Element {
    rsx! { SupportInboxView {} }
}

/// Unknown paths fall back to the login page, which forwards a logged-in
/// user to their dashboard.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}", segments.join("/"));
    nav.replace(Route::Login {});
    rsx! {}
}
