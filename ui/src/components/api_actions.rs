use std::time::Duration;

use dioxus::prelude::*;

use canteen_common::error::ApiError;
use canteen_common::order::{OrderId, OrderStatus, StatusUpdate};
use canteen_common::product::{Product, ProductId};

use super::api_client::ApiClient;
use super::shared_state::{use_shared_state, SharedState};
use super::user_state::{use_user_state, UserState};

/// Backend calls whose outcome is reported through the shared banner.
#[derive(Debug, Clone)]
pub enum ApiAction {
    /// Fetch the product list (startup and the catalog's retry button).
    LoadProducts,
    /// Fetch orders for whoever is logged in.
    RefreshOrders,
    ToggleFavorite { product_id: ProductId },
    UpdateStatus { order_id: OrderId, update: StatusUpdate },
    SetStock { product_id: ProductId, quantity: u32 },
    UpdateProduct { product: Product },
    DeleteProduct { product_id: ProductId },
}

/// Get a handle to send actions to the API coroutine.
pub fn use_api_action() -> Coroutine<ApiAction> {
    use_coroutine_handle::<ApiAction>()
}

/// Wait without blocking the page. Never returns on native builds.
pub async fn sleep(duration: Duration) {
    #[cfg(target_family = "wasm")]
    gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
    #[cfg(not(target_family = "wasm"))]
    {
        let _ = duration;
        std::future::pending::<()>().await;
    }
}

/// Start the coroutine that runs [`ApiAction`]s one at a time, in the order
/// they were sent. The catalog is loaded before the first action.
pub fn use_api_coroutine() {
    let user_state = use_user_state();
    let shared_state = use_shared_state();

    use_coroutine(move |mut rx: UnboundedReceiver<ApiAction>| async move {
        use futures::StreamExt;

        let client = ApiClient::new(shared_state.read().config.clone());
        load_products(&client, shared_state).await;
        refresh_orders(&client, user_state).await;

        while let Some(action) = rx.next().await {
            tracing::debug!("API action: {:?}", action);
            handle(&client, action, user_state, shared_state).await;
        }
    });
}

/// Refresh orders on a fixed interval while someone is logged in.
pub fn use_order_polling() {
    let user_state = use_user_state();
    let shared_state = use_shared_state();

    use_coroutine(move |_rx: UnboundedReceiver<()>| async move {
        let config = shared_state.read().config.clone();
        let client = ApiClient::new(config.clone());
        loop {
            sleep(config.poll_interval).await;
            if user_state.read().user.is_some() {
                refresh_orders(&client, user_state).await;
            }
        }
    });
}

async fn handle(
    client: &ApiClient,
    action: ApiAction,
    mut user_state: Signal<UserState>,
    mut shared: Signal<SharedState>,
) {
    match action {
        ApiAction::LoadProducts => load_products(client, shared).await,
        ApiAction::RefreshOrders => refresh_orders(client, user_state).await,
        ApiAction::ToggleFavorite { product_id } => {
            let Some(user_id) = user_state.read().user_id().cloned() else {
                return;
            };
            match client.toggle_favorite(&user_id, &product_id).await {
                Ok(user) => user_state.write().set_user(user),
                Err(e) => report(&mut shared, "Could not update favorites", e),
            }
        }
        ApiAction::UpdateStatus { order_id, update } => {
            match client.update_status(&order_id, &update).await {
                Ok(()) => {
                    let status = update.status;
                    user_state.write().apply_status(&order_id, status, update.reason);
                    shared.write().notice = Some(match status {
                        OrderStatus::Completed => format!("Order #{order_id} delivered"),
                        _ => format!("Order #{order_id} is now {}", status.label()),
                    });
                }
                Err(e) => report(&mut shared, "Could not update the order", e),
            }
        }
        ApiAction::SetStock { product_id, quantity } => {
            match client.set_stock(&product_id, quantity).await {
                Ok(()) => {
                    let mut state = shared.write();
                    if let Some(p) = state.products.iter_mut().find(|p| p.id == product_id) {
                        p.stock = quantity;
                    }
                }
                Err(e) => report(&mut shared, "Could not update stock", e),
            }
        }
        ApiAction::UpdateProduct { product } => match client.update_product(&product).await {
            Ok(()) => {
                let mut state = shared.write();
                if let Some(p) = state.products.iter_mut().find(|p| p.id == product.id) {
                    *p = product;
                }
                state.notice = Some("Product updated".into());
            }
            Err(e) => report(&mut shared, "Could not save the product", e),
        },
        ApiAction::DeleteProduct { product_id } => {
            match client.delete_product(&product_id).await {
                Ok(()) => {
                    let mut state = shared.write();
                    state.products.retain(|p| p.id != product_id);
                    state.notice = Some("Product deleted".into());
                }
                Err(e) => report(&mut shared, "Could not delete the product", e),
            }
        }
    }
}

pub async fn load_products(client: &ApiClient, mut shared: Signal<SharedState>) {
    {
        let mut state = shared.write();
        state.products_loading = true;
        state.products_error = None;
    }
    let result = client.products().await;
    let mut state = shared.write();
    state.products_loading = false;
    match result {
        Ok(products) => {
            tracing::info!("Loaded {} products", products.len());
            state.products = products;
        }
        Err(e) => {
            tracing::error!("Loading products failed: {e}");
            state.products_error = Some(e.user_message());
        }
    }
}

/// Fetch orders for the current user. A reply for a user who has since
/// logged out is dropped.
async fn refresh_orders(client: &ApiClient, mut user_state: Signal<UserState>) {
    let Some(user) = user_state.read().user.clone() else {
        return;
    };
    match client.orders_for(&user).await {
        Ok(orders) => {
            let mut state = user_state.write();
            if state.user_id() == Some(&user.id) {
                state.replace_orders(orders);
            }
        }
        // Polling failures stay out of the banner.
        Err(e) => tracing::warn!("Order refresh failed: {e}"),
    }
}

fn report(shared: &mut Signal<SharedState>, context: &str, e: ApiError) {
    tracing::error!("{context}: {e}");
    shared.write().last_error = Some(format!("{context}: {}", e.user_message()));
}
