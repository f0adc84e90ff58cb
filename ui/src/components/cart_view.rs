use dioxus::prelude::*;

use canteen_common::checkout::{build_checkout, can_pay};
use canteen_common::order::PaymentMethod;

use super::api_client::ApiClient;
use super::app::Route;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn CartView() -> Element {
    let mut user_state = use_user_state();
    let mut shared_state = use_shared_state();
    let nav = use_navigator();
    let mut method = use_signal(PaymentMethod::default);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let state = user_state.read();
    let items = state.cart.items().to_vec();
    let total = state.cart.total();
    let balance = state.user.as_ref().map(|u| u.balance).unwrap_or_default();
    let affordable = state
        .user
        .as_ref()
        .is_some_and(|u| can_pay(u, total, method()));
    drop(state);

    let checkout = move |_| {
        let state = user_state.read();
        let Some(user) = state.user.clone() else {
            return;
        };
        let request = match build_checkout(&user, &state.cart, method()) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        drop(state);

        let client = ApiClient::new(shared_state.read().config.clone());
        error.set(None);
        submitting.set(true);
        spawn(async move {
            match client.place_order(&request).await {
                Ok(order) => {
                    tracing::info!("Placed order #{} for {}", order.id, order.total);
                    let mut state = user_state.write();
                    state.prepend_order(order);
                    state.cart.clear();
                    if request.payment_method == PaymentMethod::Balance {
                        state.debit(request.total);
                    }
                    drop(state);
                    shared_state.write().notice = Some("Order placed!".into());
                    nav.push(Route::Orders {});
                }
                Err(e) => {
                    tracing::error!("Checkout failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    if items.is_empty() {
        return rsx! {
            div { class: "cart-view",
                h2 { "Cart" }
                p { class: "empty-state", "Your cart is empty." }
                button { onclick: move |_| { nav.push(Route::Menu {}); }, "Browse the menu" }
            }
        };
    }

    rsx! {
        div { class: "cart-view",
            h2 { "Cart" }
            div { class: "cart-items",
                for item in items {
                    {
                        let id = item.product.id.clone();
                        let dec_id = id.clone();
                        let inc_id = id.clone();
                        let remove_id = id.clone();
                        let qty = item.quantity;
                        let price = item.product.price.to_string();
                        let subtotal = item.subtotal().to_string();
                        rsx! {
                            div { class: "cart-item", key: "{id}",
                                div { class: "cart-item-info",
                                    h3 { "{item.product.name}" }
                                    p { class: "price", "{price} each" }
                                }
                                div { class: "quantity-controls",
                                    button {
                                        onclick: move |_| {
                                            let result = user_state.write().cart.update_quantity(&dec_id, qty.saturating_sub(1));
                                            if let Err(e) = result {
                                                shared_state.write().last_error = Some(e.to_string());
                                            }
                                        },
                                        "-"
                                    }
                                    span { class: "quantity", "{qty}" }
                                    button {
                                        disabled: qty >= item.product.stock,
                                        onclick: move |_| {
                                            let result = user_state.write().cart.update_quantity(&inc_id, qty + 1);
                                            if let Err(e) = result {
                                                shared_state.write().last_error = Some(e.to_string());
                                            }
                                        },
                                        "+"
                                    }
                                }
                                p { class: "subtotal", "{subtotal}" }
                                button {
                                    class: "remove-btn",
                                    onclick: move |_| user_state.write().cart.remove(&remove_id),
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }
            div { class: "checkout",
                h3 { "Total: {total}" }
                div { class: "payment-methods",
                    for pm in PaymentMethod::all().iter().copied() {
                        label {
                            input {
                                r#type: "radio",
                                name: "payment",
                                checked: method() == pm,
                                onchange: move |_| method.set(pm),
                            }
                            " {pm.label()}"
                        }
                    }
                }
                if method() == PaymentMethod::Balance {
                    p { class: if affordable { "balance-ok" } else { "balance-short" },
                        "Your balance: {balance}"
                    }
                    if !affordable {
                        p { class: "field-error", "Insufficient balance" }
                    }
                }
                if let Some(err) = error.read().as_ref() {
                    p { class: "field-error", "{err}" }
                }
                button {
                    class: "checkout-btn",
                    disabled: submitting() || !affordable,
                    onclick: checkout,
                    if submitting() { "Placing order..." } else { "Checkout" }
                }
            }
        }
    }
}
