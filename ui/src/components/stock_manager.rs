use dioxus::prelude::*;

use canteen_common::product::{search_stock, Product, ProductCategory, ProductId, LOW_STOCK_THRESHOLD};
use canteen_common::stock::{low_stock_count, parse_stock, row_key, ProductForm};

use super::api_actions::{use_api_action, ApiAction};
use super::app::Route;
use super::shared_state::use_shared_state;

#[component]
pub fn StockManagerView() -> Element {
    let shared_state = use_shared_state();
    let api = use_api_action();
    let nav = use_navigator();
    let mut query = use_signal(String::new);
    let editing = use_signal(|| None::<ProductId>);

    let shared = shared_state.read();
    let low = low_stock_count(&shared.products);
    let rows: Vec<Product> = search_stock(&shared.products, &query.read())
        .into_iter()
        .cloned()
        .collect();
    drop(shared);

    rsx! {
        div { class: "stock-manager",
            div { class: "board-heading",
                h2 { "Stock" }
                button { onclick: move |_| api.send(ApiAction::LoadProducts), "Refresh" }
                button { class: "primary", onclick: move |_| { nav.push(Route::NewProduct {}); }, "Add product" }
            }
            if low > 0 {
                p { class: "low-stock-warning", "{low} product(s) with {LOW_STOCK_THRESHOLD} or fewer units" }
            }
            input {
                class: "search",
                r#type: "search",
                placeholder: "Search by name or category...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }
            table { class: "stock-table",
                thead {
                    tr {
                        th { "Product" }
                        th { "Category" }
                        th { "Price" }
                        th { "Stock" }
                        th { "Available" }
                        th {}
                    }
                }
                tbody {
                    for product in rows {
                        if editing.read().as_ref() == Some(&product.id) {
                            EditRow { key: "{product.id}", product, editing }
                        } else {
                            {
                                let key = row_key(&product);
                                rsx! { StockRow { key: "{key}", product, editing } }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StockRow(product: Product, mut editing: Signal<Option<ProductId>>) -> Element {
    let api = use_api_action();
    let mut shared_state = use_shared_state();
    let mut stock_input = use_signal(|| product.stock.to_string());
    let mut confirming_delete = use_signal(|| false);

    let low = product.is_low_stock();
    let price = product.price.to_string();
    let category = product.category.label().to_string();
    let stock_id = product.id.clone();
    let edit_id = product.id.clone();
    let delete_id = product.id.clone();

    rsx! {
        tr { class: if low { "low-stock" } else { "" },
            td { "{product.name}" }
            td { "{category}" }
            td { "{price}" }
            td {
                input {
                    class: "stock-input",
                    r#type: "number",
                    min: "0",
                    value: "{stock_input}",
                    oninput: move |evt| stock_input.set(evt.value()),
                }
                button {
                    onclick: move |_| match parse_stock(&stock_input.read()) {
                        Ok(quantity) => api.send(ApiAction::SetStock {
                            product_id: stock_id.clone(),
                            quantity,
                        }),
                        Err(e) => shared_state.write().last_error = Some(e.to_string()),
                    },
                    "Set"
                }
            }
            td { if product.available { "Yes" } else { "No" } }
            td {
                button { onclick: move |_| editing.set(Some(edit_id.clone())), "Edit" }
                if confirming_delete() {
                    span { class: "confirm-delete",
                        "Delete {product.name}? "
                        button {
                            class: "danger",
                            onclick: move |_| {
                                api.send(ApiAction::DeleteProduct { product_id: delete_id.clone() });
                                confirming_delete.set(false);
                            },
                            "Yes"
                        }
                        button { onclick: move |_| confirming_delete.set(false), "No" }
                    }
                } else {
                    button { class: "danger", onclick: move |_| confirming_delete.set(true), "Delete" }
                }
            }
        }
    }
}

/// Inline editor replacing a row of the stock table.
#[component]
fn EditRow(product: Product, mut editing: Signal<Option<ProductId>>) -> Element {
    let api = use_api_action();
    let original = product.clone();
    let mut form = use_signal(move || ProductForm::from_product(&original));
    let mut error = use_signal(|| None::<String>);
    let current = form.read().clone();
    let selected = current
        .category
        .as_ref()
        .map(|c| c.wire_name().to_string())
        .unwrap_or_default();

    let save = move |_| match form.read().apply_to(&product) {
        Ok(updated) => {
            api.send(ApiAction::UpdateProduct { product: updated });
            editing.set(None);
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    rsx! {
        tr { class: "editing",
            td {
                input {
                    value: "{current.name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
                textarea {
                    value: "{current.description}",
                    oninput: move |evt| form.write().description = evt.value(),
                }
            }
            td {
                select {
                    value: "{selected}",
                    onchange: move |evt| form.write().category = Some(ProductCategory::from_wire(&evt.value())),
                    for c in ProductCategory::all() {
                        option { value: "{c.wire_name()}", "{c.label()}" }
                    }
                }
            }
            td {
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    value: "{current.price}",
                    oninput: move |evt| form.write().price = evt.value(),
                }
            }
            td {
                input {
                    r#type: "number",
                    min: "0",
                    value: "{current.stock}",
                    oninput: move |evt| form.write().stock = evt.value(),
                }
            }
            td {
                input {
                    r#type: "checkbox",
                    checked: current.available,
                    onchange: move |evt| form.write().available = evt.checked(),
                }
            }
            td {
                button { class: "primary", onclick: save, "Save" }
                button { onclick: move |_| editing.set(None), "Cancel" }
                if let Some(err) = error.read().as_ref() {
                    p { class: "field-error", "{err}" }
                }
            }
        }
    }
}
