use dioxus::prelude::*;

use canteen_common::product::{filter_catalog, CategoryFilter, Product};

use super::api_actions::{use_api_action, ApiAction};
use super::app::Route;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn CatalogView() -> Element {
    let shared_state = use_shared_state();
    let api = use_api_action();
    let mut category = use_signal(CategoryFilter::default);
    let mut search = use_signal(String::new);

    let shared = shared_state.read();
    let loading = shared.products_loading;
    let load_error = shared.products_error.clone();
    let visible: Vec<Product> = filter_catalog(&shared.products, &category.read(), &search.read())
        .into_iter()
        .cloned()
        .collect();
    drop(shared);

    rsx! {
        div { class: "catalog-view",
            h2 { "Menu" }
            input {
                class: "search",
                r#type: "search",
                placeholder: "Search products...",
                value: "{search}",
                oninput: move |evt| search.set(evt.value()),
            }
            div { class: "category-tabs",
                for tab in CategoryFilter::tabs() {
                    {
                        let active = *category.read() == tab;
                        let label = tab.label().to_string();
                        rsx! {
                            button {
                                class: if active { "tab active" } else { "tab" },
                                onclick: move |_| category.set(tab.clone()),
                                "{label}"
                            }
                        }
                    }
                }
            }
            if loading {
                p { class: "loading", "Loading menu..." }
            } else if let Some(err) = load_error {
                div { class: "load-error",
                    p { "{err}" }
                    button {
                        onclick: move |_| api.send(ApiAction::LoadProducts),
                        "Try again"
                    }
                }
            } else if visible.is_empty() {
                p { class: "empty-state", "No products found." }
            } else {
                div { class: "product-grid",
                    for product in visible {
                        ProductCard { key: "{product.id}", product }
                    }
                }
            }
        }
    }
}

/// A catalog entry with add-to-cart and favorite toggle.
#[component]
pub fn ProductCard(product: Product) -> Element {
    let mut user_state = use_user_state();
    let mut shared_state = use_shared_state();
    let api = use_api_action();
    let nav = use_navigator();

    let is_favorite = user_state
        .read()
        .user
        .as_ref()
        .is_some_and(|u| u.is_favorite(&product.id));
    let orderable = product.is_orderable();
    let price = product.price.to_string();
    let category = product.category.label().to_string();
    let favorite_id = product.id.clone();
    let cart_product = product.clone();

    rsx! {
        div { class: if orderable { "product-card" } else { "product-card unavailable" },
            if !product.image.is_empty() {
                img { src: "{product.image}", alt: "{product.name}" }
            }
            div { class: "product-heading",
                h3 { "{product.name}" }
                button {
                    class: "favorite-btn",
                    title: if is_favorite { "Remove from favorites" } else { "Add to favorites" },
                    onclick: move |_| api.send(ApiAction::ToggleFavorite { product_id: favorite_id.clone() }),
                    if is_favorite { "♥" } else { "♡" }
                }
            }
            span { class: "category", "{category}" }
            p { class: "description", "{product.description}" }
            p { class: "price", "{price}" }
            if orderable {
                p { class: "quantity", "In stock: {product.stock}" }
                button {
                    onclick: move |_| {
                        let added = user_state.write().cart.add(&cart_product);
                        match added {
                            Ok(_) => { nav.push(Route::Cart {}); }
                            Err(e) => shared_state.write().last_error = Some(e.to_string()),
                        }
                    },
                    "Add to cart"
                }
            } else {
                p { class: "unavailable-note", "Unavailable" }
            }
        }
    }
}
