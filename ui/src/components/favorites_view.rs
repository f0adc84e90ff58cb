use dioxus::prelude::*;

use canteen_common::product::Product;

use super::catalog_view::ProductCard;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn FavoritesView() -> Element {
    let user_state = use_user_state();
    let shared_state = use_shared_state();

    // Prefer the catalog's copy so stock and price are current.
    let favorites: Vec<Product> = {
        let shared = shared_state.read();
        user_state
            .read()
            .user
            .as_ref()
            .map(|u| {
                u.favorites
                    .iter()
                    .map(|f| shared.product(&f.id).cloned().unwrap_or_else(|| f.clone()))
                    .collect()
            })
            .unwrap_or_default()
    };

    rsx! {
        div { class: "favorites-view",
            h2 { "Favorites" }
            if favorites.is_empty() {
                p { class: "empty-state", "No favorites yet. Tap the heart on a product to save it here." }
            } else {
                div { class: "product-grid",
                    for product in favorites {
                        ProductCard { key: "{product.id}", product }
                    }
                }
            }
        }
    }
}
