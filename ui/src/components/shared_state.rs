use dioxus::prelude::*;

use canteen_common::config::ClientConfig;
use canteen_common::product::{Product, ProductId};
use canteen_common::support::SupportThread;

use super::storage::session_cache;

/// State not tied to one user: the catalog, support tickets and the error
/// banner.
#[derive(Clone, Debug, Default)]
pub struct SharedState {
    pub config: ClientConfig,
    pub products: Vec<Product>,
    pub products_loading: bool,
    pub products_error: Option<String>,
    /// Tickets live only in browser storage.
    pub support: SupportThread,
    /// Last failed backend call, shown until dismissed.
    pub last_error: Option<String>,
    /// Last success message, shown until dismissed.
    pub notice: Option<String>,
}

impl SharedState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            support: session_cache().load_support(),
            ..Self::default()
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Mutate the tickets and persist the result.
    pub fn update_support(&mut self, f: impl FnOnce(&mut SupportThread)) {
        f(&mut self.support);
        session_cache().save_support(&self.support);
    }
}

pub fn use_shared_state() -> Signal<SharedState> {
    use_context::<Signal<SharedState>>()
}
