use dioxus::prelude::*;

use canteen_common::cart::Cart;
use canteen_common::currency::Money;
use canteen_common::identity::UserId;
use canteen_common::order::{newest_first, Order, OrderId, OrderStatus};
use canteen_common::user::User;

use super::storage::session_cache;

/// Per-session state: who is logged in, their cart and their orders.
#[derive(Clone, Debug, Default)]
pub struct UserState {
    pub user: Option<User>,
    pub cart: Cart,
    /// Newest first.
    pub orders: Vec<Order>,
}

impl UserState {
    /// Start from whatever session the browser kept.
    pub fn restore() -> Self {
        let user = session_cache().load_user();
        if let Some(u) = &user {
            tracing::info!("Restored session for {}", u.email);
        }
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    /// Replace the session user and write it through to storage.
    pub fn set_user(&mut self, user: User) {
        session_cache().save_user(&user);
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Some(u) = self.user.take() {
            tracing::info!("Logged out {}", u.email);
        }
        self.cart.clear();
        self.orders.clear();
        session_cache().clear_user();
    }

    /// Adopt a fresh order list from the backend.
    pub fn replace_orders(&mut self, mut orders: Vec<Order>) {
        orders.sort_by(newest_first);
        self.orders = orders;
    }

    pub fn prepend_order(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    pub fn apply_status(&mut self, id: &OrderId, status: OrderStatus, reason: Option<String>) {
        if let Some(order) = self.orders.iter_mut().find(|o| &o.id == id) {
            order.apply_status(status, reason);
        }
    }

    /// Mirror a balance payment locally until the next refresh.
    pub fn debit(&mut self, amount: Money) {
        if let Some(mut user) = self.user.clone() {
            user.debit(amount);
            self.set_user(user);
        }
    }

    pub fn set_balance(&mut self, balance: Money) {
        if let Some(mut user) = self.user.clone() {
            user.balance = balance;
            self.set_user(user);
        }
    }
}

pub fn use_user_state() -> Signal<UserState> {
    use_context::<Signal<UserState>>()
}
