use crate::error::ValidationError;
use crate::order::{Order, OrderStatus, StatusUpdate};

/// Outcome of typing a code at the counter.
#[derive(Debug, Clone, PartialEq)]
pub enum PickupLookup {
    /// Nothing was typed.
    Empty,
    NotFound,
    Found(Order),
}

/// Find the order a student is collecting.
///
/// Only orders already ready (or handed over) are matched, so a code shared
/// by several students' phones resolves to the one waiting at the counter.
pub fn find_by_pickup_code(orders: &[Order], code: &str) -> PickupLookup {
    let code = code.trim();
    if code.is_empty() {
        return PickupLookup::Empty;
    }
    orders
        .iter()
        .find(|o| o.pickup_code.as_deref() == Some(code) && o.status.is_pickup_visible())
        .cloned()
        .map(PickupLookup::Found)
        .unwrap_or(PickupLookup::NotFound)
}

/// Status update that hands a found order over.
pub fn complete_pickup(order: &Order) -> Result<StatusUpdate, ValidationError> {
    StatusUpdate::for_order(order, OrderStatus::Completed, None)
}
