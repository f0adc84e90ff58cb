use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::currency::Money;
use crate::error::ValidationError;
use crate::identity::{EntityId, UserId};

pub type OrderId = EntityId;

/// Where an order is in the kitchen.
///
/// `Pending → Preparing → Ready → Completed`, and `Pending → Cancelled`.
/// Completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn all() -> &'static [OrderStatus] {
        &[
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ]
    }

    /// Position along the kitchen flow. Cancelled has none.
    pub fn progress(self) -> Option<usize> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Preparing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Completed => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    /// Returns true if transitioning from self to `next` is valid.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Preparing)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Preparing, OrderStatus::Ready)
                | (OrderStatus::Ready, OrderStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether the order can be handed over at the counter.
    pub fn is_pickup_visible(self) -> bool {
        matches!(self, OrderStatus::Ready | OrderStatus::Completed)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            OrderStatus::Pending => "⏳",
            OrderStatus::Preparing => "👨‍🍳",
            OrderStatus::Ready => "✅",
            OrderStatus::Completed => "✓",
            OrderStatus::Cancelled => "✕",
        }
    }

    /// CSS modifier used by the status badge.
    pub fn css_class(self) -> &'static str {
        match self {
            OrderStatus::Pending => "status-pending",
            OrderStatus::Preparing => "status-preparing",
            OrderStatus::Ready => "status-ready",
            OrderStatus::Completed => "status-completed",
            OrderStatus::Cancelled => "status-cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How the student pays at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Balance,
    Pix,
    Card,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Balance, PaymentMethod::Pix, PaymentMethod::Card]
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Balance => "Account balance",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Card => "Card",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            PaymentMethod::Balance => "balance",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Card => "card",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "balance" => Some(PaymentMethod::Balance),
            "pix" => Some(PaymentMethod::Pix),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

/// An order as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: Money,
    pub status: OrderStatus,
    /// Kept as text: older orders carry methods this client does not know.
    #[serde(default)]
    pub payment_method: String,
    /// Unknown when the backend sent no readable creation time.
    #[serde(
        default,
        with = "crate::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl Order {
    pub fn payment_label(&self) -> &str {
        PaymentMethod::from_wire(&self.payment_method)
            .map(PaymentMethod::label)
            .unwrap_or(self.payment_method.as_str())
    }

    /// Students may only withdraw orders the kitchen has not started.
    pub fn can_cancel(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Mirror a confirmed status change locally.
    pub fn apply_status(&mut self, status: OrderStatus, reason: Option<String>) {
        self.status = status;
        if status == OrderStatus::Cancelled {
            self.cancel_reason = reason;
        }
    }

    pub fn timeline(&self) -> Option<Vec<TimelineStep>> {
        status_timeline(self.status)
    }

    /// Creation time in `fmt`, or a dash when unknown.
    pub fn created_label(&self, fmt: &str) -> String {
        self.created_at
            .map(|at| at.format(fmt).to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Sort key for order lists: newest first, undated orders last.
pub fn newest_first(a: &Order, b: &Order) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

/// One dot of the three-step tracker under an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    pub label: &'static str,
    pub active: bool,
}

const TIMELINE_LABELS: [&str; 3] = ["Received", "Preparing", "Ready"];

/// Steps of the tracker; `None` for cancelled orders, which show no tracker.
pub fn status_timeline(status: OrderStatus) -> Option<Vec<TimelineStep>> {
    let progress = status.progress()?;
    Some(
        TIMELINE_LABELS
            .iter()
            .enumerate()
            .map(|(idx, label)| TimelineStep {
                label: *label,
                active: progress >= idx,
            })
            .collect(),
    )
}

/// Button offered on the admin order board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardAction {
    pub label: &'static str,
    pub target: OrderStatus,
}

/// What the counter staff can do next with an order in `status`.
pub fn board_actions(status: OrderStatus) -> &'static [BoardAction] {
    const PENDING: &[BoardAction] = &[
        BoardAction { label: "Start preparing", target: OrderStatus::Preparing },
        BoardAction { label: "Cancel", target: OrderStatus::Cancelled },
    ];
    const PREPARING: &[BoardAction] = &[BoardAction {
        label: "Mark as ready",
        target: OrderStatus::Ready,
    }];
    const READY: &[BoardAction] = &[BoardAction {
        label: "Mark as delivered",
        target: OrderStatus::Completed,
    }];
    match status {
        OrderStatus::Pending => PENDING,
        OrderStatus::Preparing => PREPARING,
        OrderStatus::Ready => READY,
        OrderStatus::Completed | OrderStatus::Cancelled => &[],
    }
}

/// Status filter of the order board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == status,
        }
    }
}

/// Orders matching `filter`, newest first.
pub fn filter_orders(orders: &[Order], filter: StatusFilter) -> Vec<&Order> {
    let mut out: Vec<_> = orders.iter().filter(|o| filter.matches(o)).collect();
    out.sort_by(|a, b| newest_first(a, b));
    out
}

/// Counters at the top of the admin board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum of totals of every order that was not cancelled.
    pub revenue: Money,
}

impl BoardStats {
    pub fn compute(orders: &[Order]) -> Self {
        let mut stats = BoardStats::default();
        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Ready => stats.ready += 1,
                OrderStatus::Completed => stats.completed += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
            if order.status != OrderStatus::Cancelled {
                stats.revenue += order.total;
            }
        }
        stats
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::Ready => self.ready,
            OrderStatus::Completed => self.completed,
            OrderStatus::Cancelled => self.cancelled,
        }
    }
}

/// Body of the admin status update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StatusUpdate {
    /// Validate `order.status → next` before asking the backend.
    pub fn for_order(
        order: &Order,
        next: OrderStatus,
        reason: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !order.status.can_transition_to(next) {
            return Err(ValidationError::InvalidTransition {
                from: order.status.label().to_string(),
                to: next.label().to_string(),
            });
        }
        Ok(StatusUpdate { status: next, reason })
    }
}

/// Body of the student cancellation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub status: OrderStatus,
    pub reason: String,
}

impl CancelRequest {
    pub fn for_order(order: &Order, reason: &str) -> Result<Self, ValidationError> {
        if !order.can_cancel() {
            return Err(ValidationError::NotCancellable);
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::CancelReasonRequired);
        }
        Ok(CancelRequest {
            status: OrderStatus::Cancelled,
            reason: reason.to_string(),
        })
    }
}

/// Reply to a cancellation. A refund to balance comes back as the new balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_balance: Option<Money>,
}
