use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::navigator::Navigator;
use super::stage::{Stage, StatusCatalog};

/// A print-shop work order ("OT").
///
/// `status` and `status_history` hold raw persisted keys. They are kept as
/// strings so that records written against an older or newer catalog still
/// load; the [`Navigator`] decides how such values are displayed and
/// advanced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Opaque unique identifier, a UUID v4 when generated here.
    #[serde(default = "new_id")]
    pub id: String,
    /// Shop-facing order number, e.g. `OT-2026-001`.
    pub ot_number: String,
    pub client_name: String,
    /// Number of printed units ordered.
    #[serde(default)]
    pub quantity: u32,
    /// Higher values are worked first on the board.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    /// Current stage key. Records without one start at the first stage.
    #[serde(default = "first_stage_key")]
    pub status: String,
    /// Keys this order has left, oldest first.
    #[serde(default)]
    pub status_history: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Set when the order enters the terminal stage.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

// Default id for records loaded without one: a fresh UUID v4.
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Default status for records loaded without one: the first catalog key.
fn first_stage_key() -> String {
    StatusCatalog::first_stage().key.as_str().to_string()
}

impl WorkOrder {
    /// Creates an order at the first stage of the lifecycle.
    pub fn new(ot_number: impl Into<String>, client_name: impl Into<String>, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            ot_number: ot_number.into(),
            client_name: client_name.into(),
            quantity,
            priority: 0,
            deadline: None,
            description: None,
            status: first_stage_key(),
            status_history: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Sets the board priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the delivery deadline.
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the free-text job description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stage to render for this order, falling back to the first stage.
    pub fn stage(&self) -> &'static Stage {
        Navigator::current_stage_info(&self.status)
    }

    /// Whether the order still belongs on the production board.
    /// Unrecognized statuses stay visible so they can be corrected.
    pub fn is_active(&self) -> bool {
        self.status != StatusCatalog::terminal_stage().key.as_str()
    }

    /// Case-insensitive match on OT number or client name. An empty term
    /// matches every order.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.ot_number.to_lowercase().contains(&term)
            || self.client_name.to_lowercase().contains(&term)
    }
}

/// Board ordering: highest priority first, then newest first.
pub fn board_cmp(a: &WorkOrder, b: &WorkOrder) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sorts `orders` in place by [`board_cmp`].
pub fn board_order(orders: &mut [WorkOrder]) {
    orders.sort_by(board_cmp);
}
