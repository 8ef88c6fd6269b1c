use std::fmt;

use chrono::Utc;
use tracing::{debug, warn};

use super::stage::{Stage, StageKey, StatusCatalog};
use super::work_order::WorkOrder;

/// Why an advance left the order where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFurtherTransition {
    /// The order is already at the last stage.
    Terminal,
    /// The stored status is not a catalog key.
    UnknownStatus,
}

impl fmt::Display for NoFurtherTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoFurtherTransition::Terminal => write!(f, "already at the final stage"),
            NoFurtherTransition::UnknownStatus => write!(f, "status is not a known stage"),
        }
    }
}

/// The result of asking the navigator to advance an order.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The order moved one stage forward.
    Moved {
        order: WorkOrder,
        from: StageKey,
        to: StageKey,
    },
    /// The order is returned untouched.
    Unchanged {
        order: WorkOrder,
        reason: NoFurtherTransition,
    },
}

impl Advance {
    /// The order after the attempt, moved or not.
    pub fn order(&self) -> &WorkOrder {
        match self {
            Advance::Moved { order, .. } | Advance::Unchanged { order, .. } => order,
        }
    }

    /// Consumes the outcome, keeping only the order.
    pub fn into_order(self) -> WorkOrder {
        match self {
            Advance::Moved { order, .. } | Advance::Unchanged { order, .. } => order,
        }
    }

    /// Whether the order changed stage.
    pub fn is_moved(&self) -> bool {
        matches!(self, Advance::Moved { .. })
    }
}

/// Computes forward transitions over the [`StatusCatalog`].
///
/// The flow is strictly linear: every stage except the last has exactly
/// one successor, at `order + 1`. There are no reverse edges.
pub struct Navigator;

impl Navigator {
    /// Stage to display for a stored status. Unknown or empty values
    /// render as the first stage instead of failing.
    pub fn current_stage_info(status: &str) -> &'static Stage {
        match StatusCatalog::stage_by_key(status) {
            Ok(stage) => stage,
            Err(_) => {
                if !status.is_empty() {
                    warn!(status, "Unrecognized work order status, displaying first stage");
                }
                StatusCatalog::first_stage()
            }
        }
    }

    /// The stage after `status`, or `None` when `status` is terminal or
    /// a non-empty string that is not a catalog key. An empty status is
    /// unset and counts as the first stage.
    pub fn next_stage(status: &str) -> Option<&'static Stage> {
        let current = Self::advanceable_stage(status)?;
        StatusCatalog::all_stages().get(current.order + 1)
    }

    // Stage an order can advance from: exact keys, or the first stage
    // when the status was never set.
    fn advanceable_stage(status: &str) -> Option<&'static Stage> {
        if status.is_empty() {
            return Some(StatusCatalog::first_stage());
        }
        StatusCatalog::stage_by_key(status).ok()
    }

    /// Moves `order` one stage forward.
    ///
    /// On success the previous key is appended to `status_history` and
    /// `updated_at` is bumped; entering the terminal stage also stamps
    /// `completed_at`. Otherwise the order comes back unchanged.
    pub fn advance(mut order: WorkOrder) -> Advance {
        let Some(current) = Self::advanceable_stage(&order.status) else {
            warn!(id = %order.id, status = %order.status, "Cannot advance work order with unknown status");
            return Advance::Unchanged {
                order,
                reason: NoFurtherTransition::UnknownStatus,
            };
        };
        let Some(next) = StatusCatalog::all_stages().get(current.order + 1) else {
            debug!(id = %order.id, "Work order already completed");
            return Advance::Unchanged {
                order,
                reason: NoFurtherTransition::Terminal,
            };
        };

        let now = Utc::now();
        order.status_history.push(current.key.as_str().to_string());
        order.status = next.key.as_str().to_string();
        order.updated_at = now;
        if next.key == StatusCatalog::terminal_stage().key {
            order.completed_at = Some(now);
        }

        debug!(id = %order.id, from = %current.key, to = %next.key, "Advanced work order");
        Advance::Moved {
            order,
            from: current.key,
            to: next.key,
        }
    }
}
