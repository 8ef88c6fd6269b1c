//! Compare-and-swap boundary between the navigator and whatever stores
//! work orders.
//!
//! The navigator only computes the next value from a snapshot. Two
//! supervisors pressing "Next" on the same order must not both move it,
//! so [`advance_stored`] writes only when the stored status still equals
//! the status the user acted on.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::lifecycle::{Advance, Navigator, WorkOrder};

/// The persistence collaborator, reduced to what advancing needs.
pub trait StatusStore {
    /// Returns the last written version of order `id`.
    fn load(&self, id: &str) -> Result<WorkOrder, StoreError>;

    /// Copies the lifecycle fields of `advanced` (`status`,
    /// `status_history`, `updated_at`, `completed_at`) onto the stored
    /// order, only if its status is still `expected_status`. Other fields
    /// keep their stored values. Returns the order as stored after the
    /// write. Must be atomic with respect to other writers.
    fn compare_and_set(
        &self,
        id: &str,
        expected_status: &str,
        advanced: &WorkOrder,
    ) -> Result<WorkOrder, StoreError>;
}

/// In-process [`StatusStore`] backed by a locked map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<String, WorkOrder>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an order, keyed by its id.
    pub fn insert(&self, order: WorkOrder) {
        self.orders
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(order.id.clone(), order);
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether the store holds no orders.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StatusStore for MemoryStore {
    fn load(&self, id: &str) -> Result<WorkOrder, StoreError> {
        self.orders
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::WorkOrderNotFound(id.to_string()))
    }

    fn compare_and_set(
        &self,
        id: &str,
        expected_status: &str,
        advanced: &WorkOrder,
    ) -> Result<WorkOrder, StoreError> {
        let mut orders = self.orders.write().unwrap_or_else(|e| e.into_inner());
        let current = orders
            .get_mut(id)
            .ok_or_else(|| StoreError::WorkOrderNotFound(id.to_string()))?;
        if current.status != expected_status {
            return Err(StoreError::StaleStatus {
                id: id.to_string(),
                expected: expected_status.to_string(),
                actual: current.status.clone(),
            });
        }
        current.status.clone_from(&advanced.status);
        current.status_history.clone_from(&advanced.status_history);
        current.updated_at = advanced.updated_at;
        current.completed_at = advanced.completed_at;
        Ok(current.clone())
    }
}

/// Advances the stored order `id` from `seen_status`, the status the
/// caller displayed when the user asked to advance.
///
/// Fails with [`StoreError::StaleStatus`] if the stored status differs
/// from `seen_status`, before or during the write. A lost race is never
/// retried. `Advance::Unchanged` outcomes are returned without writing.
/// A moved outcome carries the order as stored, including edits other
/// writers made to non-lifecycle fields since the load.
pub fn advance_stored<S>(store: &S, id: &str, seen_status: &str) -> Result<Advance, StoreError>
where
    S: StatusStore + ?Sized,
{
    let snapshot = store.load(id)?;
    if snapshot.status != seen_status {
        debug!(id, seen_status, stored = %snapshot.status, "Work order moved since it was displayed");
        return Err(StoreError::StaleStatus {
            id: id.to_string(),
            expected: seen_status.to_string(),
            actual: snapshot.status,
        });
    }

    match Navigator::advance(snapshot) {
        Advance::Moved { order, from, to } => {
            match store.compare_and_set(id, seen_status, &order) {
                Ok(stored) => Ok(Advance::Moved {
                    order: stored,
                    from,
                    to,
                }),
                Err(err) => {
                    warn!(id, %from, %to, error = %err, "Lost advance race");
                    Err(err)
                }
            }
        }
        unchanged => Ok(unchanged),
    }
}
