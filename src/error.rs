use thiserror::Error;

/// Errors raised by strict catalog and category lookups.
///
/// The lenient entry points (`Navigator::current_stage_info`,
/// `Correlator::is_serving`) never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Stage not found: {0}")]
    NotFound(String),

    #[error("Unknown machine category: {0}")]
    UnknownMachineCategory(String),
}

/// Errors raised by a [`StatusStore`](crate::store::StatusStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Work order not found: {0}")]
    WorkOrderNotFound(String),

    #[error("Work order {id} changed status: expected {expected:?}, found {actual:?}")]
    StaleStatus {
        id: String,
        expected: String,
        actual: String,
    },
}

/// Application-level error for loading snapshots and running commands.
#[derive(Debug, Error)]
pub enum OtflowError {
    #[error("Unsupported fixture format: {0} (expected .json or .toml)")]
    UnsupportedFixture(String),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
