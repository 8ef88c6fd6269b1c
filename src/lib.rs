//! Linear lifecycle engine for print-shop work orders ("OTs").
//!
//! [`lifecycle`] holds the stage catalog and the navigator that moves an
//! order one stage forward. [`utilization`] correlates machine categories
//! with order stages to show what each machine is working on. [`store`]
//! wraps an advance in a compare-and-swap against stored orders.

pub mod config;
pub mod error;
pub mod fixture;
pub mod lifecycle;
pub mod store;
pub mod telemetry;
pub mod utilization;

pub use error::{LifecycleError, OtflowError, StoreError};
pub use lifecycle::{
    Advance, Navigator, NoFurtherTransition, Stage, StageCategory, StageKey, StatusCatalog,
    WorkOrder, board_order,
};
pub use store::{MemoryStore, StatusStore, advance_stored};
pub use utilization::{
    BoardOptions, Correlator, Machine, MachineCategory, MachineStatus, UtilizationBoard,
};
