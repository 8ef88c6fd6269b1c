mod board;
mod correlator;
mod machine;

pub use board::{BoardOptions, MachineActivity, MachineRow, ServedOrder, UtilizationBoard};
pub use correlator::{CorrelationTable, Correlator};
pub use machine::{Machine, MachineCategory, MachineStatus};
