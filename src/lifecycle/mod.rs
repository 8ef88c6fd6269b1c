mod navigator;
mod stage;
mod work_order;

pub use navigator::{Advance, NoFurtherTransition, Navigator};
pub use stage::{Stage, StageCategory, StageKey, StatusCatalog};
pub use work_order::{WorkOrder, board_cmp, board_order};
