use serde::Serialize;

use crate::lifecycle::{StageKey, WorkOrder, board_cmp};

use super::correlator::Correlator;
use super::machine::{Machine, MachineStatus};

/// Knobs for [`UtilizationBoard::build`], usually taken from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOptions {
    /// Keep machines that serve nothing on the board.
    pub include_idle_machines: bool,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            include_idle_machines: true,
        }
    }
}

/// An order as it appears in a machine's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServedOrder {
    pub id: String,
    pub ot_number: String,
    pub client_name: String,
    pub priority: i32,
    /// The catalog stage the order is at; always one the machine serves.
    pub stage: StageKey,
}

impl From<&WorkOrder> for ServedOrder {
    fn from(order: &WorkOrder) -> Self {
        Self {
            id: order.id.clone(),
            ot_number: order.ot_number.clone(),
            client_name: order.client_name.clone(),
            priority: order.priority,
            stage: order.stage().key,
        }
    }
}

/// What a machine is doing, as shown in its board row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MachineActivity {
    /// At least one active order sits at a stage this machine serves.
    Serving { orders: Vec<ServedOrder> },
    Idle,
    /// Down for maintenance, offline or in an unrecognized state.
    Unavailable { status: MachineStatus },
}

/// One machine and its activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineRow {
    pub machine_id: String,
    pub machine_name: String,
    /// Raw category key as stored on the machine.
    pub category: String,
    pub activity: MachineActivity,
}

/// "What is each machine doing right now", derived from order statuses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UtilizationBoard {
    pub rows: Vec<MachineRow>,
}

impl UtilizationBoard {
    /// Pairs every machine with the active orders it is serving.
    ///
    /// Orders within a row keep board order (priority, then newest).
    /// Machines down for maintenance or offline serve nothing.
    pub fn build(machines: &[Machine], orders: &[WorkOrder], options: BoardOptions) -> Self {
        let mut active: Vec<&WorkOrder> = orders.iter().filter(|o| o.is_active()).collect();
        active.sort_by(|a, b| board_cmp(a, b));

        let rows = machines
            .iter()
            .filter_map(|machine| {
                let activity = if !machine.status.is_available() {
                    MachineActivity::Unavailable {
                        status: machine.status,
                    }
                } else {
                    let served: Vec<ServedOrder> = active
                        .iter()
                        .filter(|o| Correlator::is_serving(&machine.category, &o.status))
                        .map(|o| ServedOrder::from(*o))
                        .collect();
                    if served.is_empty() {
                        MachineActivity::Idle
                    } else {
                        MachineActivity::Serving { orders: served }
                    }
                };

                if activity == MachineActivity::Idle && !options.include_idle_machines {
                    return None;
                }
                Some(MachineRow {
                    machine_id: machine.id.clone(),
                    machine_name: machine.name.clone(),
                    category: machine.category.clone(),
                    activity,
                })
            })
            .collect();

        Self { rows }
    }

    /// Rows whose machine is serving at least one order.
    pub fn serving(&self) -> impl Iterator<Item = &MachineRow> {
        self.rows
            .iter()
            .filter(|row| matches!(row.activity, MachineActivity::Serving { .. }))
    }

    /// Rows whose machine is available but serving nothing.
    pub fn idle(&self) -> impl Iterator<Item = &MachineRow> {
        self.rows
            .iter()
            .filter(|row| row.activity == MachineActivity::Idle)
    }
}
