use crate::lifecycle::{StageKey, StatusCatalog};

use super::machine::MachineCategory;

/// Machine category → stages during which that machine works the order.
/// Categories absent from the table never serve any order.
pub type CorrelationTable = &'static [(MachineCategory, &'static [StageKey])];

static CORRELATIONS: CorrelationTable = &[
    (MachineCategory::OffsetPrinter, &[StageKey::OffsetPrinting]),
    (
        MachineCategory::Guillotine,
        &[StageKey::GuillotineFirstCut, StageKey::GuillotineFinalCut],
    ),
    (MachineCategory::DieCutter, &[StageKey::DieCutting]),
    (MachineCategory::ManualWorkshop, &[StageKey::WorkshopRevision]),
    (MachineCategory::Delivery, &[StageKey::InDelivery]),
];

/// Derives "which machine is working this order" from the order's status
/// alone. There is no persisted machine/order link behind it.
pub struct Correlator;

impl Correlator {
    /// The full compiled-in table, one row per serving category.
    pub fn correlation_table() -> CorrelationTable {
        CORRELATIONS
    }

    /// Stages served by `category`; empty for categories without a row.
    pub fn stages_served_by(category: MachineCategory) -> &'static [StageKey] {
        CORRELATIONS
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, stages)| *stages)
            .unwrap_or(&[])
    }

    /// Categories that work an order while it sits at `stage`.
    pub fn categories_serving(stage: StageKey) -> Vec<MachineCategory> {
        CORRELATIONS
            .iter()
            .filter(|(_, stages)| stages.contains(&stage))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Whether a machine of `machine_category` is the active station for
    /// an order whose stored status is `status`. Unknown categories and
    /// unknown statuses are never serving.
    pub fn is_serving(machine_category: &str, status: &str) -> bool {
        let Ok(category) = machine_category.parse::<MachineCategory>() else {
            return false;
        };
        let Ok(stage) = StatusCatalog::stage_by_key(status) else {
            return false;
        };
        Self::stages_served_by(category).contains(&stage.key)
    }
}
