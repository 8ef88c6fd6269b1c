use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// The eleven production stages of a work order.
///
/// Each order flows through: PAPER_PURCHASE → ... → COMPLETED.
/// Discriminants equal the stage's position in [`StatusCatalog`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    PaperPurchase,
    PaperReceived,
    InStorage,
    GuillotineFirstCut,
    OffsetPrinting,
    DieCutting,
    GuillotineFinalCut,
    WorkshopRevision,
    ReadyForDelivery,
    InDelivery,
    Completed,
}

impl StageKey {
    /// The persisted string form of the key.
    pub const fn as_str(self) -> &'static str {
        match self {
            StageKey::PaperPurchase => "paper_purchase",
            StageKey::PaperReceived => "paper_received",
            StageKey::InStorage => "in_storage",
            StageKey::GuillotineFirstCut => "guillotine_first_cut",
            StageKey::OffsetPrinting => "offset_printing",
            StageKey::DieCutting => "die_cutting",
            StageKey::GuillotineFinalCut => "guillotine_final_cut",
            StageKey::WorkshopRevision => "workshop_revision",
            StageKey::ReadyForDelivery => "ready_for_delivery",
            StageKey::InDelivery => "in_delivery",
            StageKey::Completed => "completed",
        }
    }

    /// Catalog entry for this key.
    pub fn stage(self) -> &'static Stage {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageKey {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCatalog::stage_by_key(s).map(|stage| stage.key)
    }
}

/// Display grouping for a stage. Only used to color badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    Gray,
    Blue,
    Purple,
    Orange,
    Indigo,
    Pink,
    Green,
    Teal,
    Yellow,
    Emerald,
}

/// A compiled-in lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub key: StageKey,
    /// Short label shown on badges.
    pub label: &'static str,
    pub category: StageCategory,
    /// Zero-based position in the lifecycle. The next stage has `order + 1`.
    pub order: usize,
}

impl Stage {
    const fn new(key: StageKey, label: &'static str, category: StageCategory) -> Self {
        Self {
            key,
            label,
            category,
            order: key as usize,
        }
    }
}

static CATALOG: [Stage; 11] = [
    Stage::new(StageKey::PaperPurchase, "Paper Purchase", StageCategory::Gray),
    Stage::new(StageKey::PaperReceived, "Paper Received", StageCategory::Blue),
    Stage::new(StageKey::InStorage, "In Storage", StageCategory::Purple),
    Stage::new(StageKey::GuillotineFirstCut, "First Cut", StageCategory::Orange),
    Stage::new(StageKey::OffsetPrinting, "Printing", StageCategory::Indigo),
    Stage::new(StageKey::DieCutting, "Die Cutting", StageCategory::Pink),
    Stage::new(StageKey::GuillotineFinalCut, "Final Cut", StageCategory::Orange),
    Stage::new(StageKey::WorkshopRevision, "Revision", StageCategory::Green),
    Stage::new(StageKey::ReadyForDelivery, "Ready", StageCategory::Teal),
    Stage::new(StageKey::InDelivery, "In Delivery", StageCategory::Yellow),
    Stage::new(StageKey::Completed, "Completed", StageCategory::Emerald),
];

/// Read-only access to the ordered stage list.
pub struct StatusCatalog;

impl StatusCatalog {
    /// Every stage, in lifecycle order.
    pub fn all_stages() -> &'static [Stage] {
        &CATALOG
    }

    /// Exact lookup by persisted key. Callers wanting a display fallback
    /// should go through `Navigator::current_stage_info` instead.
    pub fn stage_by_key(key: &str) -> Result<&'static Stage, LifecycleError> {
        CATALOG
            .iter()
            .find(|stage| stage.key.as_str() == key)
            .ok_or_else(|| LifecycleError::NotFound(key.to_string()))
    }

    /// Where every new order starts.
    pub fn first_stage() -> &'static Stage {
        &CATALOG[0]
    }

    /// The only stage without a successor.
    pub fn terminal_stage() -> &'static Stage {
        &CATALOG[CATALOG.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_eleven_stages_in_order() {
        let stages = StatusCatalog::all_stages();
        assert_eq!(stages.len(), 11);
        for (index, stage) in stages.iter().enumerate() {
            assert_eq!(stage.order, index, "{} out of place", stage.key);
        }
        assert_eq!(StatusCatalog::first_stage().key, StageKey::PaperPurchase);
        assert_eq!(StatusCatalog::terminal_stage().key, StageKey::Completed);
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<&str> = StatusCatalog::all_stages()
            .iter()
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(keys.len(), StatusCatalog::all_stages().len());
    }

    #[test]
    fn all_stages_is_stable_across_calls() {
        assert_eq!(StatusCatalog::all_stages(), StatusCatalog::all_stages());
    }

    #[test]
    fn stage_by_key_finds_every_entry() {
        for stage in StatusCatalog::all_stages() {
            let found = StatusCatalog::stage_by_key(stage.key.as_str()).unwrap();
            assert_eq!(found, stage);
            assert_eq!(stage.key.stage(), stage);
        }
    }

    #[test]
    fn stage_by_key_is_exact() {
        assert_eq!(
            StatusCatalog::stage_by_key("Paper_Purchase"),
            Err(LifecycleError::NotFound("Paper_Purchase".into()))
        );
        assert!(StatusCatalog::stage_by_key("").is_err());
        assert!(StatusCatalog::stage_by_key(" completed").is_err());
    }

    #[test]
    fn key_serializes_as_persisted_string() {
        for stage in StatusCatalog::all_stages() {
            let json = serde_json::to_string(&stage.key).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.key.as_str()));
            let parsed: StageKey = stage.key.as_str().parse().unwrap();
            assert_eq!(parsed, stage.key);
        }
    }

    #[test]
    fn labels_match_board_badges() {
        assert_eq!(StageKey::GuillotineFirstCut.stage().label, "First Cut");
        assert_eq!(StageKey::OffsetPrinting.stage().label, "Printing");
        assert_eq!(StageKey::ReadyForDelivery.stage().label, "Ready");
        assert_eq!(
            StageKey::GuillotineFinalCut.stage().category,
            StageCategory::Orange
        );
    }
}
