use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::LifecycleError;

/// The closed set of machine types on the shop floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineCategory {
    OffsetPrinter,
    DieCutter,
    Guillotine,
    DigitalPrinter,
    PrePress,
    ManualWorkshop,
    Delivery,
}

impl MachineCategory {
    /// Every category, in the order the shop lists them.
    pub const ALL: [MachineCategory; 7] = [
        MachineCategory::OffsetPrinter,
        MachineCategory::DieCutter,
        MachineCategory::Guillotine,
        MachineCategory::DigitalPrinter,
        MachineCategory::PrePress,
        MachineCategory::ManualWorkshop,
        MachineCategory::Delivery,
    ];

    /// The persisted string form of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            MachineCategory::OffsetPrinter => "offset_printer",
            MachineCategory::DieCutter => "die_cutter",
            MachineCategory::Guillotine => "guillotine",
            MachineCategory::DigitalPrinter => "digital_printer",
            MachineCategory::PrePress => "pre_press",
            MachineCategory::ManualWorkshop => "manual_workshop",
            MachineCategory::Delivery => "delivery",
        }
    }

    /// Human-readable name for column headers.
    pub const fn label(self) -> &'static str {
        match self {
            MachineCategory::OffsetPrinter => "Offset Printer",
            MachineCategory::DieCutter => "Die Cutter",
            MachineCategory::Guillotine => "Guillotine",
            MachineCategory::DigitalPrinter => "Digital Printer",
            MachineCategory::PrePress => "Pre-Press",
            MachineCategory::ManualWorkshop => "Manual Workshop",
            MachineCategory::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for MachineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineCategory {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| LifecycleError::UnknownMachineCategory(s.to_string()))
    }
}

/// Operational state set by the supervisor, independent of any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    #[default]
    Idle,
    Running,
    Maintenance,
    Offline,
    /// A stored value this build does not recognize.
    Unknown,
}

impl MachineStatus {
    /// Only idle and running machines can serve an order.
    pub fn is_available(self) -> bool {
        matches!(self, MachineStatus::Idle | MachineStatus::Running)
    }
}

impl FromStr for MachineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(MachineStatus::Idle),
            "running" => Ok(MachineStatus::Running),
            "maintenance" => Ok(MachineStatus::Maintenance),
            "offline" => Ok(MachineStatus::Offline),
            "unknown" => Ok(MachineStatus::Unknown),
            other => Err(other.to_string()),
        }
    }
}

/// Unrecognized values load as [`MachineStatus::Unknown`] instead of
/// failing the whole record.
impl<'de> Deserialize<'de> for MachineStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|raw: String| {
            warn!(status = %raw, "Unrecognized machine status");
            MachineStatus::Unknown
        }))
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Idle => write!(f, "idle"),
            MachineStatus::Running => write!(f, "running"),
            MachineStatus::Maintenance => write!(f, "maintenance"),
            MachineStatus::Offline => write!(f, "offline"),
            MachineStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A machine as loaded from the shop's records.
///
/// `category` stays a raw string: rows with a type this build does not
/// know about still load and simply never serve an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Opaque unique identifier, a UUID v4 when generated here.
    #[serde(default = "new_id")]
    pub id: String,
    /// Name shown on the board, e.g. `Heidelberg SM 52`.
    pub name: String,
    /// Raw category key, see [`MachineCategory`].
    pub category: String,
    #[serde(default)]
    pub status: MachineStatus,
}

// Default id for machines loaded without one: a fresh UUID v4.
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Machine {
    /// Creates an idle machine of a known category.
    pub fn new(name: impl Into<String>, category: MachineCategory) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            category: category.as_str().to_string(),
            status: MachineStatus::Idle,
        }
    }

    /// Sets the operational status.
    pub fn with_status(mut self, status: MachineStatus) -> Self {
        self.status = status;
        self
    }

    /// The parsed category, or `None` for keys outside the closed set.
    pub fn category_kind(&self) -> Option<MachineCategory> {
        self.category.parse().ok()
    }

    /// Display label, falling back to the raw key for unknown categories.
    pub fn category_label(&self) -> &str {
        self.category_kind()
            .map(MachineCategory::label)
            .unwrap_or(self.category.as_str())
    }
}
