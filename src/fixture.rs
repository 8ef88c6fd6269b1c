//! Snapshot of machines and work orders read from a JSON or TOML file,
//! used to render the utilization board from the command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OtflowError;
use crate::lifecycle::WorkOrder;
use crate::utilization::Machine;

/// Machines and work orders as exported from the shop's records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopSnapshot {
    #[serde(default)]
    pub machines: Vec<Machine>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
}

impl ShopSnapshot {
    /// Loads a snapshot, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, OtflowError> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&contents)?),
            Some("toml") => Ok(toml::from_str(&contents)?),
            _ => Err(OtflowError::UnsupportedFixture(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::lifecycle::StageKey;
    use crate::utilization::{MachineCategory, MachineStatus, UtilizationBoard};

    #[test]
    fn loads_toml_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[[machines]]
name = "Polar 115"
category = "guillotine"
status = "running"

[[work_orders]]
ot_number = "OT-55"
client_name = "Libreria Central"
quantity = 2000
priority = 2
status = "guillotine_first_cut"
created_at = "2026-10-01T08:00:00Z"
"#
        )
        .unwrap();

        let snapshot = ShopSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.machines.len(), 1);
        assert_eq!(
            snapshot.machines[0].category_kind(),
            Some(MachineCategory::Guillotine)
        );
        assert_eq!(snapshot.work_orders[0].status, "guillotine_first_cut");
        assert_eq!(snapshot.work_orders[0].priority, 2);
    }

    #[test]
    fn loads_json_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(
            &path,
            r#"{"work_orders":[{"ot_number":"OT-1","client_name":"Acme","status":"in_delivery"}]}"#,
        )
        .unwrap();

        let snapshot = ShopSnapshot::load(&path).unwrap();
        assert!(snapshot.machines.is_empty());
        assert_eq!(snapshot.work_orders[0].ot_number, "OT-1");
    }

    #[test]
    fn snapshot_with_skewed_values_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(
            &path,
            r#"{
                "machines": [
                    {"name": "Polar 115", "category": "guillotine", "status": "retired"}
                ],
                "work_orders": [
                    {
                        "ot_number": "OT-77",
                        "client_name": "Acme",
                        "status": "guillotine_first_cut",
                        "status_history": ["paper_purchase", "paper_checked", "in_storage"]
                    }
                ]
            }"#,
        )
        .unwrap();

        let snapshot = ShopSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.machines[0].status, MachineStatus::Unknown);
        let order = &snapshot.work_orders[0];
        assert_eq!(order.status_history[1], "paper_checked");
        assert_eq!(order.stage().key, StageKey::GuillotineFirstCut);

        let board = UtilizationBoard::build(
            &snapshot.machines,
            &snapshot.work_orders,
            Default::default(),
        );
        assert!(board.serving().next().is_none());
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.yaml");
        std::fs::write(&path, "machines: []").unwrap();
        assert!(matches!(
            ShopSnapshot::load(&path),
            Err(OtflowError::UnsupportedFixture(_))
        ));
    }
}
