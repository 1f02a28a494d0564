//! JSON manifest: trucks, packages, and the batches to assign.

use std::path::Path;

use lz_core::{EngineConfig, PackageId, Warehouse};
use serde::Deserialize;

/// Dimensions of one truck or package as written in the manifest.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxSpec {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A planning run. Trucks and packages get ids 1, 2, ... in listed order;
/// batches refer to packages by those ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub settings: EngineConfig,
    #[serde(default)]
    pub trucks: Vec<BoxSpec>,
    #[serde(default)]
    pub packages: Vec<BoxSpec>,
    #[serde(default)]
    pub batches: Vec<Vec<u64>>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Self::parse(&text).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Parse manifest JSON.
    pub fn parse(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid manifest: {e}"))
    }

    /// Register every truck and package in a fresh warehouse.
    pub fn build(&self, config: EngineConfig) -> Result<Warehouse, String> {
        let warehouse = Warehouse::with_config(config).map_err(|e| e.to_string())?;
        for (i, t) in self.trucks.iter().enumerate() {
            warehouse
                .create_truck(t.length, t.width, t.height)
                .map_err(|e| format!("truck #{}: {e}", i + 1))?;
        }
        for (i, p) in self.packages.iter().enumerate() {
            warehouse
                .create_package(p.length, p.width, p.height)
                .map_err(|e| format!("package #{}: {e}", i + 1))?;
        }
        Ok(warehouse)
    }

    /// Batches as typed package ids.
    pub fn batches(&self) -> Vec<Vec<PackageId>> {
        self.batches
            .iter()
            .map(|b| b.iter().copied().map(PackageId::from).collect())
            .collect()
    }
}
