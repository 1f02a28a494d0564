use serde::Serialize;

use crate::error::LzResult;
use crate::id::{PackageId, TruckId};
use crate::registry::Registry;
use crate::shape::Dimensions;

/// Load state of one truck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckLoad {
    /// The truck.
    pub id: TruckId,
    /// Cargo space dimensions.
    pub dimensions: Dimensions,
    /// Cargo volume.
    pub volume: f64,
    /// Loaded packages, oldest first.
    pub packages: Vec<PackageId>,
    /// Sum of loaded package volumes.
    pub loaded_volume: f64,
    /// `loaded_volume / volume * 100`.
    pub fill_percentage: f64,
}

/// Point-in-time view of every truck and the packages still waiting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Trucks in creation order.
    pub trucks: Vec<TruckLoad>,
    /// Packages not on any truck, in creation order.
    pub unassigned: Vec<PackageId>,
    /// Number of registered packages.
    pub package_count: usize,
}

impl Snapshot {
    /// Capture the current state of a registry.
    pub fn capture(registry: &Registry) -> LzResult<Self> {
        let trucks = registry
            .trucks()
            .map(|truck| {
                let loaded_volume = registry.loaded_volume(truck.id)?;
                Ok(TruckLoad {
                    id: truck.id,
                    dimensions: truck.dimensions,
                    volume: truck.volume(),
                    packages: truck.packages().to_vec(),
                    loaded_volume,
                    fill_percentage: loaded_volume / truck.volume() * 100.0,
                })
            })
            .collect::<LzResult<Vec<_>>>()?;

        Ok(Self {
            trucks,
            unassigned: registry.unassigned_packages().iter().map(|p| p.id).collect(),
            package_count: registry.package_count(),
        })
    }

    /// Load state of one truck.
    pub fn truck(&self, id: TruckId) -> Option<&TruckLoad> {
        self.trucks.iter().find(|t| t.id == id)
    }
}
