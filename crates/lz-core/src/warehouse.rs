use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::engine::{Engine, TruckSpace};
use crate::entity::{Package, Truck};
use crate::error::LzResult;
use crate::id::{PackageId, TruckId};
use crate::registry::Registry;
use crate::report::Assignment;
use crate::snapshot::Snapshot;

/// Shared entry point for registering trucks and packages and assigning batches.
///
/// `Warehouse` is `Send + Sync`. Each [`Warehouse::assign_truck`] call holds
/// the registry's write lock from lookup to commit, so concurrent callers see
/// each other's assignments in full and can never load the same package twice.
/// Readers get a consistent point-in-time view.
#[derive(Debug, Default)]
pub struct Warehouse {
    registry: RwLock<Registry>,
    engine: Engine,
}

impl Warehouse {
    /// An empty warehouse with the default engine settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty warehouse with custom engine settings.
    pub fn with_config(config: EngineConfig) -> LzResult<Self> {
        Self::from_registry(Registry::new(), config)
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: Registry, config: EngineConfig) -> LzResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: RwLock::new(registry),
            engine: Engine::new(config),
        })
    }

    /// The engine settings in use.
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Register a truck. Returns its ID.
    pub fn create_truck(&self, length: f64, width: f64, height: f64) -> LzResult<TruckId> {
        self.write().create_truck(length, width, height)
    }

    /// Register a package. Returns its ID.
    pub fn create_package(&self, length: f64, width: f64, height: f64) -> LzResult<PackageId> {
        self.write().create_package(length, width, height)
    }

    /// Pick a truck for a batch of packages and load it.
    ///
    /// Fails on an empty batch, unknown, duplicate, or already loaded package
    /// ids; nothing is changed in that case. Finding no suitable truck is not
    /// an error: the result is [`Outcome::Deferred`](crate::Outcome::Deferred).
    #[instrument(skip(self, package_ids), fields(batch = package_ids.len()))]
    pub fn assign_truck(&self, package_ids: &[PackageId]) -> LzResult<Assignment> {
        let mut registry = self.write();

        let packages = registry.resolve_packages(package_ids)?;
        let trucks = TruckSpace::from_registry(&registry, self.engine.config().capacity)?;
        let decision = self.engine.decide(&packages, &trucks);

        if let Some(candidate) = decision.candidate() {
            registry.append_to_truck(candidate.truck, &candidate.assigned)?;
        }

        let assignment = Assignment::from_decision(decision, package_ids);
        info!(
            truck = ?assignment.truck,
            assigned = assignment.assigned.len(),
            deferred = assignment.deferred.len(),
            "{}",
            assignment.message()
        );
        Ok(assignment)
    }

    /// Copy of a truck record.
    pub fn truck(&self, id: TruckId) -> Option<Truck> {
        self.read().truck(id).cloned()
    }

    /// Copy of a package record.
    pub fn package(&self, id: PackageId) -> Option<Package> {
        self.read().package(id).cloned()
    }

    /// The truck a package is loaded on, if any.
    pub fn truck_of(&self, package: PackageId) -> Option<TruckId> {
        self.read().truck_of(package)
    }

    /// Consistent view of all trucks and waiting packages.
    pub fn snapshot(&self) -> LzResult<Snapshot> {
        Snapshot::capture(&self.read())
    }

    /// Run a closure against the registry under the read lock.
    pub fn with_registry<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.read())
    }

    // Every mutation validates before it touches state, so a poisoned lock
    // still guards a consistent registry.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}
