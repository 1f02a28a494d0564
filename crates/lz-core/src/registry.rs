use std::collections::{BTreeMap, HashMap, HashSet};

use crate::entity::{Package, Truck};
use crate::error::{LzError, LzResult};
use crate::id::{IdGenerator, PackageId, TruckId};
use crate::shape::Dimensions;

/// In-memory store for trucks and packages. Owns all canonical state.
///
/// Ids are handed out monotonically, so the ordered maps iterate in creation
/// order. The engine relies on that order for tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    trucks: BTreeMap<TruckId, Truck>,
    packages: BTreeMap<PackageId, Package>,
    truck_ids: IdGenerator,
    package_ids: IdGenerator,

    // Index
    loaded_on: HashMap<PackageId, TruckId>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Register a truck with the given cargo space. Returns its ID.
    pub fn create_truck(&mut self, length: f64, width: f64, height: f64) -> LzResult<TruckId> {
        let dimensions = Dimensions::new(length, width, height)?;
        let id = TruckId(self.truck_ids.next());
        self.trucks.insert(id, Truck::new(id, dimensions));
        Ok(id)
    }

    /// Register a package with the given dimensions. Returns its ID.
    pub fn create_package(&mut self, length: f64, width: f64, height: f64) -> LzResult<PackageId> {
        let dimensions = Dimensions::new(length, width, height)?;
        let id = PackageId(self.package_ids.next());
        self.packages.insert(id, Package::new(id, dimensions));
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a truck by ID.
    pub fn truck(&self, id: TruckId) -> Option<&Truck> {
        self.trucks.get(&id)
    }

    /// Get a package by ID.
    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// All trucks in creation order.
    pub fn trucks(&self) -> impl Iterator<Item = &Truck> {
        self.trucks.values()
    }

    /// All packages in creation order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// The truck a package is loaded on, if any.
    pub fn truck_of(&self, package: PackageId) -> Option<TruckId> {
        self.loaded_on.get(&package).copied()
    }

    /// Packages not loaded on any truck, in creation order.
    pub fn unassigned_packages(&self) -> Vec<&Package> {
        self.packages
            .values()
            .filter(|p| !self.loaded_on.contains_key(&p.id))
            .collect()
    }

    /// Total volume of the packages loaded on a truck.
    pub fn loaded_volume(&self, id: TruckId) -> LzResult<f64> {
        let truck = self.trucks.get(&id).ok_or(LzError::UnknownTruck(id))?;
        Ok(truck
            .packages()
            .iter()
            .filter_map(|pid| self.packages.get(pid))
            .map(Package::volume)
            .sum())
    }

    /// Turn a batch of package IDs into package records, keeping the caller's order.
    ///
    /// Rejects empty batches, unknown ids, ids listed twice, and packages that
    /// already sit on a truck. Nothing is looked up for an empty batch.
    pub fn resolve_packages(&self, ids: &[PackageId]) -> LzResult<Vec<&Package>> {
        if ids.is_empty() {
            return Err(LzError::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let mut resolved = Vec::with_capacity(ids.len());
        for &id in ids {
            let package = self.packages.get(&id).ok_or(LzError::UnknownPackage(id))?;
            if !seen.insert(id) {
                return Err(LzError::DuplicatePackage(id));
            }
            if let Some(truck) = self.truck_of(id) {
                return Err(LzError::AlreadyAssigned { package: id, truck });
            }
            resolved.push(package);
        }
        Ok(resolved)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Load packages onto a truck, in the given order.
    ///
    /// Everything is validated before the first package is loaded, so a
    /// failure leaves the registry untouched.
    pub fn append_to_truck(&mut self, truck: TruckId, packages: &[PackageId]) -> LzResult<()> {
        if !self.trucks.contains_key(&truck) {
            return Err(LzError::UnknownTruck(truck));
        }
        let mut seen = HashSet::with_capacity(packages.len());
        for &id in packages {
            if !self.packages.contains_key(&id) {
                return Err(LzError::UnknownPackage(id));
            }
            if !seen.insert(id) {
                return Err(LzError::DuplicatePackage(id));
            }
            if let Some(holder) = self.truck_of(id) {
                return Err(LzError::AlreadyAssigned {
                    package: id,
                    truck: holder,
                });
            }
        }

        let Some(target) = self.trucks.get_mut(&truck) else {
            return Err(LzError::UnknownTruck(truck));
        };
        for &id in packages {
            target.load(id);
            self.loaded_on.insert(id, truck);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of registered trucks.
    pub fn truck_count(&self) -> usize {
        self.trucks.len()
    }

    /// Number of registered packages.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of packages loaded on some truck.
    pub fn assigned_count(&self) -> usize {
        self.loaded_on.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(trucks: &[f64], packages: &[f64]) -> Registry {
        let mut registry = Registry::new();
        for &v in trucks {
            registry.create_truck(v, 1.0, 1.0).unwrap();
        }
        for &v in packages {
            registry.create_package(v, 1.0, 1.0).unwrap();
        }
        registry
    }

    #[test]
    fn create_and_get() {
        let mut registry = Registry::new();
        let truck = registry.create_truck(10.0, 10.0, 1.0).unwrap();
        let package = registry.create_package(4.0, 10.0, 1.0).unwrap();

        assert_eq!(registry.truck(truck).unwrap().volume(), 100.0);
        assert_eq!(registry.package(package).unwrap().volume(), 40.0);
    }

    #[test]
    fn truck_and_package_ids_are_independent() {
        let mut registry = Registry::new();
        let truck = registry.create_truck(1.0, 1.0, 1.0).unwrap();
        let package = registry.create_package(1.0, 1.0, 1.0).unwrap();
        assert_eq!(truck.0, 1);
        assert_eq!(package.0, 1);
    }

    #[test]
    fn invalid_dimensions_create_nothing() {
        let mut registry = Registry::new();
        assert!(registry.create_truck(0.0, 1.0, 1.0).is_err());
        assert!(registry.create_package(1.0, -2.0, 1.0).is_err());
        assert_eq!(registry.truck_count(), 0);
        assert_eq!(registry.package_count(), 0);

        // A rejected creation does not burn an id.
        assert_eq!(registry.create_truck(1.0, 1.0, 1.0).unwrap(), TruckId(1));
    }

    #[test]
    fn trucks_iterate_in_creation_order() {
        let registry = registry_with(&[30.0, 10.0, 20.0], &[]);
        let ids: Vec<u64> = registry.trucks().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn resolve_preserves_caller_order() {
        let registry = registry_with(&[], &[1.0, 2.0, 3.0]);
        let resolved = registry
            .resolve_packages(&[PackageId(3), PackageId(1)])
            .unwrap();
        let ids: Vec<PackageId> = resolved.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PackageId(3), PackageId(1)]);
    }

    #[test]
    fn resolve_rejects_empty_input() {
        let registry = registry_with(&[], &[1.0]);
        assert_eq!(registry.resolve_packages(&[]).unwrap_err(), LzError::EmptyInput);
    }

    #[test]
    fn resolve_rejects_unknown_id() {
        let registry = registry_with(&[], &[1.0]);
        assert_eq!(
            registry
                .resolve_packages(&[PackageId(1), PackageId(9)])
                .unwrap_err(),
            LzError::UnknownPackage(PackageId(9))
        );
    }

    #[test]
    fn resolve_rejects_duplicates() {
        let registry = registry_with(&[], &[1.0]);
        assert_eq!(
            registry
                .resolve_packages(&[PackageId(1), PackageId(1)])
                .unwrap_err(),
            LzError::DuplicatePackage(PackageId(1))
        );
    }

    #[test]
    fn append_loads_and_indexes() {
        let mut registry = registry_with(&[100.0], &[40.0, 45.0]);
        registry
            .append_to_truck(TruckId(1), &[PackageId(2), PackageId(1)])
            .unwrap();

        let truck = registry.truck(TruckId(1)).unwrap();
        assert_eq!(truck.packages(), &[PackageId(2), PackageId(1)]);
        assert_eq!(registry.truck_of(PackageId(1)), Some(TruckId(1)));
        assert_eq!(registry.loaded_volume(TruckId(1)).unwrap(), 85.0);
        assert_eq!(registry.assigned_count(), 2);
        assert!(registry.unassigned_packages().is_empty());
    }

    #[test]
    fn append_to_unknown_truck_fails() {
        let mut registry = registry_with(&[], &[1.0]);
        assert_eq!(
            registry
                .append_to_truck(TruckId(5), &[PackageId(1)])
                .unwrap_err(),
            LzError::UnknownTruck(TruckId(5))
        );
        assert!(registry.truck_of(PackageId(1)).is_none());
    }

    #[test]
    fn append_is_all_or_nothing() {
        let mut registry = registry_with(&[100.0], &[10.0]);
        let result = registry.append_to_truck(TruckId(1), &[PackageId(1), PackageId(2)]);
        assert_eq!(result.unwrap_err(), LzError::UnknownPackage(PackageId(2)));
        assert!(registry.truck(TruckId(1)).unwrap().is_empty());
    }

    #[test]
    fn assigned_package_cannot_be_resolved_again() {
        let mut registry = registry_with(&[100.0, 100.0], &[10.0]);
        registry.append_to_truck(TruckId(1), &[PackageId(1)]).unwrap();

        assert_eq!(
            registry.resolve_packages(&[PackageId(1)]).unwrap_err(),
            LzError::AlreadyAssigned {
                package: PackageId(1),
                truck: TruckId(1)
            }
        );
        assert!(registry.append_to_truck(TruckId(2), &[PackageId(1)]).is_err());
    }
}
