//! Volume-based truck selection.
//!
//! Two strategies run in sequence. The full-batch fit looks for one truck
//! that takes the whole batch and ends up at least `fill_threshold` percent
//! full. If none exists, the partial fit walks the batch once per truck,
//! greedily taking every package that still fits, and keeps the truck with
//! the best resulting fill.
//!
//! Both strategies prefer the strictly highest fill percentage. Equal fills
//! keep the truck that was registered first.

use tracing::debug;

use crate::config::{CapacityMode, EngineConfig};
use crate::entity::Package;
use crate::error::LzResult;
use crate::id::{PackageId, TruckId};
use crate::registry::Registry;

/// A truck as the engine sees it: total volume and what is already on board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruckSpace {
    /// The truck this space belongs to.
    pub truck: TruckId,
    /// Total cargo volume.
    pub volume: f64,
    /// Volume already taken. Always 0 in [`CapacityMode::Nominal`].
    pub preloaded: f64,
}

impl TruckSpace {
    /// Volume still available for a new batch.
    pub fn free(&self) -> f64 {
        self.volume - self.preloaded
    }

    /// Fill percentage if `added` more volume were loaded.
    pub fn fill_with(&self, added: f64) -> f64 {
        (self.preloaded + added) / self.volume * 100.0
    }

    /// Snapshot every truck in the registry, in creation order.
    pub fn from_registry(registry: &Registry, mode: CapacityMode) -> LzResult<Vec<Self>> {
        registry
            .trucks()
            .map(|truck| {
                let preloaded = match mode {
                    CapacityMode::Nominal => 0.0,
                    CapacityMode::Residual => registry.loaded_volume(truck.id)?,
                };
                Ok(Self {
                    truck: truck.id,
                    volume: truck.volume(),
                    preloaded,
                })
            })
            .collect()
    }
}

/// A truck that qualified, with the packages it would take.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The chosen truck.
    pub truck: TruckId,
    /// Packages to load, in the caller's order.
    pub assigned: Vec<PackageId>,
    /// Fill percentage of the truck after loading.
    pub fill_percentage: f64,
}

/// What the engine decided for one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// One truck takes the whole batch.
    Full(Candidate),
    /// One truck takes part of the batch; the rest waits.
    Partial(Candidate),
    /// No truck reaches the fill threshold.
    Deferred,
}

impl Decision {
    /// The winning candidate, if any.
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Full(c) | Self::Partial(c) => Some(c),
            Self::Deferred => None,
        }
    }
}

/// The assignment engine. Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Try the full-batch fit, then the partial fit.
    pub fn decide(&self, packages: &[&Package], trucks: &[TruckSpace]) -> Decision {
        if let Some(candidate) = self.full_fit(packages, trucks) {
            return Decision::Full(candidate);
        }
        if let Some(candidate) = self.partial_fit(packages, trucks) {
            return Decision::Partial(candidate);
        }
        Decision::Deferred
    }

    /// Find the truck that takes the whole batch with the highest fill.
    pub fn full_fit(&self, packages: &[&Package], trucks: &[TruckSpace]) -> Option<Candidate> {
        let total: f64 = packages.iter().map(|p| p.volume()).sum();
        let mut best: Option<(TruckId, f64)> = None;

        for space in trucks {
            if total > space.free() {
                debug!(truck = %space.truck, total, free = space.free(), "full fit: batch too large");
                continue;
            }
            let fill = space.fill_with(total);
            debug!(truck = %space.truck, fill, "full fit: candidate");
            if fill >= self.config.fill_threshold && best.is_none_or(|(_, b)| fill > b) {
                best = Some((space.truck, fill));
            }
        }

        best.map(|(truck, fill_percentage)| Candidate {
            truck,
            assigned: packages.iter().map(|p| p.id).collect(),
            fill_percentage,
        })
    }

    /// Greedy single-pass fit: per truck, take each package that still fits.
    ///
    /// Packages are visited in the caller's order exactly once per truck. A
    /// package that does not fit is skipped and never reconsidered for that
    /// truck, even if smaller packages after it leave room.
    pub fn partial_fit(&self, packages: &[&Package], trucks: &[TruckSpace]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for space in trucks {
            let free = space.free();
            let mut current = 0.0;
            let mut assigned = Vec::new();
            for package in packages {
                let volume = package.volume();
                if current + volume <= free {
                    current += volume;
                    assigned.push(package.id);
                }
            }

            let fill = space.fill_with(current);
            debug!(
                truck = %space.truck,
                fill,
                taken = assigned.len(),
                "partial fit: candidate"
            );
            if assigned.is_empty() || fill < self.config.fill_threshold {
                continue;
            }
            if best.as_ref().is_none_or(|b| fill > b.fill_percentage) {
                best = Some(Candidate {
                    truck: space.truck,
                    assigned,
                    fill_percentage: fill,
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Dimensions;

    fn packages(volumes: &[f64]) -> Vec<Package> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Package::new(
                    PackageId(i as u64 + 1),
                    Dimensions::new(v, 1.0, 1.0).unwrap(),
                )
            })
            .collect()
    }

    fn spaces(volumes: &[f64]) -> Vec<TruckSpace> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &v)| TruckSpace {
                truck: TruckId(i as u64 + 1),
                volume: v,
                preloaded: 0.0,
            })
            .collect()
    }

    fn ids(raw: &[u64]) -> Vec<PackageId> {
        raw.iter().copied().map(PackageId).collect()
    }

    fn run(trucks: &[f64], volumes: &[f64]) -> Decision {
        let pkgs = packages(volumes);
        let refs: Vec<&Package> = pkgs.iter().collect();
        Engine::default().decide(&refs, &spaces(trucks))
    }

    #[test]
    fn full_fit_at_85_percent() {
        let decision = run(&[100.0], &[40.0, 45.0]);
        let Decision::Full(c) = decision else {
            panic!("expected full fit, got {decision:?}");
        };
        assert_eq!(c.truck, TruckId(1));
        assert_eq!(c.assigned, ids(&[1, 2]));
        assert!((c.fill_percentage - 85.0).abs() < 1e-9);
    }

    #[test]
    fn full_fit_at_90_percent() {
        let decision = run(&[100.0], &[70.0, 20.0]);
        assert!(matches!(decision, Decision::Full(ref c) if c.assigned == ids(&[1, 2])));
    }

    #[test]
    fn oversized_batch_below_threshold_is_deferred() {
        // 40 + 20 fit, 50 does not; 60% is below the threshold.
        assert_eq!(run(&[100.0], &[40.0, 20.0, 50.0]), Decision::Deferred);
    }

    #[test]
    fn highest_fill_beats_creation_order() {
        let decision = run(&[120.0, 100.0], &[60.0, 40.0]);
        assert_eq!(decision.candidate().unwrap().truck, TruckId(2));

        let decision = run(&[100.0, 120.0], &[60.0, 40.0]);
        assert_eq!(decision.candidate().unwrap().truck, TruckId(1));
    }

    #[test]
    fn equal_fill_keeps_first_truck() {
        let decision = run(&[100.0, 100.0, 100.0], &[90.0]);
        assert_eq!(decision.candidate().unwrap().truck, TruckId(1));
    }

    #[test]
    fn equal_partial_fill_keeps_first_truck() {
        // 120 overflows every truck; each one takes 50 + 40 for 90%.
        let decision = run(&[100.0, 100.0, 100.0], &[50.0, 40.0, 30.0]);
        let Decision::Partial(c) = decision else {
            panic!("expected partial fit, got {decision:?}");
        };
        assert_eq!(c.truck, TruckId(1));
        assert!((c.fill_percentage - 90.0).abs() < 1e-9);
    }

    #[test]
    fn exact_threshold_qualifies() {
        let decision = run(&[100.0], &[80.0]);
        assert!(matches!(decision, Decision::Full(_)));
    }

    #[test]
    fn below_threshold_full_fit_is_rejected() {
        // Fits, but only 50% full, and partial yields the same 50%.
        assert_eq!(run(&[100.0], &[50.0]), Decision::Deferred);
    }

    #[test]
    fn partial_fit_defers_leftovers() {
        let decision = run(&[100.0], &[50.0, 40.0, 30.0]);
        let Decision::Partial(c) = decision else {
            panic!("expected partial fit, got {decision:?}");
        };
        assert_eq!(c.assigned, ids(&[1, 2]));
        assert!((c.fill_percentage - 90.0).abs() < 1e-9);
    }

    #[test]
    fn partial_fit_never_retries_skipped_packages() {
        // 60 taken, 50 skipped, 30 taken.
        let decision = run(&[100.0], &[60.0, 50.0, 30.0]);
        let c = decision.candidate().unwrap();
        assert_eq!(c.assigned, ids(&[1, 3]));
    }

    #[test]
    fn partial_fit_does_not_reorder_by_size() {
        // After 10 + 70 the 40 no longer fits; the 15 behind it still does.
        let decision = run(&[100.0], &[10.0, 70.0, 40.0, 15.0]);
        let c = decision.candidate().unwrap();
        assert_eq!(c.assigned, ids(&[1, 2, 4]));
        assert!((c.fill_percentage - 95.0).abs() < 1e-9);
    }

    #[test]
    fn partial_fit_picks_best_truck() {
        let decision = run(&[100.0, 90.0], &[50.0, 40.0, 45.0]);
        // Truck 1: 50 + 40 = 90%. Truck 2: 50 + 40 = 100%.
        let c = decision.candidate().unwrap();
        assert_eq!(c.truck, TruckId(2));
        assert_eq!(c.assigned, ids(&[1, 2]));
    }

    #[test]
    fn no_trucks_means_deferred() {
        assert_eq!(run(&[], &[10.0]), Decision::Deferred);
    }

    #[test]
    fn residual_space_limits_the_batch() {
        let pkgs = packages(&[40.0, 45.0]);
        let refs: Vec<&Package> = pkgs.iter().collect();
        let trucks = [
            TruckSpace {
                truck: TruckId(1),
                volume: 100.0,
                preloaded: 50.0,
            },
            TruckSpace {
                truck: TruckId(2),
                volume: 100.0,
                preloaded: 0.0,
            },
        ];
        let engine = Engine::new(EngineConfig::new().with_capacity(CapacityMode::Residual));
        let decision = engine.decide(&refs, &trucks);
        // Truck 1 has 50 free: the full batch does not fit there.
        assert!(matches!(decision, Decision::Full(ref c) if c.truck == TruckId(2)));
    }

    #[test]
    fn residual_fill_counts_existing_load() {
        let pkgs = packages(&[30.0]);
        let refs: Vec<&Package> = pkgs.iter().collect();
        let trucks = [TruckSpace {
            truck: TruckId(1),
            volume: 100.0,
            preloaded: 60.0,
        }];
        let c = Engine::default().full_fit(&refs, &trucks).unwrap();
        assert!((c.fill_percentage - 90.0).abs() < 1e-9);
    }

    #[test]
    fn preloaded_truck_without_new_packages_never_qualifies() {
        let pkgs = packages(&[30.0]);
        let refs: Vec<&Package> = pkgs.iter().collect();
        let trucks = [TruckSpace {
            truck: TruckId(1),
            volume: 100.0,
            preloaded: 85.0,
        }];
        assert!(Engine::default().partial_fit(&refs, &trucks).is_none());
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let pkgs = packages(&[50.0]);
        let refs: Vec<&Package> = pkgs.iter().collect();
        let engine = Engine::new(EngineConfig::new().with_fill_threshold(50.0));
        assert!(matches!(
            engine.decide(&refs, &spaces(&[100.0])),
            Decision::Full(_)
        ));
    }
}
