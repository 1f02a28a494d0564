//! Caller-facing assignment results.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::engine::Decision;
use crate::id::{PackageId, TruckId};

/// Message used when no truck qualifies.
pub const DEFERRAL_MESSAGE: &str = "No suitable truck found, deferring to next day";

/// How a batch was handled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// No truck qualified; the whole batch waits.
    Deferred,
    /// The whole batch went onto one truck.
    FullAssigned {
        /// Fill percentage of the truck after loading.
        fill_percentage: f64,
    },
    /// Part of the batch went onto one truck.
    PartialAssigned {
        /// Number of packages loaded.
        assigned_count: usize,
        /// Number of packages left for a later run.
        deferred_count: usize,
        /// Fill percentage of the truck after loading.
        fill_percentage: f64,
    },
}

impl Outcome {
    /// Fill percentage of the chosen truck, if one was chosen.
    pub fn fill_percentage(&self) -> Option<f64> {
        match *self {
            Self::Deferred => None,
            Self::FullAssigned { fill_percentage }
            | Self::PartialAssigned {
                fill_percentage, ..
            } => Some(fill_percentage),
        }
    }
}

/// Result of one `assign_truck` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// The truck the packages were loaded on.
    pub truck: Option<TruckId>,
    /// Packages loaded, in the caller's order.
    pub assigned: Vec<PackageId>,
    /// Packages not loaded, in the caller's order.
    pub deferred: Vec<PackageId>,
    /// Summary of the decision.
    pub outcome: Outcome,
}

impl Assignment {
    /// Build the result for a batch from the engine's decision.
    ///
    /// `requested` is the batch as submitted; deferred packages keep its order.
    pub fn from_decision(decision: Decision, requested: &[PackageId]) -> Self {
        match decision {
            Decision::Full(c) => Self {
                truck: Some(c.truck),
                assigned: c.assigned,
                deferred: Vec::new(),
                outcome: Outcome::FullAssigned {
                    fill_percentage: c.fill_percentage,
                },
            },
            Decision::Partial(c) => {
                let taken: HashSet<PackageId> = c.assigned.iter().copied().collect();
                let deferred: Vec<PackageId> = requested
                    .iter()
                    .filter(|id| !taken.contains(id))
                    .copied()
                    .collect();
                Self {
                    truck: Some(c.truck),
                    outcome: Outcome::PartialAssigned {
                        assigned_count: c.assigned.len(),
                        deferred_count: deferred.len(),
                        fill_percentage: c.fill_percentage,
                    },
                    assigned: c.assigned,
                    deferred,
                }
            }
            Decision::Deferred => Self::deferred(requested),
        }
    }

    /// The whole batch waits for a later run.
    pub fn deferred(requested: &[PackageId]) -> Self {
        Self {
            truck: None,
            assigned: Vec::new(),
            deferred: requested.to_vec(),
            outcome: Outcome::Deferred,
        }
    }

    /// Human-readable status line.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// `(truck, assigned packages, message)`.
    pub fn into_triple(self) -> (Option<TruckId>, Vec<PackageId>, String) {
        let message = self.message();
        (self.truck, self.assigned, message)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(truck) = self.truck else {
            return f.write_str(DEFERRAL_MESSAGE);
        };
        match self.outcome {
            Outcome::Deferred => f.write_str(DEFERRAL_MESSAGE),
            Outcome::PartialAssigned {
                assigned_count,
                deferred_count,
                ..
            } if deferred_count > 0 => write!(
                f,
                "Assigned {assigned_count} packages to truck {truck}, {deferred_count} deferred"
            ),
            Outcome::FullAssigned { fill_percentage }
            | Outcome::PartialAssigned {
                fill_percentage, ..
            } => write!(
                f,
                "Assigned to truck {truck} with {fill_percentage:.2}% fill"
            ),
        }
    }
}
