//! Core types for Lastzug: trucks, packages, and volume-based truck assignment.
//!
//! Packages are submitted in batches. For each batch the engine first looks
//! for a single truck that takes the whole batch and ends up well filled; if
//! there is none, it loads as much of the batch as fits onto the best truck
//! and defers the rest. Use [`Warehouse`] as the entry point, or drive a
//! [`Registry`] and [`Engine`] directly for single-threaded use.

/// Engine settings: fill threshold and capacity mode.
pub mod config;
/// The two-phase truck selection strategies.
pub mod engine;
/// Truck and package records.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Typed identifiers and the id generator.
pub mod id;
/// The in-memory store that owns trucks and packages.
pub mod registry;
/// Assignment results and status messages.
pub mod report;
/// Box dimensions and volume.
pub mod shape;
/// Serializable view of the registry state.
pub mod snapshot;
/// Thread-safe facade over registry and engine.
pub mod warehouse;

/// Re-export configuration types.
pub use config::{CapacityMode, EngineConfig};
/// Re-export engine types.
pub use engine::{Candidate, Decision, Engine, TruckSpace};
/// Re-export entity types.
pub use entity::{Package, Truck};
/// Re-export error types.
pub use error::{LzError, LzResult};
/// Re-export identifier types.
pub use id::{IdGenerator, PackageId, TruckId};
/// Re-export the registry.
pub use registry::Registry;
/// Re-export result types.
pub use report::{Assignment, Outcome};
/// Re-export dimension type.
pub use shape::Dimensions;
/// Re-export snapshot types.
pub use snapshot::{Snapshot, TruckLoad};
/// Re-export the warehouse facade.
pub use warehouse::Warehouse;
