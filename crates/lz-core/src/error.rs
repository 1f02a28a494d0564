use crate::id::{PackageId, TruckId};

/// Alias for `Result<T, LzError>`.
pub type LzResult<T> = Result<T, LzError>;

/// Errors that can occur when registering entities or assigning packages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LzError {
    /// A dimension was zero, negative, NaN, or infinite.
    #[error("invalid dimension: {name} must be a positive number, got {value}")]
    InvalidDimension {
        /// Which dimension was rejected (`length`, `width`, or `height`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An assignment was requested without any package ids.
    #[error("no packages provided")]
    EmptyInput,

    /// The requested package ID does not exist in the registry.
    #[error("package not found: {0}")]
    UnknownPackage(PackageId),

    /// The requested truck ID does not exist in the registry.
    #[error("truck not found: {0}")]
    UnknownTruck(TruckId),

    /// The same package ID was listed more than once in one batch.
    #[error("package {0} listed more than once")]
    DuplicatePackage(PackageId),

    /// The package is already loaded on a truck.
    #[error("package {package} is already assigned to truck {truck}")]
    AlreadyAssigned {
        /// The package that was resubmitted.
        package: PackageId,
        /// The truck currently holding it.
        truck: TruckId,
    },

    /// Engine settings are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
