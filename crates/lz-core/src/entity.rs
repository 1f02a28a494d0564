use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::{PackageId, TruckId};
use crate::shape::Dimensions;

/// A package waiting to be shipped. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    /// Unique identifier for this package.
    pub id: PackageId,
    /// Outer dimensions of the package.
    pub dimensions: Dimensions,
    /// Timestamp when the package was registered.
    pub created_at: DateTime<Utc>,
}

impl Package {
    /// Create a package with a pre-assigned ID.
    pub fn new(id: PackageId, dimensions: Dimensions) -> Self {
        Self {
            id,
            dimensions,
            created_at: Utc::now(),
        }
    }

    /// Volume of the package.
    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }
}

/// A truck and the packages loaded onto it, in loading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truck {
    /// Unique identifier for this truck.
    pub id: TruckId,
    /// Inner dimensions of the cargo space.
    pub dimensions: Dimensions,
    /// Timestamp when the truck was registered.
    pub created_at: DateTime<Utc>,
    packages: Vec<PackageId>,
}

impl Truck {
    /// Create an empty truck with a pre-assigned ID.
    pub fn new(id: TruckId, dimensions: Dimensions) -> Self {
        Self {
            id,
            dimensions,
            created_at: Utc::now(),
            packages: Vec::new(),
        }
    }

    /// Cargo volume of the truck.
    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    /// Packages loaded so far, oldest first.
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    /// True if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    // Only the registry loads trucks; it keeps the package index in sync.
    pub(crate) fn load(&mut self, package: PackageId) {
        self.packages.push(package);
    }
}
