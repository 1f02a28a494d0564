use serde::Serialize;

use crate::error::{LzError, LzResult};

/// Outer dimensions of a rectangular box.
///
/// Every field, and the volume they span, is guaranteed finite and strictly
/// positive once constructed through [`Dimensions::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    length: f64,
    width: f64,
    height: f64,
}

impl Dimensions {
    /// Validate and build a set of dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> LzResult<Self> {
        check("length", length)?;
        check("width", width)?;
        check("height", height)?;
        let dims = Self {
            length,
            width,
            height,
        };
        // Tiny or huge sides can still underflow to 0 or overflow to inf.
        check("volume", dims.volume())?;
        Ok(dims)
    }

    /// Length of the box.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `length * width * height`.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

fn check(name: &'static str, value: f64) -> LzResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LzError::InvalidDimension { name, value })
    }
}
