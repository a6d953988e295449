/// Point primitive with per-axis rotation and perspective projection
use nalgebra::Point3;
use std::f64::consts::PI;

use crate::error::{Error, Result};

/// An immutable point in 3D space.
///
/// Every transform returns a fresh point and leaves `self` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate around the X axis by `angle` degrees. `x` is unchanged.
    pub fn rotate_x(&self, angle: f64) -> Self {
        let (sina, cosa) = radians(angle).sin_cos();
        Self {
            x: self.x,
            y: self.y * cosa - self.z * sina,
            z: self.y * sina + self.z * cosa,
        }
    }

    /// Rotate around the Y axis by `angle` degrees. `y` is unchanged.
    pub fn rotate_y(&self, angle: f64) -> Self {
        let (sina, cosa) = radians(angle).sin_cos();
        Self {
            x: self.z * sina + self.x * cosa,
            y: self.y,
            z: self.z * cosa - self.x * sina,
        }
    }

    /// Rotate around the Z axis by `angle` degrees. `z` is unchanged.
    pub fn rotate_z(&self, angle: f64) -> Self {
        let (sina, cosa) = radians(angle).sin_cos();
        Self {
            x: self.x * cosa - self.y * sina,
            y: self.x * sina + self.y * cosa,
            z: self.z,
        }
    }

    /// Perspective-project onto a `width` x `height` view.
    ///
    /// The result is a 2D point in screen space with `z` flattened to 1.
    /// Screen `y` grows downwards, so the world `y` is negated.
    pub fn project(&self, width: f64, height: f64, fov: f64, viewer_distance: f64) -> Result<Self> {
        let depth = viewer_distance + self.z;
        if depth == 0.0 {
            return Err(Error::DegenerateProjection { depth });
        }

        let factor = fov / depth;
        Ok(Self {
            x: self.x * factor + width / 2.0,
            y: -self.y * factor + height / 2.0,
            z: 1.0,
        })
    }
}

fn radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

impl From<Point3<f64>> for Point3D {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Point3D> for Point3<f64> {
    fn from(p: Point3D) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}
