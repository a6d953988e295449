/// Perspective projection parameters
use crate::error::Result;
use crate::geometry::Point3D;

/// Projection strength used for the cube.
pub const DEFAULT_FOV: f64 = 256.0;
/// Camera offset along Z. Keeps `viewer_distance + z` positive for the unit cube.
pub const DEFAULT_VIEWER_DISTANCE: f64 = 4.0;

/// Fixed perspective projection onto a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov: f64,
    pub viewer_distance: f64,
}

impl Projection {
    pub fn new(fov: f64, viewer_distance: f64) -> Self {
        Self {
            fov,
            viewer_distance,
        }
    }

    /// Project `point` onto a `width` x `height` viewport.
    pub fn project(&self, point: &Point3D, width: u32, height: u32) -> Result<Point3D> {
        point.project(width as f64, height as f64, self.fov, self.viewer_distance)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, DEFAULT_VIEWER_DISTANCE)
    }
}
