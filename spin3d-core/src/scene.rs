/// The rotating cube: fixed vertices turned into screen coordinates
use crate::error::Result;
use crate::geometry::Point3D;
use crate::projection::Projection;
use crate::transform::RotationState;

/// Unit cube centered at the origin. Back face first, then front face.
pub const CUBE_VERTICES: [Point3D; 8] = [
    Point3D::new(-1.0, 1.0, -1.0),
    Point3D::new(1.0, 1.0, -1.0),
    Point3D::new(1.0, -1.0, -1.0),
    Point3D::new(-1.0, -1.0, -1.0),
    Point3D::new(-1.0, 1.0, 1.0),
    Point3D::new(1.0, 1.0, 1.0),
    Point3D::new(1.0, -1.0, 1.0),
    Point3D::new(-1.0, -1.0, 1.0),
];

/// Integer pixel position on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// Owns the vertex set and derives screen points on demand.
#[derive(Debug, Clone)]
pub struct Scene {
    vertices: [Point3D; 8],
    projection: Projection,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            vertices: CUBE_VERTICES,
            projection: Projection::default(),
        }
    }

    pub fn vertices(&self) -> &[Point3D; 8] {
        &self.vertices
    }

    /// Rotate every vertex by `angles` (X, then Y, then Z) and project it.
    ///
    /// Coordinates are truncated toward zero, not rounded.
    pub fn compute_screen_points(
        &self,
        angles: &RotationState,
        width: u32,
        height: u32,
    ) -> Result<[ScreenPoint; 8]> {
        let mut points = [ScreenPoint { x: 0, y: 0 }; 8];
        for (slot, vertex) in points.iter_mut().zip(self.vertices.iter()) {
            let rotated = angles.apply(vertex);
            let projected = self.projection.project(&rotated, width, height)?;
            *slot = ScreenPoint {
                x: projected.x as i32,
                y: projected.y as i32,
            };
        }
        Ok(points)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
