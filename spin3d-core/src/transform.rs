/// Accumulated rotation angles and their matrix form
use nalgebra::{Rotation3, Vector3};

use crate::geometry::Point3D;

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation state around three axes (in degrees)
///
/// Angles are never wrapped; the trigonometry is periodic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Add `delta` degrees to one axis.
    pub fn increment(&mut self, axis: Axis, delta: f64) {
        match axis {
            Axis::X => self.x += delta,
            Axis::Y => self.y += delta,
            Axis::Z => self.z += delta,
        }
    }

    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Apply the rotations to `point`: X first, then Y, then Z.
    pub fn apply(&self, point: &Point3D) -> Point3D {
        point.rotate_x(self.x).rotate_y(self.y).rotate_z(self.z)
    }

    /// The same composition as `apply`, as a single matrix (Rz * Ry * Rx).
    pub fn matrix(&self) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z.to_radians());

        rz * ry * rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state, RotationState::new(0.0, 0.0, 0.0));

        state.increment(Axis::X, 1.0);
        state.increment(Axis::Y, -1.0);
        state.increment(Axis::Y, -1.0);
        assert_eq!(state.angle(Axis::X), 1.0);
        assert_eq!(state.angle(Axis::Y), -2.0);
        assert_eq!(state.angle(Axis::Z), 0.0);
    }

    #[test]
    fn test_unbounded_angles() {
        let mut state = RotationState::zero();
        for _ in 0..1000 {
            state.increment(Axis::X, 1.0);
        }
        assert_eq!(state.x, 1000.0);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = RotationState::zero().matrix();
        assert!((matrix.matrix() - nalgebra::Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_matrix_matches_axis_chain() {
        let state = RotationState::new(30.0, -75.0, 110.0);
        let p = Point3D::new(-1.0, 1.0, -1.0);

        let chained = state.apply(&p);
        let via_matrix = Point3D::from(state.matrix() * Point3::<f64>::from(p));

        assert!((chained.x - via_matrix.x).abs() < 1e-9);
        assert!((chained.y - via_matrix.y).abs() < 1e-9);
        assert!((chained.z - via_matrix.z).abs() < 1e-9);
    }

    #[test]
    fn test_order_is_significant() {
        let p = Point3D::new(1.0, 1.0, 1.0);
        let xyz = RotationState::new(90.0, 90.0, 0.0).apply(&p);
        let yx = p.rotate_y(90.0).rotate_x(90.0);
        assert!((xyz.x - yx.x).abs() > 1e-6 || (xyz.y - yx.y).abs() > 1e-6);
    }
}
