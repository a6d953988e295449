/// spin3d Core Library - point rotation, projection and the frame loop
///
/// This library holds everything that does not touch a real display:
/// the point transforms, the cube scene, the background color fader and
/// the controller that drives them through a `Surface` implementation.

pub mod clock;
pub mod color;
pub mod controller;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use clock::FrameClock;
pub use color::{Color, ColorFader};
pub use controller::{Controller, State, DEFAULT_TICK_RATE};
pub use error::{Error, Result};
pub use framebuffer::Framebuffer;
pub use geometry::Point3D;
pub use projection::Projection;
pub use scene::{Scene, ScreenPoint, CUBE_VERTICES};
pub use surface::{Key, KeySet, Surface};
pub use transform::{Axis, RotationState};
