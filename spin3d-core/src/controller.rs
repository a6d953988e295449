/// The per-tick loop tying input, rotation, color and drawing together
use log::{debug, info, trace};
use rand::Rng;

use crate::color::{Color, ColorFader};
use crate::error::Result;
use crate::scene::Scene;
use crate::surface::{Key, Surface};
use crate::transform::{Axis, RotationState};

/// Ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 50;

/// Background color before any fading.
pub const START_COLOR: Color = Color::RED;

/// Side of the square stamped at each vertex, in pixels.
const POINT_SIZE: u32 = 2;

/// Degrees turned per held key per tick.
const ROTATION_STEP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Terminated,
}

/// Owns the surface, the rotation and both background colors.
pub struct Controller<S, R> {
    surface: S,
    rng: R,
    scene: Scene,
    rotation: RotationState,
    background: Color,
    target: Color,
    tick_rate: u32,
    state: State,
}

impl<S: Surface, R: Rng> Controller<S, R> {
    /// Create the controller and draw the first frame at angles (0, 0, 0).
    pub fn new(surface: S, rng: R) -> Result<Self> {
        Self::with_tick_rate(surface, rng, DEFAULT_TICK_RATE)
    }

    pub fn with_tick_rate(surface: S, mut rng: R, tick_rate: u32) -> Result<Self> {
        let target = ColorFader::next_target(&mut rng);
        let mut controller = Self {
            surface,
            rng,
            scene: Scene::new(),
            rotation: RotationState::zero(),
            background: START_COLOR,
            target,
            tick_rate,
            state: State::Running,
        };

        debug!("initial fade target {:?}", controller.target);
        controller.redraw()?;
        Ok(controller)
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run ticks until the surface reports a quit.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == State::Running {}
        Ok(())
    }

    /// Run a single tick.
    pub fn step(&mut self) -> Result<State> {
        if self.state == State::Terminated {
            return Ok(self.state);
        }

        if self.surface.poll_quit()? {
            info!("quit requested");
            self.state = State::Terminated;
            return Ok(self.state);
        }

        self.surface.tick(self.tick_rate)?;

        if self.background == self.target {
            self.target = ColorFader::next_target(&mut self.rng);
            debug!("new fade target {:?}", self.target);
        }

        // Every held key gets its own rotate, fade and present, even when
        // several are held in the same tick.
        let keys = self.surface.pressed_keys()?;
        for key in keys.iter() {
            let (axis, delta) = rotation_for(key);
            self.rotation.increment(axis, delta);
            self.background = ColorFader::step(self.background, self.target);
            self.redraw()?;
        }

        Ok(self.state)
    }

    fn redraw(&mut self) -> Result<()> {
        let (width, height) = self.surface.size();
        let points = self
            .scene
            .compute_screen_points(&self.rotation, width, height)?;

        self.surface.fill(self.background);
        for point in &points {
            self.surface
                .fill_rect(Color::WHITE, point.x, point.y, POINT_SIZE, POINT_SIZE);
        }
        trace!(
            "frame at ({}, {}, {}) on {:?}",
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.background
        );

        self.surface.present()
    }
}

fn rotation_for(key: Key) -> (Axis, f64) {
    match key {
        Key::Up => (Axis::X, ROTATION_STEP),
        Key::Down => (Axis::X, -ROTATION_STEP),
        Key::Left => (Axis::Y, ROTATION_STEP),
        Key::Right => (Axis::Y, -ROTATION_STEP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::surface::KeySet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// In-memory surface replaying one `KeySet` per tick, then quitting.
    struct ScriptedSurface {
        framebuffer: Framebuffer,
        script: VecDeque<KeySet>,
        presents: usize,
        tick_rates: Vec<u32>,
    }

    impl ScriptedSurface {
        fn new(script: Vec<KeySet>) -> Self {
            Self {
                framebuffer: Framebuffer::new(640, 480),
                script: script.into(),
                presents: 0,
                tick_rates: Vec::new(),
            }
        }
    }

    impl Surface for ScriptedSurface {
        fn size(&self) -> (u32, u32) {
            (
                self.framebuffer.width() as u32,
                self.framebuffer.height() as u32,
            )
        }

        fn fill_rect(&mut self, color: Color, x: i32, y: i32, w: u32, h: u32) {
            self.framebuffer.fill_rect(color, x, y, w, h);
        }

        fn present(&mut self) -> Result<()> {
            self.presents += 1;
            Ok(())
        }

        fn poll_quit(&mut self) -> Result<bool> {
            Ok(self.script.is_empty())
        }

        fn pressed_keys(&mut self) -> Result<KeySet> {
            Ok(self.script.pop_front().unwrap_or_default())
        }

        fn tick(&mut self, rate: u32) -> Result<Duration> {
            self.tick_rates.push(rate);
            Ok(Duration::ZERO)
        }
    }

    fn held(keys: &[Key]) -> KeySet {
        keys.iter().copied().collect()
    }

    fn controller(script: Vec<KeySet>) -> Controller<ScriptedSurface, StdRng> {
        Controller::new(ScriptedSurface::new(script), StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn test_initial_frame() {
        let c = controller(vec![]);
        let fb = &c.surface().framebuffer;

        assert_eq!(c.surface().presents, 1);
        assert_eq!(c.background(), Color::RED);
        assert_eq!(fb.pixel(0, 0), Some(Color::RED));
        // Vertex (-1, 1, -1) lands at (234, 154) with a 2x2 stamp.
        assert_eq!(fb.pixel(234, 154), Some(Color::WHITE));
        assert_eq!(fb.pixel(235, 155), Some(Color::WHITE));
        assert_eq!(fb.pixel(236, 154), Some(Color::RED));
    }

    #[test]
    fn test_holding_up_adds_one_degree_per_tick() {
        let n = 37;
        let mut c = controller(vec![held(&[Key::Up]); n]);
        c.run().unwrap();

        assert_eq!(c.rotation().x, n as f64);
        assert_eq!(c.rotation().y, 0.0);
        assert_eq!(c.rotation().z, 0.0);
        assert_eq!(c.surface().presents, 1 + n);
        assert_eq!(c.state(), State::Terminated);
    }

    #[test]
    fn test_key_directions() {
        let mut c = controller(vec![
            held(&[Key::Down]),
            held(&[Key::Down]),
            held(&[Key::Left]),
            held(&[Key::Right]),
            held(&[Key::Right]),
        ]);
        c.run().unwrap();
        assert_eq!(*c.rotation(), RotationState::new(-2.0, -1.0, 0.0));
    }

    #[test]
    fn test_each_held_key_redraws() {
        let mut c = controller(vec![held(&[Key::Up, Key::Down, Key::Left, Key::Right])]);
        let start = c.background();
        let target = c.target();

        assert_eq!(c.step().unwrap(), State::Running);
        assert_eq!(c.surface().presents, 1 + 4);
        assert_eq!(*c.rotation(), RotationState::zero());

        let mut expected = start;
        for _ in 0..4 {
            expected = ColorFader::step(expected, target);
        }
        assert_eq!(c.background(), expected);
    }

    #[test]
    fn test_idle_tick_does_not_redraw() {
        let mut c = controller(vec![KeySet::empty(), KeySet::empty()]);
        c.run().unwrap();
        assert_eq!(c.surface().presents, 1);
        assert_eq!(c.background(), Color::RED);
        assert_eq!(c.surface().tick_rates, vec![DEFAULT_TICK_RATE; 2]);
    }

    #[test]
    fn test_quit_stops_before_ticking() {
        let mut c = controller(vec![]);
        assert_eq!(c.step().unwrap(), State::Terminated);
        assert_eq!(c.step().unwrap(), State::Terminated);
        assert!(c.surface().tick_rates.is_empty());
    }

    #[test]
    fn test_new_target_when_reached() {
        let mut c = controller(vec![KeySet::empty()]);
        c.target = c.background;
        let reached = c.target;

        c.step().unwrap();
        assert_ne!(c.target(), reached);
    }

    #[test]
    fn test_redraw_uses_rotated_points() {
        let mut c = controller(vec![held(&[Key::Left])]);
        c.step().unwrap();

        let expected = Scene::new()
            .compute_screen_points(&RotationState::new(0.0, 1.0, 0.0), 640, 480)
            .unwrap();
        let fb = &c.surface().framebuffer;
        for p in expected {
            assert_eq!(fb.pixel(p.x as usize, p.y as usize), Some(Color::WHITE));
        }
    }
}
