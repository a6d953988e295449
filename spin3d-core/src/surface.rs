/// The display collaborator consumed by the controller
use std::time::Duration;

use crate::color::Color;
use crate::error::Result;

/// Directional keys that drive the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Every key, in the order held keys are processed.
    pub const ALL: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    const fn bit(self) -> u8 {
        match self {
            Key::Up => 0b0001,
            Key::Down => 0b0010,
            Key::Left => 0b0100,
            Key::Right => 0b1000,
        }
    }
}

/// Set of currently held keys.
///
/// Iteration is always Up, Down, Left, Right regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySet(u8);

impl KeySet {
    pub const fn empty() -> Self {
        KeySet(0)
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(move |key| self.contains(*key))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// A window-like drawing target with input and pacing.
///
/// Backends create their window or screen in their constructor.
pub trait Surface {
    /// Viewport size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw a filled rectangle. Parts outside the viewport are clipped.
    fn fill_rect(&mut self, color: Color, x: i32, y: i32, w: u32, h: u32);

    /// Fill the whole viewport.
    fn fill(&mut self, color: Color) {
        let (w, h) = self.size();
        self.fill_rect(color, 0, 0, w, h);
    }

    /// Publish everything drawn since the last present.
    fn present(&mut self) -> Result<()>;

    /// Drain pending events and report whether a quit was requested.
    fn poll_quit(&mut self) -> Result<bool>;

    /// Directional keys held right now.
    fn pressed_keys(&mut self) -> Result<KeySet>;

    /// Block until the next frame boundary at `rate` ticks per second.
    /// Returns the time since the previous tick.
    fn tick(&mut self, rate: u32) -> Result<Duration>;
}
