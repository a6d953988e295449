/// Background color and the fader that walks it toward random targets
use rand::Rng;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0RGB` form used by pixel framebuffers.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_u32(pixel: u32) -> Self {
        Self {
            r: (pixel >> 16) as u8,
            g: (pixel >> 8) as u8,
            b: pixel as u8,
        }
    }

    /// Sum of the channels, used to rank pixels by brightness.
    pub fn luminance(self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }
}

/// Moves a color one unit per channel per step toward a target.
pub struct ColorFader;

impl ColorFader {
    /// Nudge every channel of `current` by one toward `target`.
    ///
    /// Channels already equal to the target are left alone, so the result
    /// never overshoots and `step(c, c) == c`.
    pub fn step(current: Color, target: Color) -> Color {
        Color {
            r: nudge(current.r, target.r),
            g: nudge(current.g, target.g),
            b: nudge(current.b, target.b),
        }
    }

    /// A uniformly random color, each channel independent over 0..=255.
    pub fn next_target<R: Rng + ?Sized>(rng: &mut R) -> Color {
        Color {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

fn nudge(current: u8, target: u8) -> u8 {
    match current.cmp(&target) {
        std::cmp::Ordering::Less => current + 1,
        std::cmp::Ordering::Greater => current - 1,
        std::cmp::Ordering::Equal => current,
    }
}
