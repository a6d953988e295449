/// Software pixel buffer shared by the display backends
use crate::color::Color;

/// `width * height` pixels in packed `0RGB` form, row-major.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_u32(self.pixels[y * self.width + x]))
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    /// Fill a rectangle, clipped to the buffer. Off-buffer parts are dropped.
    pub fn fill_rect(&mut self, color: Color, x: i32, y: i32, w: u32, h: u32) {
        let x0 = (x as i64).clamp(0, self.width as i64) as usize;
        let y0 = (y as i64).clamp(0, self.height as i64) as usize;
        let x1 = (x as i64 + w as i64).clamp(0, self.width as i64) as usize;
        let y1 = (y as i64 + h as i64).clamp(0, self.height as i64) as usize;

        let value = color.to_u32();
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(value);
        }
    }
}
