/// Window backend: a minifb window showing the software framebuffer
use log::debug;
use minifb::{Key as WindowKey, Window, WindowOptions};
use spin3d_core::{Color, Error, FrameClock, Framebuffer, Key, KeySet, Result, Surface};
use std::time::Duration;

pub mod logging;

pub const WINDOW_TITLE: &str = "Simulation of 3D Point Rotation";

/// A `Surface` backed by an OS window.
pub struct WindowSurface {
    window: Window,
    framebuffer: Framebuffer,
    clock: FrameClock,
}

impl WindowSurface {
    pub fn new(width: u32, height: u32, title: &str) -> Result<Self> {
        let (w, h) = (width as usize, height as usize);
        let mut window = Window::new(
            title,
            w,
            h,
            WindowOptions {
                resize: false,
                scale: minifb::Scale::X1,
                ..WindowOptions::default()
            },
        )
        .map_err(Error::surface)?;
        // Pacing comes from `tick`, not from minifb's own limiter.
        window.limit_update_rate(None);
        debug!("opened {w}x{h} window");

        Ok(Self {
            window,
            framebuffer: Framebuffer::new(w, h),
            clock: FrameClock::new(),
        })
    }
}

impl Surface for WindowSurface {
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
        self.window
            .update_with_buffer(
                self.framebuffer.pixels(),
                self.framebuffer.width(),
                self.framebuffer.height(),
            )
            .map_err(Error::surface)
    }

    fn poll_quit(&mut self) -> Result<bool> {
        // Pump OS events even on ticks that do not present.
        self.window.update();
        Ok(!self.window.is_open() || self.window.is_key_down(WindowKey::Escape))
    }

    fn pressed_keys(&mut self) -> Result<KeySet> {
        Ok(Key::ALL
            .into_iter()
            .filter(|key| self.window.is_key_down(window_key(*key)))
            .collect())
    }

    fn tick(&mut self, rate: u32) -> Result<Duration> {
        Ok(self.clock.tick(rate))
    }
}

fn window_key(key: Key) -> WindowKey {
    match key {
        Key::Up => WindowKey::Up,
        Key::Down => WindowKey::Down,
        Key::Left => WindowKey::Left,
        Key::Right => WindowKey::Right,
    }
}
