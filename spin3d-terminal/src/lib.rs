/// Terminal backend: runs the simulation inside a crossterm screen
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use spin3d_core::{Color, FrameClock, Framebuffer, Key, KeySet, Result, Surface};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

pub mod renderer;

pub use renderer::BlockRenderer;

/// Puts the terminal in raw mode on the alternate screen and undoes it on drop.
struct ScreenGuard {
    enhanced: bool,
}

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = ScreenGuard { enhanced: false };
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, EnableFocusChange)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced = true;
        }
        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, DisableFocusChange, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Held directional keys, built from terminal key events.
///
/// With release reporting (`enhanced`) a key stays held until its Release
/// arrives. Without it a key counts as held only until the next `take`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    keys: KeySet,
    enhanced: bool,
}

impl HeldKeys {
    pub fn new(enhanced: bool) -> Self {
        Self {
            keys: KeySet::empty(),
            enhanced,
        }
    }

    pub fn handle(&mut self, key: KeyEvent) {
        if let Some(direction) = direction(key.code) {
            match key.kind {
                KeyEventKind::Release => self.keys.remove(direction),
                KeyEventKind::Press | KeyEventKind::Repeat => self.keys.insert(direction),
            }
        }
    }

    /// Forget every key. Releases can go missing while the terminal is unfocused.
    pub fn clear(&mut self) {
        self.keys = KeySet::empty();
    }

    /// Keys held for this tick.
    pub fn take(&mut self) -> KeySet {
        let keys = self.keys;
        if !self.enhanced {
            self.clear();
        }
        keys
    }
}

/// A `Surface` drawn into the terminal.
///
/// Held keys come from press/release reports when the terminal supports
/// keyboard enhancement. Otherwise a key counts as held for the tick in
/// which its press or repeat arrived.
pub struct TerminalSurface {
    framebuffer: Framebuffer,
    renderer: BlockRenderer,
    clock: FrameClock,
    held: HeldKeys,
    quit: bool,
    out: Stdout,
    _guard: ScreenGuard,
}

impl TerminalSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let guard = ScreenGuard::enter()?;
        let (cols, rows) = terminal::size()?;
        if !guard.enhanced {
            warn!("terminal does not report key releases; held keys are approximated");
        }
        debug!("terminal is {cols}x{rows} cells");

        Ok(Self {
            framebuffer: Framebuffer::new(width as usize, height as usize),
            renderer: BlockRenderer::new(cols as usize, rows as usize),
            clock: FrameClock::new(),
            held: HeldKeys::new(guard.enhanced),
            quit: false,
            out: stdout(),
            _guard: guard,
        })
    }

    /// Drain every pending terminal event without blocking.
    fn pump(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::FocusLost => self.held.clear(),
                Event::Resize(cols, rows) => {
                    self.renderer.resize(cols as usize, rows as usize);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_quit(&key) {
            self.quit = true;
            return;
        }
        self.held.handle(key);
    }
}

impl Surface for TerminalSurface {
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
        self.renderer.draw(&self.framebuffer, &mut self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn poll_quit(&mut self) -> Result<bool> {
        // A failed read means the terminal went away.
        if let Err(err) = self.pump() {
            warn!("terminal input failed: {err}");
            self.quit = true;
        }
        Ok(self.quit)
    }

    fn pressed_keys(&mut self) -> Result<KeySet> {
        self.pump()?;
        Ok(self.held.take())
    }

    fn tick(&mut self, rate: u32) -> Result<Duration> {
        Ok(self.clock.tick(rate))
    }
}

fn direction(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(direction(KeyCode::Up), Some(Key::Up));
        assert_eq!(direction(KeyCode::Down), Some(Key::Down));
        assert_eq!(direction(KeyCode::Left), Some(Key::Left));
        assert_eq!(direction(KeyCode::Right), Some(Key::Right));
        assert_eq!(direction(KeyCode::Char('w')), None);
    }

    fn arrow(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        key(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_press_then_release_clears_key() {
        let mut held = HeldKeys::new(true);
        held.handle(arrow(KeyCode::Up, KeyEventKind::Press));
        held.handle(arrow(KeyCode::Up, KeyEventKind::Release));
        assert!(held.take().is_empty());
    }

    #[test]
    fn test_repeat_keeps_key_held() {
        let mut held = HeldKeys::new(true);
        held.handle(arrow(KeyCode::Left, KeyEventKind::Press));
        held.handle(arrow(KeyCode::Left, KeyEventKind::Repeat));
        assert!(held.take().contains(Key::Left));

        let mut held = HeldKeys::new(false);
        held.handle(arrow(KeyCode::Left, KeyEventKind::Repeat));
        assert!(held.take().contains(Key::Left));
    }

    #[test]
    fn test_without_releases_keys_last_one_tick() {
        let mut held = HeldKeys::new(false);
        held.handle(arrow(KeyCode::Down, KeyEventKind::Press));
        assert!(held.take().contains(Key::Down));
        assert!(held.take().is_empty());
    }

    #[test]
    fn test_with_releases_keys_stay_until_released() {
        let mut held = HeldKeys::new(true);
        held.handle(arrow(KeyCode::Right, KeyEventKind::Press));
        held.handle(arrow(KeyCode::Up, KeyEventKind::Press));
        assert!(held.take().contains(Key::Right));
        assert!(held.take().contains(Key::Right));

        held.handle(arrow(KeyCode::Right, KeyEventKind::Release));
        let keys = held.take();
        assert!(!keys.contains(Key::Right));
        assert!(keys.contains(Key::Up));
    }

    #[test]
    fn test_clear_drops_stuck_keys() {
        let mut held = HeldKeys::new(true);
        held.handle(arrow(KeyCode::Up, KeyEventKind::Press));
        held.clear();
        assert!(held.take().is_empty());
    }

    #[test]
    fn test_non_arrow_keys_ignored() {
        let mut held = HeldKeys::new(true);
        held.handle(arrow(KeyCode::Char('w'), KeyEventKind::Press));
        assert!(held.take().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let press = KeyEventKind::Press;
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE, press)));
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE, press)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL, press)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE, press)));
        assert!(!is_quit(&key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release)));
    }
}
