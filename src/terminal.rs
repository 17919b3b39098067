use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetSize, SetTitle,
    },
};
use ratatui::{backend::IntoCrossterm, style::Color};
use tracing::warn;

use crate::error::Result;
use crate::surface::Surface;

/// A [`Surface`] that drives a real terminal through crossterm. Commands are
/// queued and written out on `flush`.
pub struct CrosstermSurface<W: Write> {
    out: W,
}

impl CrosstermSurface<io::Stdout> {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        enter_alternate_screen(&mut out)?;
        Ok(Self { out })
    }
}

/// Leaves raw mode again if the alternate screen cannot be entered.
fn enter_alternate_screen<W: Write>(out: &mut W) -> Result<()> {
    if let Err(e) = execute!(out, EnterAlternateScreen) {
        if let Err(undo) = disable_raw_mode() {
            warn!("could not leave raw mode: {}", undo);
        }
        return Err(e.into());
    }
    Ok(())
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Restores the terminal state changed by [`CrosstermSurface::enter`].
    pub fn leave(mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.out,
            SetForegroundColor(style::Color::Reset),
            SetBackgroundColor(style::Color::Reset),
            LeaveAlternateScreen,
            Show
        )?;
        Ok(())
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text))?;
        Ok(())
    }

    fn set_size(&mut self, width: u16, height: u16) -> Result<()> {
        queue!(self.out, SetSize(width, height))?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        queue!(self.out, SetTitle(title))?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(self.out, Show)?;
        } else {
            queue!(self.out, Hide)?;
        }
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        queue!(self.out, SetForegroundColor(color.into_crossterm()))?;
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        queue!(self.out, SetBackgroundColor(color.into_crossterm()))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;

    #[test]
    fn test_commands_are_queued_until_flush() {
        let mut surface = CrosstermSurface::new(Vec::new());
        surface.set_cursor_position(3, 4).unwrap();
        surface.write_text("Item 1").unwrap();

        let written = String::from_utf8(surface.out.clone()).unwrap();
        assert!(written.contains("\u{1b}[5;4H"));
        assert!(written.ends_with("Item 1"));
    }

    #[test]
    fn test_cursor_visibility_sequences() {
        let mut surface = CrosstermSurface::new(Vec::new());
        surface.set_cursor_visible(false).unwrap();
        surface.set_cursor_visible(true).unwrap();

        let written = String::from_utf8(surface.out).unwrap();
        assert_eq!(written, "\u{1b}[?25l\u{1b}[?25h");
    }

    #[test]
    fn test_colors_use_ratatui_mapping() {
        let mut surface = CrosstermSurface::new(Vec::new());
        surface.set_foreground(Color::Gray).unwrap();
        surface.set_background(Color::Rgb(1, 2, 3)).unwrap();

        let mut expected = Vec::new();
        queue!(
            expected,
            SetForegroundColor(style::Color::Grey),
            SetBackgroundColor(style::Color::Rgb { r: 1, g: 2, b: 3 })
        )
        .unwrap();
        assert_eq!(surface.out, expected);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_alternate_screen_failure_is_reported() {
        let err = enter_alternate_screen(&mut BrokenPipe).unwrap_err();
        assert!(matches!(err, MenuError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_alternate_screen_sequence() {
        let mut out = Vec::new();
        enter_alternate_screen(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\u{1b}[?1049h");
    }
}
