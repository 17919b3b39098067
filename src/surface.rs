//! The terminal driver the menu engine draws through.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, style::Style};

use crate::error::{MenuError, Result};

/// Drawing and input commands the engine issues. Every call may fail with a
/// surface error, which the engine propagates without retrying.
pub trait Surface {
    fn clear(&mut self) -> Result<()>;
    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()>;
    fn write_text(&mut self, text: &str) -> Result<()>;
    /// Resizes both the visible window and the scrollback buffer.
    fn set_size(&mut self, width: u16, height: u16) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;
    fn set_foreground(&mut self, color: Color) -> Result<()>;
    fn set_background(&mut self, color: Color) -> Result<()>;

    /// Called once at the end of every frame.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Blocks until the next key press.
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// An in-memory surface rendering into a ratatui [`Buffer`], fed by a
/// scripted queue of key events.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    buffer: Buffer,
    cursor: (u16, u16),
    fg: Color,
    bg: Color,
    title: Option<String>,
    cursor_visible: bool,
    frames: usize,
    keys: VecDeque<KeyEvent>,
}

impl BufferSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            cursor: (0, 0),
            fg: Color::Reset,
            bg: Color::Reset,
            title: None,
            cursor_visible: true,
            frames: 0,
            keys: VecDeque::new(),
        }
    }

    pub fn with_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = KeyCode>,
    {
        self.keys
            .extend(keys.into_iter().map(|code| KeyEvent::new(code, KeyModifiers::NONE)));
        self
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn size(&self) -> (u16, u16) {
        (self.buffer.area.width, self.buffer.area.height)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Number of frames flushed so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// The buffer's rows as plain strings.
    pub fn lines(&self) -> Vec<String> {
        let area = self.buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| self.buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn line(&self, y: u16) -> String {
        self.lines().get(usize::from(y)).cloned().unwrap_or_default()
    }

    pub fn style_at(&self, x: u16, y: u16) -> Option<(Color, Color)> {
        let area = self.buffer.area;
        (x < area.width && y < area.height).then(|| {
            let cell = &self.buffer[(x, y)];
            (cell.fg, cell.bg)
        })
    }
}

impl Surface for BufferSurface {
    fn clear(&mut self) -> Result<()> {
        self.buffer.reset();
        let area = self.buffer.area;
        self.buffer.set_style(area, Style::default().fg(self.fg).bg(self.bg));
        Ok(())
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let (x, y) = self.cursor;
        let area = self.buffer.area;
        if x < area.width && y < area.height {
            let style = Style::default().fg(self.fg).bg(self.bg);
            self.buffer.set_string(x, y, text, style);
        }
        let advance = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        self.cursor = (x.saturating_add(advance), y);
        Ok(())
    }

    fn set_size(&mut self, width: u16, height: u16) -> Result<()> {
        self.buffer.resize(Rect::new(0, 0, width, height));
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.fg = color;
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        self.bg = color;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        self.keys.pop_front().ok_or(MenuError::InputClosed)
    }
}
