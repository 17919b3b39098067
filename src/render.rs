//! Geometry for drawing a menu frame onto a [`Surface`].

use std::borrow::Cow;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::layout::{Layout, FRAME_MARGIN};
use crate::surface::Surface;

pub const ELLIPSIS: &str = "...";

/// Box-drawing characters in the order top-left, top-right, bottom-right,
/// bottom-left, horizontal, vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BorderGlyphs(pub [char; 6]);

impl BorderGlyphs {
    pub const DOUBLE: BorderGlyphs = BorderGlyphs(['╔', '╗', '╝', '╚', '═', '║']);
    pub const ASCII: BorderGlyphs = BorderGlyphs(['+', '+', '+', '+', '-', '|']);

    pub fn top_left(&self) -> char {
        self.0[0]
    }

    pub fn top_right(&self) -> char {
        self.0[1]
    }

    pub fn bottom_right(&self) -> char {
        self.0[2]
    }

    pub fn bottom_left(&self) -> char {
        self.0[3]
    }

    pub fn horizontal(&self) -> char {
        self.0[4]
    }

    pub fn vertical(&self) -> char {
        self.0[5]
    }
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::DOUBLE
    }
}

impl FromStr for BorderGlyphs {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        <[char; 6]>::try_from(chars)
            .map(BorderGlyphs)
            .map_err(|_| MenuError::InvalidBorder(s.to_string()))
    }
}

impl TryFrom<String> for BorderGlyphs {
    type Error = MenuError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BorderGlyphs> for String {
    fn from(glyphs: BorderGlyphs) -> Self {
        glyphs.0.iter().collect()
    }
}

/// How a row marks the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    None,
    /// Glyph and a space before the selected row, two spaces before others.
    Prefix(char),
    /// Foreground and background swapped on the selected row.
    Inverted,
}

impl Indicator {
    pub fn from_flags(show: bool, glyph: char, inverted: bool) -> Self {
        match (show, inverted) {
            (_, true) => Indicator::Inverted,
            (true, false) => Indicator::Prefix(glyph),
            (false, false) => Indicator::None,
        }
    }

    pub fn adds_prefix(&self) -> bool {
        matches!(self, Indicator::Prefix(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub foreground: Color,
    pub background: Color,
}

/// Cuts `text` to `budget` characters, ending in [`ELLIPSIS`] when anything
/// was removed.
pub fn clip_label(text: &str, budget: usize) -> Cow<'_, str> {
    if text.chars().count() <= budget {
        return Cow::Borrowed(text);
    }
    if budget <= ELLIPSIS.len() {
        return Cow::Owned(ELLIPSIS.chars().take(budget).collect());
    }
    let mut clipped: String = text.chars().take(budget - ELLIPSIS.len()).collect();
    clipped.push_str(ELLIPSIS);
    Cow::Owned(clipped)
}

/// Row index of the scrollbar thumb for the given selection.
pub fn scrollbar_row(selected: usize, count: usize, layout: &Layout) -> u16 {
    let fraction = if count <= 1 {
        0.0
    } else {
        selected.min(count - 1) as f64 / (count - 1) as f64
    };
    let range = layout.visible_rows().saturating_sub(1) as f64;
    let offset = (fraction * range).round() as u16;
    FRAME_MARGIN.saturating_add(offset)
}

pub fn draw_border(
    surface: &mut dyn Surface,
    layout: &Layout,
    glyphs: &BorderGlyphs,
) -> Result<()> {
    let (width, height) = (layout.width, layout.height);
    let span = usize::from(width.saturating_sub(FRAME_MARGIN + 1));
    let horizontal: String = std::iter::repeat_n(glyphs.horizontal(), span).collect();

    surface.set_cursor_position(1, 1)?;
    surface.write_text(&format!("{}{}{}", glyphs.top_left(), horizontal, glyphs.top_right()))?;

    let vertical = glyphs.vertical().to_string();
    let right = width.saturating_sub(FRAME_MARGIN - 1);
    for y in 2..height.saturating_sub(2) {
        surface.set_cursor_position(1, y)?;
        surface.write_text(&vertical)?;
        surface.set_cursor_position(right, y)?;
        surface.write_text(&vertical)?;
    }

    surface.set_cursor_position(1, height.saturating_sub(FRAME_MARGIN - 1))?;
    surface.write_text(&format!(
        "{}{}{}",
        glyphs.bottom_left(),
        horizontal,
        glyphs.bottom_right()
    ))?;
    Ok(())
}

/// Draws one item row on `line`.
pub fn draw_row(
    surface: &mut dyn Surface,
    layout: &Layout,
    line: u16,
    label: &str,
    selected: bool,
    indicator: Indicator,
    colors: Colors,
) -> Result<()> {
    let text = match indicator {
        Indicator::Prefix(glyph) if selected => format!("{} {}", glyph, label),
        Indicator::Prefix(_) => format!("  {}", label),
        Indicator::None | Indicator::Inverted => label.to_string(),
    };
    let text = clip_label(&text, layout.interior_width());

    let invert = selected && indicator == Indicator::Inverted;
    if invert {
        surface.set_foreground(colors.background)?;
        surface.set_background(colors.foreground)?;
    }

    surface.set_cursor_position(FRAME_MARGIN, line)?;
    surface.write_text(&text)?;

    if invert {
        surface.set_foreground(colors.foreground)?;
        surface.set_background(colors.background)?;
    }
    Ok(())
}

pub fn draw_scrollbar(
    surface: &mut dyn Surface,
    layout: &Layout,
    selected: usize,
    count: usize,
    glyph: char,
) -> Result<()> {
    let x = layout.width.saturating_sub(FRAME_MARGIN);
    surface.set_cursor_position(x, scrollbar_row(selected, count, layout))?;
    surface.write_text(&glyph.to_string())
}
