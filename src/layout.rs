/// Cells used on each side of the box: outer margin, border glyph, inner padding.
pub const FRAME_MARGIN: u16 = 3;
pub const FRAME_OVERHEAD: u16 = FRAME_MARGIN * 2;
/// Indicator glyph plus its separator.
pub const INDICATOR_WIDTH: u16 = 2;
/// Max-size dimensions below this are ignored.
pub const MIN_CONSTRAINED: u16 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal geometry for one `show()` of a menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub scrolling: bool,
}

impl Layout {
    pub fn compute(
        longest_label: usize,
        item_count: usize,
        indicator_prefix: bool,
        min: Size,
        max: Size,
    ) -> Self {
        let mut width = saturate(longest_label).saturating_add(FRAME_OVERHEAD);
        if indicator_prefix {
            width = width.saturating_add(INDICATOR_WIDTH);
        }
        let mut height = saturate(item_count).saturating_add(FRAME_OVERHEAD);
        let mut scrolling = false;

        if min.height > height {
            height = min.height;
        } else if max.height >= MIN_CONSTRAINED && max.height < height {
            // keep at least one row between the borders
            height = max.height.max(FRAME_OVERHEAD + 1);
            scrolling = height < saturate(item_count).saturating_add(FRAME_OVERHEAD);
        }

        if scrolling {
            width = width.saturating_add(1);
        }

        if min.width > width {
            width = min.width;
        } else if max.width >= MIN_CONSTRAINED && max.width < width {
            width = max.width;
        }

        Self {
            width,
            height,
            scrolling,
        }
    }

    /// Rows available for items between the top and bottom border.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(FRAME_OVERHEAD))
    }

    /// Columns available for a row's text.
    pub fn interior_width(&self) -> usize {
        usize::from(self.width.saturating_sub(FRAME_OVERHEAD))
    }
}

fn saturate(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
