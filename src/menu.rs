use std::collections::BTreeSet;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Color;
use tracing::{debug, trace};

use crate::error::Result;
use crate::item::{KeyHandler, KeyPress, MenuItem};
use crate::layout::{Layout, Size, FRAME_MARGIN};
use crate::navigator::{self, Move};
use crate::render::{self, BorderGlyphs, Colors, Indicator};
use crate::scroll::{ScrollPolicy, ScrollWindow};
use crate::surface::Surface;

/// Hook fired around each frame. Changes it makes to the menu take effect on
/// the next frame.
pub type RenderHook = Box<dyn FnMut(&mut Menu, &mut dyn Surface) -> Result<()>>;

/// A bordered, keyboard-driven list of items.
///
/// Configure the public fields, then call [`Menu::show`], which blocks until
/// Escape is pressed or a handler sets `exit_requested`. A menu can be shown
/// any number of times; every call starts from the first enabled item.
pub struct Menu {
    /// Terminal title while the menu owns the surface.
    pub name: String,
    pub items: Vec<MenuItem>,
    pub selected_index: usize,
    /// Rows navigation skips over.
    pub disabled: BTreeSet<usize>,
    pub show_indicator: bool,
    pub indicator_glyph: char,
    pub inverted_indicator: bool,
    pub scrollbar_glyph: char,
    pub min_size: Size,
    pub max_size: Size,
    pub border: BorderGlyphs,
    pub foreground: Color,
    pub background: Color,
    pub scroll_policy: ScrollPolicy,
    /// Re-apply size, title, cursor and colours before the next frame. Set this
    /// on an outer menu after a nested menu returns.
    pub force_redraw_layout: bool,
    pub exit_requested: bool,
    pre_render: Option<RenderHook>,
    post_render: Option<RenderHook>,
    unhandled_key: Option<KeyHandler>,
    layout: Layout,
    window: Option<ScrollWindow>,
}

impl Menu {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            selected_index: 0,
            disabled: BTreeSet::new(),
            show_indicator: true,
            indicator_glyph: '*',
            inverted_indicator: false,
            scrollbar_glyph: '|',
            min_size: Size::default(),
            max_size: Size::default(),
            border: BorderGlyphs::default(),
            foreground: Color::Gray,
            background: Color::Black,
            scroll_policy: ScrollPolicy::default(),
            force_redraw_layout: true,
            exit_requested: false,
            pre_render: None,
            post_render: None,
            unhandled_key: None,
            layout: Layout::default(),
            window: None,
        }
    }

    pub fn push(&mut self, item: MenuItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn disable(&mut self, indices: impl IntoIterator<Item = usize>) -> &mut Self {
        self.disabled.extend(indices);
        self
    }

    /// Fired after the surface is cleared, before the border is drawn.
    pub fn on_pre_render<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Menu, &mut dyn Surface) -> Result<()> + 'static,
    {
        self.pre_render = Some(Box::new(hook));
    }

    /// Fired after everything else in the frame is drawn.
    pub fn on_post_render<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Menu, &mut dyn Surface) -> Result<()> + 'static,
    {
        self.post_render = Some(Box::new(hook));
    }

    /// Fired for keys that neither navigation nor the selected item's own
    /// handler consumed.
    pub fn on_unhandled_key<F>(&mut self, handler: F)
    where
        F: FnMut(&mut KeyPress<'_>) -> Result<()> + 'static,
    {
        self.unhandled_key = Some(Box::new(handler));
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected_index)
    }

    pub fn selected_item_mut(&mut self) -> Option<&mut MenuItem> {
        self.items.get_mut(self.selected_index)
    }

    /// Geometry computed by the last `show()`.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Visible range while the last `show()` is scrolling.
    pub fn scroll_window(&self) -> Option<ScrollWindow> {
        self.window
    }

    pub fn indicator(&self) -> Indicator {
        Indicator::from_flags(self.show_indicator, self.indicator_glyph, self.inverted_indicator)
    }

    /// Runs the draw/input loop until the menu exits. Returns immediately,
    /// drawing nothing, when there is no enabled item.
    pub fn show(&mut self, surface: &mut dyn Surface) -> Result<()> {
        self.exit_requested = false;

        let Some(first) = navigator::first_enabled(self.items.len(), &self.disabled) else {
            debug!(menu = %self.name, items = self.items.len(), "no enabled items, not showing");
            return Ok(());
        };
        self.selected_index = first;
        self.prepare();

        debug!(
            menu = %self.name,
            items = self.items.len(),
            width = self.layout.width,
            height = self.layout.height,
            scrolling = self.layout.scrolling,
            "showing menu"
        );

        while !self.exit_requested {
            self.draw(surface)?;
            let key = surface.read_key()?;
            self.handle_key(key, surface)?;
        }

        debug!(menu = %self.name, "menu closed");
        Ok(())
    }

    /// Derives layout and scroll state for the current items and selection.
    fn prepare(&mut self) {
        let longest = self
            .items
            .iter()
            .map(|item| item.display().chars().count())
            .max()
            .unwrap_or(0);

        self.layout = Layout::compute(
            longest,
            self.items.len(),
            self.indicator().adds_prefix(),
            self.min_size,
            self.max_size,
        );
        self.window = self.layout.scrolling.then(|| {
            ScrollWindow::new(self.selected_index, self.layout.visible_rows(), self.items.len())
        });
    }

    /// Dispatches one key: arrows navigate, Escape exits, anything else goes
    /// to the selected item's handler or the menu's unhandled-key handler.
    pub fn handle_key(&mut self, key: KeyEvent, surface: &mut dyn Surface) -> Result<()> {
        trace!(menu = %self.name, code = ?key.code, selected = self.selected_index, "key");

        match key.code {
            KeyCode::Up => {
                let m = navigator::move_up(self.selected_index, self.items.len(), &self.disabled);
                self.apply_move(m);
            }
            KeyCode::Down => {
                let m = navigator::move_down(self.selected_index, self.items.len(), &self.disabled);
                self.apply_move(m);
            }
            KeyCode::Esc => {
                self.exit_requested = true;
                self.force_redraw_layout = true;
            }
            _ => self.fire_handler(key, surface)?,
        }
        Ok(())
    }

    fn apply_move(&mut self, m: Move) {
        self.selected_index = m.index;
        if let Some(window) = self.window.as_mut() {
            window.follow(m.index, m.delta, self.items.len(), self.scroll_policy);
        }
    }

    fn fire_handler(&mut self, key: KeyEvent, surface: &mut dyn Surface) -> Result<()> {
        let index = self.selected_index;
        let item_handler = self.items.get_mut(index).and_then(|item| item.handler.take());

        match item_handler {
            Some(mut handler) => {
                let result = handler(&mut KeyPress {
                    menu: &mut *self,
                    surface: &mut *surface,
                    key,
                });
                // the handler may have replaced itself or the item list
                if let Some(item) = self.items.get_mut(index)
                    && item.handler.is_none()
                {
                    item.handler = Some(handler);
                }
                result
            }
            None => {
                let Some(mut handler) = self.unhandled_key.take() else {
                    return Ok(());
                };
                let result = handler(&mut KeyPress {
                    menu: &mut *self,
                    surface: &mut *surface,
                    key,
                });
                if self.unhandled_key.is_none() {
                    self.unhandled_key = Some(handler);
                }
                result
            }
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> Result<()> {
        if self.force_redraw_layout {
            self.apply_geometry(surface)?;
            self.force_redraw_layout = false;
        }

        surface.clear()?;

        if let Some(mut hook) = self.pre_render.take() {
            let result = hook(&mut *self, &mut *surface);
            self.pre_render.get_or_insert(hook);
            result?;
        }

        self.draw_body(surface)?;

        if let Some(mut hook) = self.post_render.take() {
            let result = hook(&mut *self, &mut *surface);
            self.post_render.get_or_insert(hook);
            result?;
        }

        surface.flush()
    }

    fn apply_geometry(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.set_size(self.layout.width, self.layout.height)?;
        if !self.name.is_empty() {
            surface.set_title(&self.name)?;
        }
        surface.set_cursor_visible(false)?;
        surface.set_foreground(self.foreground)?;
        surface.set_background(self.background)?;
        Ok(())
    }

    fn draw_body(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let count = self.items.len();
        if count == 0 {
            return Ok(());
        }
        let selected = self.selected_index.min(count - 1);
        let layout = self.layout;

        render::draw_border(surface, &layout, &self.border)?;

        let rows = match self.window.as_mut() {
            Some(window) => {
                // the host may have moved the selection from a handler
                window.follow(selected, 0, count, self.scroll_policy);
                window.first..=window.last.min(count - 1)
            }
            None => 0..=count - 1,
        };

        let indicator = self.indicator();
        let colors = Colors {
            foreground: self.foreground,
            background: self.background,
        };
        for (line, index) in (FRAME_MARGIN..).zip(rows) {
            let Some(item) = self.items.get(index) else {
                break;
            };
            render::draw_row(
                surface,
                &layout,
                line,
                &item.display(),
                index == selected,
                indicator,
                colors,
            )?;
        }

        if layout.scrolling {
            render::draw_scrollbar(surface, &layout, selected, count, self.scrollbar_glyph)?;
        }
        Ok(())
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("name", &self.name)
            .field("items", &self.items)
            .field("selected_index", &self.selected_index)
            .field("disabled", &self.disabled)
            .field("layout", &self.layout)
            .field("window", &self.window)
            .field("force_redraw_layout", &self.force_redraw_layout)
            .field("exit_requested", &self.exit_requested)
            .finish_non_exhaustive()
    }
}
