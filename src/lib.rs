//! Keyboard-driven menus for character-cell terminals.
//!
//! A [`Menu`] draws a bordered box of items through a [`Surface`], scrolls
//! when its items do not fit the configured maximum height, skips disabled
//! rows while navigating with the arrow keys, and hands every other key to
//! the selected item's handler.

mod cli;
mod demo;
mod error;
mod item;
mod menu;
mod settings;
mod surface;
mod terminal;

pub mod layout;
pub mod navigator;
pub mod render;
pub mod scroll;

pub use cli::Cli;
pub use demo::{init_logging, list_demo, main_menu, run_demo, scrolling_demo, sum_menu};
pub use error::{MenuError, Result};
pub use item::{KeyHandler, KeyPress, Label, MenuItem};
pub use layout::{Layout, Size};
pub use menu::{Menu, RenderHook};
pub use render::{BorderGlyphs, Indicator};
pub use scroll::{ScrollPolicy, ScrollWindow};
pub use settings::{AppearanceSettings, LayoutSettings, Settings, SETTINGS_FILE};
pub use surface::{BufferSurface, Surface};
pub use terminal::CrosstermSurface;
