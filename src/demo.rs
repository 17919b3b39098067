//! The demo application: a main menu opening a list, a sum editor and a
//! scrolling list.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use crossterm::event::KeyCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::{MenuError, Result};
use crate::item::{KeyPress, MenuItem};
use crate::layout::Size;
use crate::menu::Menu;
use crate::render::BorderGlyphs;
use crate::settings::Settings;
use crate::terminal::CrosstermSurface;

const FIRST_ROW: usize = 2;
const SECOND_ROW: usize = 3;
const SUM_ROW: usize = 5;

pub fn run_demo(cli: &Cli) -> Result<()> {
    let settings = Settings::load(&cli.config)?;
    let mut main_menu = main_menu(&settings);

    let mut surface = CrosstermSurface::enter()?;
    let result = main_menu.show(&mut surface);
    let restored = surface.leave();

    info!("demo finished");
    first_error(result, restored)
}

/// A menu error wins over a failure to restore the terminal afterwards.
fn first_error(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    if let (Err(_), Err(e)) = (&result, &cleanup) {
        warn!("terminal restore failed after menu error: {}", e);
    }
    result.and(cleanup)
}

/// Sends `tracing` output to `path`; the terminal itself is taken by the menus.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| MenuError::OpenLog {
        path: path.display().to_string(),
        source: e,
    })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("climenu=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| MenuError::Logging(e.to_string()))
}

pub fn main_menu(settings: &Settings) -> Menu {
    let mut menu = Menu::new("Main Menu");
    settings.apply(&mut menu);

    menu.push(opens("List Demo", list_demo(settings)));
    menu.push(opens("Sum Menu", sum_menu(settings)));
    menu.push(opens("Scrolling List Demo", scrolling_demo(settings)));
    menu
}

/// An item that shows `submenu` on Enter.
fn opens(label: &str, mut submenu: Menu) -> MenuItem {
    MenuItem::new(label).with_handler(move |ctx| {
        if ctx.key.code == KeyCode::Enter {
            submenu.show(&mut *ctx.surface)?;
            ctx.menu.force_redraw_layout = true;
        }
        Ok(())
    })
}

pub fn list_demo(settings: &Settings) -> Menu {
    let mut menu = Menu::new("List Demo");
    settings.apply(&mut menu);
    menu.show_indicator = false;
    menu.max_size = Size::new(21, 18);
    menu.border = BorderGlyphs::ASCII;

    for i in 0..10 {
        menu.push(MenuItem::new(format!("Demo List Item {}", i)));
    }
    menu
}

pub fn sum_menu(settings: &Settings) -> Menu {
    let mut menu = Menu::new("Sum Menu");
    settings.apply(&mut menu);
    menu.indicator_glyph = '>';

    menu.push(MenuItem::new("Press Left or Right to change values."));
    menu.push(MenuItem::new(""));
    menu.push(MenuItem::valued("First Number", 2));
    menu.push(MenuItem::valued("Second Number", 3));
    menu.push(MenuItem::new("---"));
    menu.push(MenuItem::valued("Sum", 5));
    menu.disable([0, 1, 4, SUM_ROW]);

    menu.on_unhandled_key(adjust_sum);
    menu
}

fn adjust_sum(ctx: &mut KeyPress<'_>) -> Result<()> {
    let step = match ctx.key.code {
        KeyCode::Left => -1,
        KeyCode::Right => 1,
        _ => return Ok(()),
    };
    if !matches!(ctx.menu.selected_index, FIRST_ROW | SECOND_ROW) {
        return Ok(());
    }

    if let Some(item) = ctx.menu.selected_item_mut() {
        let value = item.number().unwrap_or(0) + step;
        item.set_number(value);
    }

    let number = |row: usize| ctx.menu.items.get(row).and_then(MenuItem::number).unwrap_or(0);
    let sum = number(FIRST_ROW) + number(SECOND_ROW);
    if let Some(item) = ctx.menu.items.get_mut(SUM_ROW) {
        item.set_number(sum);
    }
    Ok(())
}

pub fn scrolling_demo(settings: &Settings) -> Menu {
    let mut menu = Menu::new("Scrolling Demo");
    settings.apply(&mut menu);
    menu.max_size = Size::new(80, 15);

    for i in 0..20 {
        menu.push(MenuItem::new(format!("Item {}", i)));
    }
    menu
}
