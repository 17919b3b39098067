use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::menu::Menu;
use crate::render::BorderGlyphs;
use crate::scroll::ScrollPolicy;

pub const SETTINGS_FILE: &str = "climenu.toml";

/// Appearance shared by every menu a host builds.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub appearance: AppearanceSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppearanceSettings {
    pub border: BorderGlyphs,
    pub indicator: char,
    pub show_indicator: bool,
    pub inverted_indicator: bool,
    pub scrollbar: char,
    pub foreground: Color,
    pub background: Color,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            border: BorderGlyphs::default(),
            indicator: '*',
            show_indicator: true,
            inverted_indicator: false,
            scrollbar: '|',
            foreground: Color::Gray,
            background: Color::Black,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutSettings {
    pub scroll_policy: ScrollPolicy,
}

impl Settings {
    /// Reads settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| MenuError::ReadSettings {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MenuError::TomlParse(e.to_string()))
    }

    /// Copies the configured appearance onto `menu`.
    pub fn apply(&self, menu: &mut Menu) {
        let a = &self.appearance;
        menu.border = a.border;
        menu.indicator_glyph = a.indicator;
        menu.show_indicator = a.show_indicator;
        menu.inverted_indicator = a.inverted_indicator;
        menu.scrollbar_glyph = a.scrollbar;
        menu.foreground = a.foreground;
        menu.background = a.background;
        menu.scroll_policy = self.layout.scroll_policy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_settings_file_constant() {
        assert_eq!(SETTINGS_FILE, "climenu.toml");
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.appearance.border, BorderGlyphs::DOUBLE);
        assert_eq!(settings.appearance.indicator, '*');
        assert!(settings.appearance.show_indicator);
        assert!(!settings.appearance.inverted_indicator);
        assert_eq!(settings.appearance.scrollbar, '|');
        assert_eq!(settings.appearance.foreground, Color::Gray);
        assert_eq!(settings.appearance.background, Color::Black);
        assert_eq!(settings.layout.scroll_policy, ScrollPolicy::MinimalShift);
    }

    #[test]
    fn test_settings_deserialization() {
        let toml_content = r##"
[appearance]
border = "++++-|"
indicator = ">"
show-indicator = false
inverted-indicator = true
scrollbar = "#"

[layout]
scroll-policy = "anchored"
"##;

        let settings = Settings::parse(toml_content).unwrap();

        assert_eq!(settings.appearance.border, BorderGlyphs::ASCII);
        assert_eq!(settings.appearance.indicator, '>');
        assert!(!settings.appearance.show_indicator);
        assert!(settings.appearance.inverted_indicator);
        assert_eq!(settings.appearance.scrollbar, '#');
        assert_eq!(settings.layout.scroll_policy, ScrollPolicy::Anchored);
    }

    #[test]
    fn test_settings_deserialization_empty() {
        let settings = Settings::parse("").unwrap();

        assert_eq!(settings.appearance.border, BorderGlyphs::DOUBLE);
        assert_eq!(settings.layout.scroll_policy, ScrollPolicy::MinimalShift);
    }

    #[test]
    fn test_settings_deserialization_partial_appearance() {
        let settings = Settings::parse("[appearance]\nindicator = \">\"\n").unwrap();

        assert_eq!(settings.appearance.indicator, '>');
        assert!(settings.appearance.show_indicator);
        assert_eq!(settings.appearance.scrollbar, '|');
    }

    #[test]
    fn test_settings_invalid_border() {
        let err = Settings::parse("[appearance]\nborder = \"+-|\"\n").unwrap_err();

        assert!(matches!(err, MenuError::TomlParse(_)));
        assert!(err.to_string().contains("invalid border glyphs"));
    }

    #[test]
    fn test_settings_invalid_policy() {
        let err = Settings::parse("[layout]\nscroll-policy = \"centered\"\n").unwrap_err();
        assert!(matches!(err, MenuError::TomlParse(_)));
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut settings = Settings::default();
        settings.appearance.border = BorderGlyphs::ASCII;
        settings.appearance.indicator = '>';
        settings.layout.scroll_policy = ScrollPolicy::Anchored;

        let toml = toml::to_string(&settings).unwrap();
        assert!(toml.contains("scroll-policy = \"anchored\""));
        assert!(toml.contains("border = \"++++-|\""));

        let deserialized = Settings::parse(&toml).unwrap();
        assert_eq!(deserialized.appearance.border, BorderGlyphs::ASCII);
        assert_eq!(deserialized.appearance.indicator, '>');
        assert_eq!(deserialized.appearance.foreground, Color::Gray);
        assert_eq!(deserialized.layout.scroll_policy, ScrollPolicy::Anchored);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.appearance.indicator, '*');
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[appearance]\nscrollbar = \"#\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();

        assert_eq!(settings.appearance.scrollbar, '#');
    }

    #[test]
    fn test_apply_copies_appearance() {
        let mut settings = Settings::default();
        settings.appearance.border = BorderGlyphs::ASCII;
        settings.appearance.indicator = '>';
        settings.appearance.inverted_indicator = true;
        settings.appearance.background = Color::Blue;
        settings.layout.scroll_policy = ScrollPolicy::Anchored;
        let mut menu = Menu::new("Main Menu");

        settings.apply(&mut menu);

        assert_eq!(menu.border, BorderGlyphs::ASCII);
        assert_eq!(menu.indicator_glyph, '>');
        assert!(menu.inverted_indicator);
        assert_eq!(menu.background, Color::Blue);
        assert_eq!(menu.scroll_policy, ScrollPolicy::Anchored);
    }
}
