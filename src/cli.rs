use std::path::PathBuf;

use clap::Parser;

use crate::settings::SETTINGS_FILE;

#[derive(Parser, Debug)]
#[command(name = "climenu-demo")]
#[command(about = "Demo of keyboard-driven terminal menus")]
pub struct Cli {
    /// Appearance settings file (TOML)
    #[arg(short, long, default_value = SETTINGS_FILE)]
    pub config: PathBuf,

    /// Write debug logs to this file
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["climenu-demo"]);
        assert_eq!(cli.config, PathBuf::from("climenu.toml"));
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_explicit_paths() {
        let cli = Cli::parse_from(["climenu-demo", "-c", "menus.toml", "--log-file", "demo.log"]);
        assert_eq!(cli.config, PathBuf::from("menus.toml"));
        assert_eq!(cli.log_file, Some(PathBuf::from("demo.log")));
    }
}
