//! Loading menu trees from YAML or JSON files.
//!
//! A menu file is either a mapping with an `entries` list (and an optional
//! `title`) or a bare list of entries:
//!
//! ```yaml
//! title: Workspace
//! entries:
//!   - id: settings
//!     label: Settings
//!     submenu:
//!       - id: theme
//!         label: Theme
//!         action: settings.theme
//!   - id: quit
//!     label: Quit
//!     action: app.quit
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use nestdrawer_types::{Menu, MenuEntry};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::path_processing::config_file_path;

/// Environment variable overriding the default menu file location.
pub const MENU_PATH_ENV: &str = "NESTDRAWER_MENU_PATH";

/// Default menu file name inside the config directory.
pub const MENU_FILE_NAME: &str = "menu.yaml";

const SAMPLE_MENU: &str = include_str!("../assets/sample_menu.yaml");

/// Error surfaced when a menu file cannot be read or parsed.
#[derive(Debug, Error)]
pub enum MenuFileError {
    #[error("failed to read menu file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON menu in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML menu in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Serialization format of a menu document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Json,
    Yaml,
}

impl MenuFormat {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => MenuFormat::Json,
            _ => MenuFormat::Yaml,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    Menu(Menu),
    Entries(Vec<MenuEntry>),
}

impl From<MenuDocument> for Menu {
    fn from(document: MenuDocument) -> Self {
        match document {
            MenuDocument::Menu(menu) => menu,
            MenuDocument::Entries(entries) => Menu::new(entries),
        }
    }
}

/// Parses a menu document held in memory. `origin` is only used in errors.
pub fn parse_menu_str(text: &str, format: MenuFormat, origin: &Path) -> Result<Menu, MenuFileError> {
    let document: MenuDocument = match format {
        MenuFormat::Json => serde_json::from_str(text).map_err(|source| MenuFileError::Json {
            path: origin.to_path_buf(),
            source,
        })?,
        MenuFormat::Yaml => serde_yaml::from_str(text).map_err(|source| MenuFileError::Yaml {
            path: origin.to_path_buf(),
            source,
        })?,
    };
    Ok(document.into())
}

/// Reads and parses the menu file at `path`.
pub fn load_menu_from_file(path: impl AsRef<Path>) -> Result<Menu, MenuFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MenuFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let menu = parse_menu_str(&text, MenuFormat::from_path(path), path)?;
    debug!(path = %path.display(), entries = menu.entries.len(), "loaded menu file");
    Ok(menu)
}

/// Default menu file location: `NESTDRAWER_MENU_PATH`, else
/// `<config_dir>/nestdrawer/menu.yaml`.
pub fn default_menu_path() -> PathBuf {
    config_file_path(MENU_PATH_ENV, MENU_FILE_NAME)
}

/// The built-in demo menu.
pub fn sample_menu() -> Menu {
    embedded_menu(SAMPLE_MENU)
}

fn embedded_menu(text: &str) -> Menu {
    match serde_yaml::from_str::<MenuDocument>(text) {
        Ok(document) => Menu::from(document),
        Err(error) => {
            warn!("Failed to parse the built-in sample menu: {error}");
            Menu::default()
        }
    }
}
