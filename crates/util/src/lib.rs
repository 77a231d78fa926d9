//! Support code shared by the nestdrawer CLI and TUI: menu files, menu
//! lints, user preferences, and path helpers.

pub mod lint;
pub mod menu_file;
pub mod path_processing;
pub mod preferences;

pub use lint::{LintSeverity, MenuLint, MenuLintKind, has_errors, lint_menu};
pub use menu_file::{
    MENU_PATH_ENV, MenuFileError, MenuFormat, default_menu_path, load_menu_from_file, parse_menu_str, sample_menu,
};
pub use path_processing::expand_tilde;
pub use preferences::{PreferencesError, UserPreferences};
