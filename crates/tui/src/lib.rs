//! # nestdrawer TUI
//!
//! Terminal front end for the nested drawer menu. It renders a menu tree as a
//! bottom sheet over a dimmed overlay, lets the user drill into submenus and
//! back out, and reports the actions that were activated.
//!
//! ## Architecture
//!
//! Navigation state lives in `nestdrawer-engine`; this crate owns the
//! terminal, the animation clock, rendering, and input routing. Components
//! return `Effect`s which the runtime dispatches to `App`.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use nestdrawer_types::{ActionId, Menu};

pub use ui::theme::catalog::{THEME_DEFINITIONS, ThemeDefinition, resolve as resolve_theme};

/// Options for a drawer session.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Theme id or alias; environment overrides still apply.
    pub theme: Option<String>,
    /// Return to a home screen when the drawer closes instead of exiting.
    pub keep_open: bool,
}

/// What happened during a drawer session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Actions activated, in order.
    pub activated: Vec<ActionId>,
}

/// Runs the drawer until it closes (or until the user quits when
/// `keep_open` is set).
///
/// # Errors
///
/// Returns an error for terminal setup, drawing, or teardown failures.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use nestdrawer_types::{Menu, MenuEntry};
/// use nestdrawer_tui::{RunOptions, run};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let menu = Menu::new(vec![MenuEntry::new("help", "Help").with_action("help")]);
///     let outcome = run(Arc::new(menu), RunOptions::default()).await?;
///     println!("{:?}", outcome.activated);
///     Ok(())
/// }
/// ```
pub async fn run(menu: Arc<Menu>, options: RunOptions) -> Result<RunOutcome> {
    ui::runtime::run_app(menu, options).await
}
