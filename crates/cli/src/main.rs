use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use nestdrawer_engine::{is_valid_path, resolve};
use nestdrawer_tui::{RunOptions, THEME_DEFINITIONS, resolve_theme};
use nestdrawer_types::{Menu, NavigationPath};
use nestdrawer_util::{LintSeverity, UserPreferences, default_menu_path, expand_tilde, has_errors, lint_menu, load_menu_from_file, sample_menu};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file used while the drawer owns the terminal.
const LOG_PATH_ENV: &str = "NESTDRAWER_LOG_PATH";

#[derive(Debug, Parser)]
#[command(name = "nestdrawer", version, about = "Nested drawer menu for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    open: OpenArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the drawer (default)
    Open(OpenArgs),
    /// Check a menu file for problems
    Validate {
        /// Menu file; defaults to the configured menu
        path: Option<PathBuf>,
    },
    /// Print the entries visible at a navigation path
    Resolve {
        /// Menu file; defaults to the configured menu
        menu: Option<PathBuf>,
        /// Slash-separated entry ids, e.g. `account/security`
        #[arg(long, default_value = "")]
        path: String,
        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
struct OpenArgs {
    /// Menu file (.yaml, .yml or .json)
    #[arg(long)]
    menu: Option<PathBuf>,
    /// Theme id or alias
    #[arg(long)]
    theme: Option<String>,
    /// Remember --theme as the preferred theme
    #[arg(long, requires = "theme")]
    save_theme: bool,
    /// Show a home screen when the drawer closes instead of exiting
    #[arg(long)]
    keep_open: bool,
    /// Write logs to this file while the drawer is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        None => open(cli.open).await,
        Some(Command::Open(mut args)) => {
            args.menu = args.menu.or(cli.open.menu);
            open(args).await
        }
        Some(Command::Validate { path }) => {
            init_tracing(TracingTarget::Stderr)?;
            validate(path.or(cli.open.menu))
        }
        Some(Command::Resolve { menu, path, json }) => {
            init_tracing(TracingTarget::Stderr)?;
            resolve_path(menu.or(cli.open.menu), &path, json)
        }
    }
}

enum TracingTarget {
    Stderr,
    File(PathBuf),
}

/// Installs the global subscriber. `RUST_LOG` controls the filter and
/// defaults to `warn`.
fn init_tracing(target: TracingTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match target {
        TracingTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        TracingTarget::File(path) => {
            let file = File::create(&path).with_context(|| format!("create log file {}", path.display()))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
    }
    Ok(())
}

async fn open(args: OpenArgs) -> Result<()> {
    let log_file = args
        .log_file
        .clone()
        .or_else(|| std::env::var(LOG_PATH_ENV).ok().map(|value| expand_tilde(&value)));
    // Without a log file nothing may write to the terminal the drawer owns.
    if let Some(path) = log_file {
        init_tracing(TracingTarget::File(path))?;
    }

    let menu = load_menu(args.menu.as_deref())?;
    for lint in lint_menu(&menu) {
        warn!("{lint}");
    }

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!("Failed to load preferences: {error}");
        UserPreferences::ephemeral()
    });
    if let Some(theme) = args.theme.as_deref() {
        let Some(definition) = resolve_theme(theme) else {
            let available: Vec<String> = THEME_DEFINITIONS
                .iter()
                .map(|definition| format!("{} ({})", definition.id, definition.label))
                .collect();
            bail!("unknown theme '{theme}' (available: {})", available.join(", "));
        };
        if args.save_theme {
            preferences
                .set_preferred_theme(Some(definition.id.to_string()))
                .context("save preferred theme")?;
        }
    }

    let options = RunOptions {
        theme: args.theme.or_else(|| preferences.preferred_theme()),
        keep_open: args.keep_open,
    };
    let outcome = nestdrawer_tui::run(Arc::new(menu), options).await?;
    for action in outcome.activated {
        println!("{action}");
    }
    Ok(())
}

/// Loads `path`, or the configured menu file, or the built-in sample when no
/// menu file exists yet.
fn load_menu(path: Option<&Path>) -> Result<Menu> {
    if let Some(path) = path {
        return load_menu_from_file(path).with_context(|| format!("load menu {}", path.display()));
    }
    let default_path = default_menu_path();
    if default_path.exists() {
        return load_menu_from_file(&default_path).with_context(|| format!("load menu {}", default_path.display()));
    }
    debug!(path = %default_path.display(), "no menu file; using the sample menu");
    Ok(sample_menu())
}

fn validate(path: Option<PathBuf>) -> Result<()> {
    let menu = load_menu(path.as_deref())?;
    let lints = lint_menu(&menu);
    if lints.is_empty() {
        println!("ok: {} root entries, no problems found", menu.entries.len());
        return Ok(());
    }
    for lint in &lints {
        println!("{lint}");
    }
    if has_errors(&lints) {
        let errors = lints.iter().filter(|lint| lint.severity() == LintSeverity::Error).count();
        bail!("menu has {errors} error(s)");
    }
    Ok(())
}

fn resolve_path(menu_path: Option<PathBuf>, path: &str, json: bool) -> Result<()> {
    let menu = load_menu(menu_path.as_deref())?;
    let navigation_path: NavigationPath = path.parse().unwrap_or_default();
    let segments = navigation_path.segments();
    if !is_valid_path(menu.entries(), segments) {
        eprintln!("note: '{navigation_path}' does not resolve; showing the root level");
    }

    let entries = resolve(menu.entries(), segments);
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    for entry in entries {
        let marker = if entry.has_children() { " ›" } else { "" };
        match entry.action.as_ref() {
            Some(action) => println!("{}\t{}{}\t{}", entry.id, entry.label, marker, action),
            None => println!("{}\t{}{}", entry.id, entry.label, marker),
        }
    }
    Ok(())
}
