//! Application state for the drawer TUI.
//!
//! `App` owns the drawer session, the home screen behind it, the loaded theme
//! and the record of activated actions. It is also the [`DrawerHost`] the
//! runtime dispatches effects to, so effect handling is the same code path for
//! keyboard, mouse and scripted input.

use std::{convert::Infallible, rc::Rc, sync::Arc};

use nestdrawer_engine::DrawerHost;
use nestdrawer_types::{ActionId, Menu};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::ui::components::{DrawerState, HomeState};
use crate::ui::theme::{LoadedTheme, Theme};

/// Cross-cutting shared context owned by the App.
///
/// Holds runtime-wide objects like the theme. This avoids threading multiple
/// references through components.
pub struct SharedCtx {
    /// Active theme
    pub theme: Box<dyn Theme>,
    /// Canonical id of the active theme
    pub theme_id: &'static str,
}

impl SharedCtx {
    pub fn new(loaded: LoadedTheme) -> Self {
        Self {
            theme_id: loaded.definition.id,
            theme: loaded.theme,
        }
    }
}

impl std::fmt::Debug for SharedCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCtx").field("theme_id", &self.theme_id).finish()
    }
}

#[derive(Debug)]
pub struct App {
    /// Shared, cross-cutting context (theme)
    pub ctx: SharedCtx,
    /// Drawer session state
    pub drawer: DrawerState,
    /// Home screen state
    pub home: HomeState,
    /// Application focus tree, rebuilt before each render
    pub focus: Rc<Focus>,
    /// Root focus flag
    pub container_focus: FocusFlag,
    /// Return to the home screen instead of exiting when the drawer closes
    pub keep_open: bool,
    /// Actions activated during this session, in order
    pub activated: Vec<ActionId>,
    /// Set once the runtime should leave its loop
    pub should_quit: bool,
}

impl App {
    pub fn new(menu: Arc<Menu>, theme: LoadedTheme, keep_open: bool) -> Self {
        let mut app = Self {
            ctx: SharedCtx::new(theme),
            drawer: DrawerState::new(menu),
            home: HomeState::default(),
            focus: Rc::new(Focus::default()),
            container_focus: FocusFlag::named("app"),
            keep_open,
            activated: Vec::new(),
            should_quit: false,
        };
        app.focus = Rc::new(FocusBuilder::build_for(&app));
        app
    }

    /// Whether the runtime should tick at animation rate.
    pub fn is_animating(&self) -> bool {
        self.drawer.is_open() && self.drawer.is_animating()
    }

    /// Moves focus back onto the drawer's highlighted row or the home button.
    pub fn restore_focus(&mut self) {
        if self.drawer.is_open() {
            if let Some(flag) = self.drawer.highlighted_flag() {
                self.focus.focus(&flag);
            }
        } else {
            self.focus.focus(&self.home);
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(menu: Arc<Menu>) -> Self {
        let theme = crate::ui::theme::catalog::default_truecolor();
        Self::new(
            menu,
            LoadedTheme {
                definition: theme,
                theme: Box::new(theme.build()),
            },
            false,
        )
    }
}

impl DrawerHost for App {
    type Error = Infallible;

    fn activate(&mut self, action: &ActionId) -> Result<(), Self::Error> {
        info!(action = %action, "action activated");
        self.activated.push(action.clone());
        Ok(())
    }

    fn close(&mut self) {
        debug!(keep_open = self.keep_open, "drawer closed");
        self.drawer.close();
        if !self.keep_open {
            self.should_quit = true;
        }
    }

    fn open(&mut self) {
        debug!("drawer opened");
        self.drawer.open();
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        if self.drawer.is_open() {
            builder.widget(&self.drawer);
        } else {
            builder.widget(&self.home);
        }
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
