//! Applying navigation effects to the host that owns the drawer.
//!
//! The controller never calls back into the host directly. Selecting a leaf
//! produces `[Activate(id), CloseDrawer]`, and [`dispatch_effects`] applies
//! that sequence in order. A failing activation stops the sequence, so the
//! drawer is not closed behind an action that did not run to completion.

use std::collections::HashMap;
use std::fmt;

use nestdrawer_types::{ActionId, Effect};
use thiserror::Error;
use tracing::debug;

/// Receiver of the effects a drawer session produces.
pub trait DrawerHost {
    type Error;

    /// Runs the callback bound to `action`.
    fn activate(&mut self, action: &ActionId) -> Result<(), Self::Error>;

    /// Fully closes the drawer.
    fn close(&mut self);

    /// Reopens the drawer. Hosts that cannot reopen ignore this.
    fn open(&mut self) {}

    /// Leaves the application. Hosts without that notion ignore this.
    fn quit(&mut self) {}
}

/// Applies `effects` in order, stopping at the first activation error.
pub fn dispatch_effects<H, I>(effects: I, host: &mut H) -> Result<(), H::Error>
where
    H: DrawerHost + ?Sized,
    I: IntoIterator<Item = Effect>,
{
    for effect in effects {
        debug!(?effect, "dispatching effect");
        match effect {
            Effect::Activate(action) => host.activate(&action)?,
            Effect::CloseDrawer => host.close(),
            Effect::OpenDrawer => host.open(),
            Effect::Quit => host.quit(),
        }
    }
    Ok(())
}

/// Error surfaced by [`CallbackHost`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No callback was registered for the action.
    #[error("no callback bound to action '{0}'")]
    UnboundAction(ActionId),
    /// The bound callback failed.
    #[error("action '{action}' failed: {source}")]
    ActionFailed {
        action: ActionId,
        #[source]
        source: anyhow::Error,
    },
}

type ActionCallback = Box<dyn FnMut() -> anyhow::Result<()>>;

/// A [`DrawerHost`] that maps action ids to closures.
#[derive(Default)]
pub struct CallbackHost {
    callbacks: HashMap<ActionId, ActionCallback>,
    on_close: Option<Box<dyn FnMut()>>,
}

impl CallbackHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `callback` to `action`, replacing any previous binding.
    pub fn bind<F>(&mut self, action: impl Into<ActionId>, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.callbacks.insert(action.into(), Box::new(callback));
        self
    }

    /// Sets the closure run when the drawer should close.
    pub fn on_close<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn is_bound(&self, action: &ActionId) -> bool {
        self.callbacks.contains_key(action)
    }
}

impl fmt::Debug for CallbackHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<&ActionId> = self.callbacks.keys().collect();
        actions.sort();
        f.debug_struct("CallbackHost")
            .field("actions", &actions)
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

impl DrawerHost for CallbackHost {
    type Error = DispatchError;

    fn activate(&mut self, action: &ActionId) -> Result<(), Self::Error> {
        let callback = self
            .callbacks
            .get_mut(action)
            .ok_or_else(|| DispatchError::UnboundAction(action.clone()))?;
        callback().map_err(|source| DispatchError::ActionFailed {
            action: action.clone(),
            source,
        })
    }

    fn close(&mut self) {
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
    }
}
