//! Shared type definitions for nestdrawer: the menu tree model, the
//! navigation path, and the effect/message vocabulary exchanged between the
//! navigation engine and its hosts.

mod menu;
mod navigation;

pub use menu::{ActionId, Menu, MenuEntry};
pub use navigation::{NavigationPath, SlideDirection};

/// Side effects requested by the navigation controller or a UI component.
///
/// Selecting a leaf produces `[Activate(id), CloseDrawer]`; hosts apply the
/// effects in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the host callback bound to this action.
    Activate(ActionId),
    /// Fully close the drawer.
    CloseDrawer,
    /// Reopen the drawer from the root level.
    OpenDrawer,
    /// Leave the application.
    Quit,
}

/// Messages delivered to components by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Animation tick.
    Tick,
    /// Terminal resized to (columns, rows). Components lay out from the frame
    /// area, so the size is informational; the drawer uses it to drop a
    /// running height animation.
    Resize(u16, u16),
}
