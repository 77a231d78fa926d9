//! Nested drawer menu.
//!
//! A bottom sheet that walks a menu tree one level at a time:
//! - drill-down into submenus with a back row to return
//! - rat-focus integration via one `FocusFlag` per row
//! - keyboard (Esc/arrows/Tab/Enter) and mouse (click, hover, wheel) input
//! - horizontal slide and height animations when the level changes
//!
//! Selecting a leaf reports `[Effect::Activate, Effect::CloseDrawer]`; Escape
//! at the root and clicks on the overlay report `Effect::CloseDrawer`.

mod drawer_component;
mod state;

pub use drawer_component::DrawerComponent;
pub use state::{DrawerRow, DrawerState};
