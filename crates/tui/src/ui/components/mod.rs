//! UI components: the nested drawer and the home screen behind it.

pub mod component;
pub mod drawer;
pub mod home;

pub use component::*;
pub use drawer::{DrawerComponent, DrawerState};
pub use home::{HomeComponent, HomeState};
