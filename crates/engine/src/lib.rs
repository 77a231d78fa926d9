//! # Nestdrawer Engine
//!
//! Navigation core of the nested drawer menu:
//!
//! - **`resolver`**: pure lookup of the entries visible at a navigation path,
//!   with silent fallback to the root level for stale or invalid paths.
//! - **`controller`**: the per-session state machine (descend, ascend,
//!   close-or-ascend, interact) that emits [`Effect`]s instead of calling
//!   back into the host.
//! - **`dispatch`**: the [`DrawerHost`] seam that applies those effects in
//!   order.
//! - **`transition`**: slide and height animation parameters.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use nestdrawer_engine::{CallbackHost, NavigationController, dispatch_effects};
//! use nestdrawer_types::{Menu, MenuEntry};
//!
//! let menu = Arc::new(Menu::new(vec![
//!     MenuEntry::new("a", "A").with_children(vec![MenuEntry::new("a1", "A1")]),
//!     MenuEntry::new("b", "B").with_action("say-hello"),
//! ]));
//! let mut controller = NavigationController::new(menu);
//! let mut host = CallbackHost::new();
//! host.bind("say-hello", || {
//!     println!("hello");
//!     Ok(())
//! });
//!
//! let b = controller.visible_entries()[1].clone();
//! dispatch_effects(controller.interact(&b), &mut host)?;
//! # Ok::<(), nestdrawer_engine::DispatchError>(())
//! ```
//!
//! [`Effect`]: nestdrawer_types::Effect

pub mod controller;
pub mod dispatch;
pub mod resolver;
pub mod transition;

pub use controller::NavigationController;
pub use dispatch::{CallbackHost, DispatchError, DrawerHost, dispatch_effects};
pub use resolver::{is_valid_path, resolve, resolve_trail};
pub use transition::{CubicBezier, HeightTransition, PanelTransition, STANDARD_EASING, SlideFrame};
