pub mod config;
pub mod error;
pub mod menu;
pub mod menufile;
pub mod nav;
pub mod palette;
pub mod render;
pub mod theme;

pub use error::NavError;
pub use menu::{Action, Actionable, Menu, MenuItem, Selection};
pub use nav::{EofPolicy, ExitReason, Navigator, Outcome};
pub use render::{ColorMode, Renderer};
