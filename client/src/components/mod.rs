//! Reusable view components.

pub mod nav_panel;
pub mod theme_toggle;
