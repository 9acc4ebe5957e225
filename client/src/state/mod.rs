//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`route`, `location`, `theme`, `panel`) so
//! components depend on small focused models that are testable without a
//! browser or a reactive runtime.

pub mod location;
pub mod panel;
pub mod route;
pub mod theme;
