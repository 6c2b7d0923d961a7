//! Shared UI crate for Perfboard. Snapshot model, transforms, charts and the
//! dashboard page live here; the `web` and `desktop` crates only launch it.

pub mod charts;
pub mod components;
pub mod core;
pub mod hooks;
pub mod i18n;
pub mod views;

pub use views::{Dashboard, LocalizedDashboard};
