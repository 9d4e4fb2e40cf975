//! Presentation
//!
//! Formatting helpers and the per-region view models drawn by the
//! terminal dashboard and printed by the CLI.

pub mod format;
pub mod regions;

pub use regions::{camera_caption, CountryRow, Delta, FooterView, MarkerView, Stat, APP_TITLE};
