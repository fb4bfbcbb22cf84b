//! Reader UI Module
//!
//! The eframe application: image with tappable regions, a bottom reading
//! sheet, and the exit confirmation dialog.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::{run_reader, ReaderApp};
pub use state::{ReaderViewState, SheetState};
