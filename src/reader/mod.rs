//! Reader core
//!
//! Selection over recognized regions, gesture handling and per-image session
//! state. Nothing in here touches egui; the dashboard drives it.

pub mod controller;
pub mod regions;
pub mod session;

pub use controller::{Effect, InteractionController, PageDirection, SurfaceCommand, SurfaceTap};
pub use regions::{ReaderState, RegionIndex, SelectionChange, SelectionError};
pub use session::{Applied, ImageJob, PickOutcome, ReaderSession, ReaderStatus};
