//! Reader window view state
//!
//! Everything here is presentation-only; selection and script live in the
//! [`InteractionController`](crate::reader::InteractionController).

use crate::reader::SurfaceCommand;

/// Bottom sheet position over a list of snap points
#[derive(Debug, Clone)]
pub struct SheetState {
    /// Heights as fractions of the window, ascending
    snap_points: Vec<f32>,
    /// Current snap point, `None` when closed
    position: Option<usize>,
    /// Height while the handle is being dragged
    drag_fraction: Option<f32>,
}

impl SheetState {
    pub fn new(snap_points: &[f32]) -> Self {
        let mut snap_points: Vec<f32> = snap_points
            .iter()
            .copied()
            .filter(|p| *p > 0.0 && *p <= 1.0)
            .collect();
        snap_points.sort_by(|a, b| a.total_cmp(b));
        if snap_points.is_empty() {
            snap_points.push(0.5);
        }
        Self {
            snap_points,
            position: None,
            drag_fraction: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Current height as a fraction of the window, 0 when closed
    pub fn height_fraction(&self) -> f32 {
        if let Some(fraction) = self.drag_fraction {
            return fraction;
        }
        self.position
            .and_then(|i| self.snap_points.get(i).copied())
            .unwrap_or(0.0)
    }

    pub fn apply(&mut self, command: SurfaceCommand) {
        self.drag_fraction = None;
        match command {
            SurfaceCommand::Open => {
                if self.position.is_none() {
                    self.position = Some(0);
                }
            }
            SurfaceCommand::Close => self.position = None,
            SurfaceCommand::Refresh => {}
            SurfaceCommand::SnapTo(n) => {
                self.position = Some(n.min(self.snap_points.len() - 1));
            }
        }
    }

    /// Handle dragged to `fraction` of the window height
    pub fn drag_to(&mut self, fraction: f32) {
        let top = self.snap_points.last().copied().unwrap_or(1.0);
        self.drag_fraction = Some(fraction.clamp(0.0, top));
    }

    /// Handle released; snaps to the nearest point
    ///
    /// Returns true when the sheet was pulled below half of the lowest snap
    /// point, which closes it and counts as a user dismissal.
    pub fn release(&mut self) -> bool {
        let Some(fraction) = self.drag_fraction.take() else {
            return false;
        };
        if fraction < self.snap_points[0] / 2.0 {
            self.position = None;
            return true;
        }
        let nearest = self
            .snap_points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - fraction).abs().total_cmp(&(*b - fraction).abs()))
            .map(|(i, _)| i);
        self.position = nearest;
        false
    }
}

/// State of the reader window that is not part of the reader core
pub struct ReaderViewState {
    /// Contents of the path field
    pub path_input: String,
    pub sheet: SheetState,
    /// Uploaded image, `None` until the current image decodes
    pub texture: Option<egui::TextureHandle>,
    /// Popover rect from the previous frame, used to ignore taps on it
    pub popover_rect: Option<egui::Rect>,
}

impl ReaderViewState {
    pub fn new(snap_points: &[f32]) -> Self {
        Self {
            path_input: String::new(),
            sheet: SheetState::new(snap_points),
            texture: None,
            popover_rect: None,
        }
    }
}
