//! Interaction Controller
//!
//! Single owner of the selection, open phrase and script mode. Gestures come
//! in as method calls; what the presentation surface and the host shell
//! should do comes back out as [`Effect`]s.
//!
//! The reading surface stacks a page-turn layer beneath the word glyphs, so a
//! tap on a word reaches both handlers. A word tap (or the script toggle,
//! which also sits on that layer) arms a one-shot token; the next page-layer
//! tap consumes it and does nothing else.

use tracing::debug;

use super::regions::{ReaderState, RegionIndex, SelectionChange, SelectionError};
use crate::annotation::ScriptMode;
use crate::vision::TextRegion;

/// Commands for the presentation surface (bottom sheet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCommand {
    Open,
    Close,
    Refresh,
    /// Snap to the n-th snap point
    SnapTo(usize),
}

/// Side effects produced by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Surface(SurfaceCommand),
    /// Ask the host shell whether to exit
    ConfirmExit,
}

/// One tap on the reading surface, as each of its layers saw it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceTap {
    /// The script toggle was pressed
    pub toggle: bool,
    /// Word under the tap
    pub word: Option<usize>,
    /// The tap reached the page-turn layer
    pub page_layer: bool,
    /// Page-turn zone the tap landed in
    pub zone: Option<PageDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    /// Page-turn zone hit by a tap at `x` on a surface of `width`
    ///
    /// The leftmost and rightmost `zone` fractions turn the page; the strip
    /// between them does not.
    pub fn from_tap(x: f32, width: f32, zone: f32) -> Option<Self> {
        if width <= 0.0 {
            return None;
        }
        let fraction = x / width;
        if fraction < zone {
            Some(PageDirection::Previous)
        } else if fraction > 1.0 - zone {
            Some(PageDirection::Next)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    index: RegionIndex,
    script: ScriptMode,
    tap_consumed: bool,
    exit_pending: bool,
}

fn surface_effects(change: SelectionChange, snap: bool) -> Vec<Effect> {
    let command = match (change.before, change.after) {
        (before, after) if before == after => return Vec::new(),
        (_, None) => SurfaceCommand::Close,
        (None, Some(_)) => SurfaceCommand::Open,
        (Some(_), Some(_)) => SurfaceCommand::Refresh,
    };
    let mut effects = vec![Effect::Surface(command)];
    if snap && command != SurfaceCommand::Close {
        effects.push(Effect::Surface(SurfaceCommand::SnapTo(0)));
    }
    effects
}

impl InteractionController {
    pub fn new(script: ScriptMode) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn state(&self) -> ReaderState {
        self.index.state()
    }

    pub fn script(&self) -> ScriptMode {
        self.script
    }

    pub fn regions(&self) -> &[TextRegion] {
        self.index.regions()
    }

    pub fn selected(&self) -> Option<usize> {
        self.index.selected()
    }

    pub fn selected_region(&self) -> Option<&TextRegion> {
        self.index.selected_region()
    }

    pub fn open_phrase(&self) -> Option<usize> {
        self.index.open_phrase()
    }

    /// An exit confirmation is waiting for [`resolve_exit`](Self::resolve_exit)
    pub fn exit_pending(&self) -> bool {
        self.exit_pending
    }

    /// Replace the regions of the current image
    pub fn set_regions(&mut self, regions: Vec<TextRegion>) -> Vec<Effect> {
        debug!("Replacing regions ({} new)", regions.len());
        surface_effects(self.index.set_regions(regions), false)
    }

    /// Region tapped on the image
    pub fn select(&mut self, index: usize) -> Result<Vec<Effect>, SelectionError> {
        let change = self.index.select(index)?;
        debug!("Region tap {}: {:?} -> {:?}", index, change.before, change.after);
        Ok(surface_effects(change, true))
    }

    /// Word tapped on the reading surface
    pub fn tap_word(&mut self, word: usize) -> Vec<Effect> {
        self.tap_consumed = true;
        self.index.toggle_phrase(word);
        Vec::new()
    }

    /// Tap outside an open gloss popover
    pub fn close_phrase(&mut self) {
        self.index.close_phrase();
    }

    /// Switch between pinyin and jyutping; selection is untouched
    pub fn toggle_script(&mut self) -> Vec<Effect> {
        self.tap_consumed = true;
        self.script = self.script.toggled();
        debug!("Script switched to {}", self.script.name());
        Vec::new()
    }

    /// Any tap that reached the page-turn layer, with the zone it landed in
    ///
    /// Does nothing, apart from clearing the token, when a word or toggle
    /// tap already handled this gesture.
    pub fn page_layer_tapped(&mut self, direction: Option<PageDirection>) -> Vec<Effect> {
        if std::mem::take(&mut self.tap_consumed) {
            return Vec::new();
        }
        match direction {
            Some(direction) => self.navigate(direction),
            None => Vec::new(),
        }
    }

    /// Dispatch one surface tap: toggle first, then the word, then the
    /// page-turn layer
    pub fn surface_tapped(&mut self, tap: SurfaceTap) -> Vec<Effect> {
        let phrase_was_open = self.open_phrase().is_some();
        let mut effects = Vec::new();
        if tap.toggle {
            effects.extend(self.toggle_script());
        }
        if let Some(word) = tap.word {
            effects.extend(self.tap_word(word));
        }
        if !tap.page_layer {
            return effects;
        }
        // The gloss popover is modal: a background tap only dismisses it and
        // never turns the page.
        if phrase_was_open && tap.word.is_none() && !tap.toggle {
            self.close_phrase();
        } else {
            effects.extend(self.page_layer_tapped(tap.zone));
        }
        effects
    }

    /// Page turn gesture in `direction`
    pub fn turn_page(&mut self, direction: PageDirection) -> Vec<Effect> {
        self.page_layer_tapped(Some(direction))
    }

    fn navigate(&mut self, direction: PageDirection) -> Vec<Effect> {
        let change = match direction {
            PageDirection::Previous => self.index.previous(),
            PageDirection::Next => self.index.next(),
        };
        surface_effects(change, false)
    }

    /// Hardware back: clears the selection, or asks to exit when there is none
    pub fn back_pressed(&mut self) -> Vec<Effect> {
        if self.index.selected().is_some() {
            return surface_effects(self.index.clear_selection(), false);
        }
        self.exit_pending = true;
        vec![Effect::ConfirmExit]
    }

    /// Host shell answered the exit confirmation; returns whether to exit
    pub fn resolve_exit(&mut self, confirmed: bool) -> bool {
        let pending = std::mem::take(&mut self.exit_pending);
        pending && confirmed
    }

    /// The user closed the surface directly
    pub fn surface_dismissed(&mut self) {
        self.index.clear_selection();
        self.tap_consumed = false;
    }
}
