//! Reader session
//!
//! Everything the reading screen owns on the UI thread: the current image
//! generation, measured dimensions, mapped region rectangles and the
//! interaction controller. Background completions are applied here and
//! dropped when they belong to an older image.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::controller::{Effect, InteractionController};
use super::regions::SelectionError;
use crate::annotation::ScriptMode;
use crate::lexicon::Lexicons;
use crate::overlay::{ContainFit, ImageDimensions, LayoutDimensions, LayoutRect};
use crate::shared::ReaderMessage;
use crate::vision::DecodedImage;

/// Result of asking the image source for a picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Cancelled,
    Failed(String),
    Picked(PathBuf),
}

/// What the reading screen should show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReaderStatus {
    /// No image chosen yet
    #[default]
    Empty,
    /// Decoding or recognizing
    Loading,
    /// Regions are ready (possibly none)
    Ready,
    /// Last pick, decode or recognition failed
    Failed(String),
}

/// A background job the caller should start for a new image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub path: PathBuf,
    pub generation: u64,
}

/// Result of applying a background message
#[derive(Debug)]
pub enum Applied {
    /// Belongs to an older image
    Stale,
    /// Upload this as the image texture
    Image(DecodedImage),
    /// Regions replaced; apply these surface effects
    Regions(Vec<Effect>),
    /// Decode or recognition failed
    Failed(String),
    /// Lexicon data is ready
    Lexicons(Arc<Lexicons>),
}

#[derive(Debug)]
pub struct ReaderSession {
    generation: u64,
    image_path: Option<PathBuf>,
    image: Option<ImageDimensions>,
    layout: Option<LayoutDimensions>,
    fit: Option<ContainFit>,
    region_rects: Vec<LayoutRect>,
    padding: f32,
    status: ReaderStatus,
    controller: InteractionController,
}

impl ReaderSession {
    pub fn new(script: ScriptMode, padding: f32) -> Self {
        Self {
            generation: 0,
            image_path: None,
            image: None,
            layout: None,
            fit: None,
            region_rects: Vec::new(),
            padding,
            status: ReaderStatus::Empty,
            controller: InteractionController::new(script),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> &ReaderStatus {
        &self.status
    }

    pub fn image_path(&self) -> Option<&PathBuf> {
        self.image_path.as_ref()
    }

    pub fn image_dimensions(&self) -> Option<ImageDimensions> {
        self.image
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    /// Start showing a newly picked image
    ///
    /// Bumps the generation so results for any previous image are ignored,
    /// and clears the regions right away. Returns the job to run, plus the
    /// effects of clearing the old selection.
    pub fn begin_pick(&mut self, outcome: PickOutcome) -> (Option<ImageJob>, Vec<Effect>) {
        match outcome {
            PickOutcome::Cancelled => (None, Vec::new()),
            PickOutcome::Failed(message) => {
                warn!("Image pick failed: {}", message);
                self.status = ReaderStatus::Failed(message);
                (None, Vec::new())
            }
            PickOutcome::Picked(path) => {
                self.generation += 1;
                info!("Picked {:?} (generation {})", path, self.generation);
                self.image_path = Some(path.clone());
                self.image = None;
                self.status = ReaderStatus::Loading;
                let effects = self.controller.set_regions(Vec::new());
                self.recompute();
                let job = ImageJob {
                    path,
                    generation: self.generation,
                };
                (Some(job), effects)
            }
        }
    }

    /// Apply a completion posted by a background job
    pub fn apply(&mut self, message: ReaderMessage) -> Applied {
        match message {
            ReaderMessage::LexiconReady(lexicons) => Applied::Lexicons(lexicons),
            ReaderMessage::ImageDecoded { generation, image } => {
                if generation != self.generation {
                    return Applied::Stale;
                }
                self.image = Some(image.dimensions);
                self.recompute();
                Applied::Image(image)
            }
            ReaderMessage::ImageFailed { generation, error } => {
                if generation != self.generation {
                    return Applied::Stale;
                }
                self.status = ReaderStatus::Failed(error.clone());
                Applied::Failed(error)
            }
            ReaderMessage::RecognitionFinished { generation, result } => {
                if generation != self.generation {
                    return Applied::Stale;
                }
                match result {
                    Ok(result) => {
                        info!("Recognized {} regions", result.blocks.len());
                        self.status = ReaderStatus::Ready;
                        let effects = self.controller.set_regions(result.blocks);
                        self.recompute();
                        Applied::Regions(effects)
                    }
                    Err(error) => {
                        self.status = ReaderStatus::Failed(error.clone());
                        Applied::Failed(error)
                    }
                }
            }
        }
    }

    /// Record the size of the image container
    pub fn set_layout(&mut self, layout: LayoutDimensions) {
        if self.layout == Some(layout) {
            return;
        }
        self.layout = Some(layout);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.fit = match (self.layout, self.image) {
            (Some(layout), Some(image)) => Some(ContainFit::new(layout, image)),
            _ => None,
        };
        self.region_rects = match &self.fit {
            Some(fit) => self
                .controller
                .regions()
                .iter()
                .map(|r| fit.map_rect(&r.frame))
                .collect(),
            None => Vec::new(),
        };
    }

    /// Where the image is drawn inside the container
    pub fn rendered_area(&self) -> Option<LayoutRect> {
        match (&self.fit, self.image) {
            (Some(fit), Some(image)) => Some(fit.rendered_area(image)),
            _ => None,
        }
    }

    /// Region rectangles in layout space, empty until both sizes are known
    pub fn region_rects(&self) -> &[LayoutRect] {
        &self.region_rects
    }

    /// Tap targets: region rectangles grown by the padding
    pub fn hit_boxes(&self) -> impl Iterator<Item = LayoutRect> + '_ {
        self.region_rects.iter().map(|r| r.expand(self.padding))
    }

    /// Topmost region whose tap target contains the point
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.region_rects
            .iter()
            .enumerate()
            .rev()
            .find(|(_, r)| r.expand(self.padding).contains(x, y))
            .map(|(i, _)| i)
    }

    /// Tap on the image at a layout point
    ///
    /// Returns `None` when the tap misses every region.
    pub fn tap_image(&mut self, x: f32, y: f32) -> Option<Result<Vec<Effect>, SelectionError>> {
        let index = self.hit_test(x, y)?;
        Some(self.controller.select(index))
    }
}
