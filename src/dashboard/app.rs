//! Reader application entry point

use crossbeam_channel::Receiver;
use eframe::egui;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::annotation::{Annotator, ScriptMode};
use crate::dashboard::components::{dropped_image, render_bottom_sheet, render_exit_dialog, render_toolbar};
use crate::dashboard::state::ReaderViewState;
use crate::dashboard::theme;
use crate::dashboard::views::{render_image_view, render_loading_view, render_reading_view};
use crate::lexicon::spawn_lexicon_warmup;
use crate::overlay::RegionStyle;
use crate::reader::{Applied, Effect, PickOutcome, ReaderSession};
use crate::shared::{reader_channel, MessageSender, ReaderMessage, SharedAppState};
use crate::vision::{create_recognizer, spawn_image_job, TextRecognizer};

/// The reader window
pub struct ReaderApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Reader core for the current image
    session: ReaderSession,
    /// Window-only state
    view: ReaderViewState,
    /// Background completions
    receiver: Receiver<ReaderMessage>,
    sender: MessageSender,
    recognizer: Arc<dyn TextRecognizer>,
    /// Available once the lexicon has warmed up
    annotator: Option<Annotator>,
    region_style: RegionStyle,
    /// Image passed on the command line, opened once the window is up
    initial_image: Option<PathBuf>,
}

impl ReaderApp {
    /// Create the reader and start warming up the lexicon
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        shared_state: Arc<RwLock<SharedAppState>>,
        initial_image: Option<PathBuf>,
    ) -> Self {
        let config = shared_state.read().config.clone();

        theme::apply_theme(&cc.egui_ctx);
        theme::install_cjk_font(&cc.egui_ctx, config.reader.font_path.as_deref());

        let ctx = cc.egui_ctx.clone();
        let (sender, receiver) = reader_channel();
        let sender = sender.with_waker(move || ctx.request_repaint());

        spawn_lexicon_warmup(config.lexicon.clone(), sender.clone());

        Self {
            shared_state,
            session: ReaderSession::new(config.general.initial_script(), config.reader.region_padding),
            view: ReaderViewState::new(&config.reader.sheet_snap_points),
            receiver,
            sender,
            recognizer: Arc::from(create_recognizer(&config.recognition)),
            annotator: None,
            region_style: RegionStyle::default(),
            initial_image,
        }
    }

    /// Create eframe options for the reader window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([900.0, 800.0])
                .with_min_inner_size([400.0, 500.0])
                .with_title("Hanzi Reader")
                .with_drag_and_drop(true),
            ..Default::default()
        }
    }

    /// Start loading a picked image
    fn pick(&mut self, outcome: PickOutcome) {
        if let PickOutcome::Picked(path) = &outcome {
            self.view.path_input = path.display().to_string();
        }

        let (job, effects) = self.session.begin_pick(outcome);
        self.apply_effects(effects);
        let Some(job) = job else {
            return;
        };

        self.view.texture = None;
        let settings = self.shared_state.read().config.clone();

        spawn_image_job(
            job.path,
            job.generation,
            self.recognizer.clone(),
            settings.recognition.script_hint,
            settings.reader.max_texture_side,
            self.sender.clone(),
        );
    }

    /// Apply completions posted by background jobs
    fn drain_messages(&mut self, ctx: &egui::Context) {
        while let Ok(message) = self.receiver.try_recv() {
            match self.session.apply(message) {
                Applied::Stale => debug!("Dropped result for an older image"),
                Applied::Image(image) => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(image.texture_size, &image.rgba);
                    self.view.texture =
                        Some(ctx.load_texture("reader_image", color_image, egui::TextureOptions::LINEAR));
                }
                Applied::Regions(effects) => self.apply_effects(effects),
                Applied::Failed(message) => error!("Reader error: {}", message),
                Applied::Lexicons(lexicons) => {
                    let cache_size = self.shared_state.read().config.lexicon.annotation_cache_size;
                    self.annotator = Some(Annotator::from_lexicons(lexicons, cache_size));
                    info!("Lexicon ready");
                }
            }
        }
    }

    /// Start in the script that was showing when the reader closed
    fn remember_script(&self) {
        let mut state = self.shared_state.write();
        state.config.general.start_in_cantonese = self.session.controller().script() == ScriptMode::Cantonese;
        if let Err(e) = state.persist_config() {
            warn!("Failed to save configuration: {}", e);
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Surface(command) => self.view.sheet.apply(command),
                Effect::ConfirmExit => debug!("Exit confirmation requested"),
            }
        }
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages(ctx);

        if self.annotator.is_none() {
            egui::CentralPanel::default().show(ctx, render_loading_view);
            return;
        }

        if let Some(path) = self.initial_image.take() {
            self.pick(PickOutcome::Picked(path));
        }
        if let Some(outcome) = dropped_image(ctx) {
            self.pick(outcome);
        }

        // Escape is the hardware back button
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && !self.session.controller().exit_pending() {
            let effects = self.session.controller_mut().back_pressed();
            self.apply_effects(effects);
        }

        let picked = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let outcome = render_toolbar(
                    ui,
                    &mut self.view.path_input,
                    self.session.status(),
                    self.session.controller().regions().len(),
                );
                ui.add_space(4.0);
                outcome
            })
            .inner;
        if let Some(outcome) = picked {
            self.pick(outcome);
        }

        let annotated = match (&self.annotator, self.session.controller().selected_region()) {
            (Some(annotator), Some(region)) => {
                Some(annotator.annotate(&region.text, self.session.controller().script()))
            }
            _ => None,
        };
        let page_turn_zone = self.shared_state.read().config.reader.page_turn_zone;

        let mut sheet_effects = Vec::new();
        let controller = self.session.controller_mut();
        let popover_rect = &mut self.view.popover_rect;
        let dismissed = render_bottom_sheet(ctx, &mut self.view.sheet, |ui| {
            sheet_effects = render_reading_view(ui, controller, annotated.as_ref(), page_turn_zone, popover_rect);
        });
        if dismissed {
            self.session.controller_mut().surface_dismissed();
            self.view.popover_rect = None;
        }
        self.apply_effects(sheet_effects);

        let image_effects = egui::CentralPanel::default()
            .show(ctx, |ui| {
                render_image_view(ui, &mut self.session, self.view.texture.as_ref(), &self.region_style)
            })
            .inner;
        self.apply_effects(image_effects);

        if self.session.controller().exit_pending() {
            if let Some(confirmed) = render_exit_dialog(ctx) {
                if self.session.controller_mut().resolve_exit(confirmed) {
                    self.remember_script();
                    info!("Exiting");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }
}

/// Run the reader application
pub fn run_reader(
    shared_state: Arc<RwLock<SharedAppState>>,
    initial_image: Option<PathBuf>,
) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Hanzi Reader",
        ReaderApp::options(),
        Box::new(move |cc| Ok(Box::new(ReaderApp::new(cc, shared_state, initial_image)))),
    )
}
