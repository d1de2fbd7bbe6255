#![forbid(unsafe_code)]

//! Relato GUI: the submission wizard and the report timeline in one
//! eframe/egui shell. Background tasks run on the Tokio runtime and report
//! back over a channel drained once per frame; the UI never blocks on the
//! network.

use std::collections::HashSet;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::info;

use relato_api::ReportsApi;
use relato_core::wizard::WizardStep;
use relato_core::{Attachment, WizardState};

mod intake;
mod model;
mod tasks;
mod textures;
mod ui;

use model::{SubmitState, TimelineUi, Toast, ToastKind, UiUpdate};
use textures::TextureStore;

pub(crate) const SHIFT_ADVANCE_DELAY: Duration = Duration::from_millis(600);
const DEFAULT_REFRESH_SECS: u64 = 30;

/// Entry point used by the app binary to launch the GUI.
pub fn run_native(api: Arc<dyn ReportsApi>) -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    let app = RelatoGuiApp::new(api);
    eframe::run_native("Relatórios por Turno", options, Box::new(|_cc| Ok(Box::new(app))))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Page {
    Wizard,
    Timeline,
}

pub struct RelatoGuiApp {
    api: Arc<dyn ReportsApi>,
    page: Page,
    // wizard + pacing
    wizard: WizardState,
    advance_at: Option<Instant>,
    focus_name: bool,
    focus_desc: bool,
    submit: SubmitState,
    // timeline
    timeline: TimelineUi,
    photo_modal: Option<String>,
    pending_photos: HashSet<String>,
    // presentation
    toasts: Vec<Toast>,
    textures: TextureStore,
    // background task results
    updates_tx: mpsc::Sender<UiUpdate>,
    updates_rx: mpsc::Receiver<UiUpdate>,
    refresh_secs: u64,
}

impl RelatoGuiApp {
    pub fn new(api: Arc<dyn ReportsApi>) -> Self {
        info!("relato gui starting");
        let (updates_tx, updates_rx) = mpsc::channel::<UiUpdate>();
        let refresh_secs = std::env::var("RELATO_REFRESH_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REFRESH_SECS);
        Self {
            api,
            page: Page::Wizard,
            wizard: WizardState::new(),
            advance_at: None,
            focus_name: false,
            focus_desc: false,
            submit: SubmitState::default(),
            timeline: TimelineUi::default(),
            photo_modal: None,
            pending_photos: HashSet::new(),
            toasts: Vec::new(),
            textures: TextureStore::default(),
            updates_tx,
            updates_rx,
            refresh_secs,
        }
    }

    /// Funnel for every intake channel: the set validates and dedups, the
    /// rejections become alerts naming the offending file.
    pub(crate) fn add_attachment_candidates(&mut self, candidates: Vec<Attachment>) {
        if candidates.is_empty() {
            return;
        }
        let rejected = self.wizard.attachments.add_files(candidates);
        for r in rejected {
            self.toast(r.message(), ToastKind::Error);
        }
    }

    /// Runs the 1→2 swap scheduled by a shift click once its delay elapses.
    fn handle_pending_advance(&mut self, ctx: &egui::Context) {
        let Some(at) = self.advance_at else { return };
        let now = Instant::now();
        if now >= at {
            self.advance_at = None;
            match self.wizard.go_to(WizardStep::NameEntry) {
                Ok(()) => self.focus_name = true,
                Err(e) => self.toast(e.to_string(), ToastKind::Error),
            }
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(at - now);
        }
    }

    /// Drag-and-drop intake. This channel pre-filters to image files;
    /// anything else is ignored here rather than rejected.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let mut candidates = Vec::new();
        for f in dropped {
            if let Some(bytes) = f.bytes {
                if f.mime.starts_with("image/") {
                    candidates.push(Attachment::new(f.name.clone(), f.mime.clone(), bytes.to_vec()));
                }
                continue;
            }
            if let Some(path) = f.path {
                if intake::is_image_path(&path) {
                    if let Some(att) = intake::attachment_from_path(&path) {
                        candidates.push(att);
                    }
                }
            }
        }
        info!(count = candidates.len(), "intake: dropped files");
        self.add_attachment_candidates(candidates);
    }

    /// Clipboard intake, active only on the attachment step. A non-image
    /// clipboard leaves the paste to the focused widget.
    fn handle_paste(&mut self, ctx: &egui::Context) {
        let pasted = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::V));
        if !pasted {
            return;
        }
        if let Some(att) = intake::clipboard_image_attachment() {
            info!(name = %att.name, size = att.size(), "intake: clipboard image");
            self.add_attachment_candidates(vec![att]);
        }
    }

    /// Periodic refetch while the timeline is visible and the window is
    /// focused. Keyed off request start time, so a slow response does not
    /// pile up requests frame after frame; completions stay last-write-wins.
    fn autorefresh_timeline(&mut self, ctx: &egui::Context) {
        let focused = ctx.input(|i| i.viewport().focused.unwrap_or(true));
        let due = match self.timeline.last_fetched {
            Some(t) => t.elapsed().as_secs() >= self.refresh_secs,
            None => true,
        };
        if focused && due {
            self.start_load_reports_task();
        }
        ctx.request_repaint_after(Duration::from_secs(1));
    }

    /// Success-modal dismissal: back to a pristine wizard on step 1.
    pub(crate) fn dismiss_success(&mut self) {
        self.submit.success = None;
        let keys: Vec<String> = self
            .wizard
            .attachments
            .iter()
            .map(intake::attachment_texture_key)
            .collect();
        for key in keys {
            self.textures.remove(&key);
        }
        self.wizard.reset();
        self.advance_at = None;
        self.focus_name = false;
        self.focus_desc = false;
        info!("wizard: reset after success");
    }
}

impl eframe::App for RelatoGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::updates::process_updates(self, ctx);
        self.handle_pending_advance(ctx);

        if self.page == Page::Wizard
            && self.wizard.step() == WizardStep::ReportForm
            && self.submit.success.is_none()
        {
            self.handle_dropped_files(ctx);
            self.handle_paste(ctx);
        }
        if self.page == Page::Timeline {
            self.autorefresh_timeline(ctx);
        }

        ui::topbar::ui_topbar(self, ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Wizard => ui::wizard::ui_wizard(self, ui),
            Page::Timeline => ui::timeline::ui_timeline(self, ui),
        });

        ui::wizard::ui_success_modal(self, ctx);
        ui::timeline::ui_confirm_delete(self, ctx);
        ui::photo_modal::ui_photo_modal(self, ctx);
        ui::toasts::draw_toasts(self, ctx);
    }
}
