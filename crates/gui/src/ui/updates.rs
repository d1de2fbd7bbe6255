#![forbid(unsafe_code)]

use eframe::egui;
use tracing::info;

use crate::model::{ToastKind, UiUpdate};
use crate::RelatoGuiApp;

/// Drains background-task results, bounded per frame. State mutation only
/// happens here on the UI thread, so a delete finishing while a refresh is
/// still in flight cannot tear the list — the later wholesale replacement
/// simply wins.
pub(crate) fn process_updates(app: &mut RelatoGuiApp, ctx: &egui::Context) {
    let mut processed = 0usize;
    let mut pending_toasts: Vec<(String, ToastKind)> = Vec::new();
    while processed < 64 {
        let Ok(update) = app.updates_rx.try_recv() else { break };
        processed += 1;
        match update {
            UiUpdate::ReportsLoaded(reports) => {
                info!(count = reports.len(), "ui: reports applied");
                app.timeline.loading = false;
                app.timeline.error = None;
                app.timeline.state.set_reports(reports);
            }
            UiUpdate::ReportsError(message) => {
                app.timeline.loading = false;
                app.timeline.error = Some(message);
            }
            UiUpdate::SubmitDone(outcome) => {
                app.submit.running = false;
                app.submit.success = Some(outcome);
                // Next timeline visit refetches immediately
                app.timeline.last_fetched = None;
            }
            UiUpdate::SubmitError { message } => {
                app.submit.running = false;
                pending_toasts.push((message, ToastKind::Error));
            }
            UiUpdate::DeleteDone { id } => {
                if app.timeline.deleting == Some(id) {
                    app.timeline.deleting = None;
                }
                app.timeline.state.remove(id);
                pending_toasts.push(("Relatório excluído com sucesso!".to_string(), ToastKind::Success));
            }
            UiUpdate::DeleteError { id, message } => {
                if app.timeline.deleting == Some(id) {
                    app.timeline.deleting = None;
                }
                pending_toasts.push((message, ToastKind::Error));
            }
            UiUpdate::PhotoLoaded { url, bytes } => {
                app.pending_photos.remove(&url);
                app.textures.insert_bytes(ctx, &url, &bytes);
            }
            UiUpdate::PhotoError { url, message } => {
                info!(url = %url, error = %message, "ui: photo fetch failed");
                app.pending_photos.remove(&url);
                app.textures.mark_failed(&url);
            }
        }
    }
    for (text, kind) in pending_toasts {
        app.toast(text, kind);
    }
    if processed > 0 {
        ctx.request_repaint();
    }
}
