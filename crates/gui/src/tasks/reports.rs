#![forbid(unsafe_code)]

use std::time::Instant;

use tracing::info;

use crate::model::UiUpdate;
use crate::RelatoGuiApp;

impl RelatoGuiApp {
    /// Refetches the list with the active filter. `last_fetched` is stamped
    /// at start so the periodic refresh keys off request time; overlapping
    /// requests are neither coalesced nor cancelled (last-write-wins).
    pub(crate) fn start_load_reports_task(&mut self) {
        self.timeline.loading = true;
        self.timeline.error = None;
        self.timeline.last_fetched = Some(Instant::now());
        let filter = self.timeline.state.filter();
        let api = self.api.clone();
        let tx = self.updates_tx.clone();
        info!(turno = ?filter.map(|s| s.code()), "timeline: load start");
        tokio::spawn(async move {
            match api.list_reports(filter).await {
                Ok(reports) => {
                    info!(count = reports.len(), "timeline: load ok");
                    let _ = tx.send(UiUpdate::ReportsLoaded(reports));
                }
                Err(e) => {
                    info!(error = %e, "timeline: load failed");
                    let _ = tx.send(UiUpdate::ReportsError(
                        "Erro ao carregar relatórios. Tente novamente.".to_string(),
                    ));
                }
            }
        });
    }

    /// DELETE after the confirm dialog; the card's button stays disabled
    /// until the server answers. Nothing is removed client-side before the
    /// server acknowledges.
    pub(crate) fn start_delete_task(&mut self, id: i64) {
        if self.timeline.deleting.is_some() {
            return;
        }
        self.timeline.deleting = Some(id);
        let api = self.api.clone();
        let tx = self.updates_tx.clone();
        info!(id, "timeline: delete start");
        tokio::spawn(async move {
            match api.delete_report(id).await {
                Ok(()) => {
                    info!(id, "timeline: delete ok");
                    let _ = tx.send(UiUpdate::DeleteDone { id });
                }
                Err(e) => {
                    info!(id, error = %e, "timeline: delete failed");
                    let message = e
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| "Erro ao excluir relatório. Tente novamente.".to_string());
                    let _ = tx.send(UiUpdate::DeleteError { id, message });
                }
            }
        });
    }

    /// Fetches a photo's bytes once; the decoded texture lands in the cache
    /// via `process_updates`.
    pub(crate) fn request_photo(&mut self, url: &str) {
        if self.textures.contains(url)
            || self.textures.is_failed(url)
            || self.pending_photos.contains(url)
        {
            return;
        }
        self.pending_photos.insert(url.to_string());
        let api = self.api.clone();
        let tx = self.updates_tx.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            match api.fetch_photo(&url).await {
                Ok(bytes) => {
                    let _ = tx.send(UiUpdate::PhotoLoaded { url, bytes });
                }
                Err(e) => {
                    let _ = tx.send(UiUpdate::PhotoError { url, message: e.to_string() });
                }
            }
        });
    }
}
