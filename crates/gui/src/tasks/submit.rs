#![forbid(unsafe_code)]

use tracing::info;

use crate::model::{ToastKind, UiUpdate};
use crate::RelatoGuiApp;

impl RelatoGuiApp {
    /// Form submit: validate locally, flip the busy indicator and POST in
    /// the background. The indicator is cleared in `process_updates` on
    /// every outcome, success or not.
    pub(crate) fn start_submit_task(&mut self) {
        if self.submit.running {
            return;
        }
        let report = match self.wizard.build_report() {
            Ok(r) => r,
            Err(e) => {
                self.toast(e.to_string(), ToastKind::Error);
                return;
            }
        };
        self.submit.running = true;
        let api = self.api.clone();
        let tx = self.updates_tx.clone();
        info!(turno = report.shift.code(), fotos = report.fotos.len(), "submit: start");
        tokio::spawn(async move {
            match api.create_report(report).await {
                Ok(outcome) => {
                    info!(fotos = outcome.fotos_count, "submit: ok");
                    let _ = tx.send(UiUpdate::SubmitDone(outcome));
                }
                Err(e) => {
                    info!(error = %e, "submit: failed");
                    let message = e
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| "Erro ao enviar relatório. Tente novamente.".to_string());
                    let _ = tx.send(UiUpdate::SubmitError { message });
                }
            }
        });
    }
}
