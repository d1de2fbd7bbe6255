#![forbid(unsafe_code)]

use std::time::Instant;

use relato_api::CreateOutcome;
use relato_core::{ReportRecord, TimelineState};

/// Messages sent from background tasks back to the UI thread, drained once
/// per frame by `ui::updates::process_updates`.
#[derive(Debug)]
pub enum UiUpdate {
    ReportsLoaded(Vec<ReportRecord>),
    ReportsError(String),
    SubmitDone(CreateOutcome),
    SubmitError { message: String },
    DeleteDone { id: i64 },
    DeleteError { id: i64, message: String },
    PhotoLoaded { url: String, bytes: Vec<u8> },
    PhotoError { url: String, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warn,
    Error,
}

pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub created: Instant,
    pub duration_ms: u64,
}

/// Submission side of the wizard: in-flight flag and, after a success,
/// the outcome backing the confirmation modal.
#[derive(Default)]
pub struct SubmitState {
    pub running: bool,
    pub success: Option<CreateOutcome>,
}

/// Timeline page state plus its presentation flags.
#[derive(Default)]
pub struct TimelineUi {
    pub state: TimelineState,
    pub loading: bool,
    pub error: Option<String>,
    /// Report id with a delete in flight; its button is disabled meanwhile.
    pub deleting: Option<i64>,
    pub confirm_delete: Option<i64>,
    /// Set when a fetch *starts*; the periodic refresh keys off this, so
    /// overlapping completions stay last-write-wins.
    pub last_fetched: Option<Instant>,
}

/// Confirmation modal text: pluralized photo count when the server reported
/// attachments, generic otherwise.
pub fn success_message(fotos_count: u32) -> String {
    if fotos_count > 0 {
        format!(
            "Relatório enviado com sucesso! {} foto(s) anexada(s).",
            fotos_count
        )
    } else {
        "Relatório enviado com sucesso!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_message_varies_on_photo_count() {
        assert_eq!(success_message(0), "Relatório enviado com sucesso!");
        assert_eq!(
            success_message(3),
            "Relatório enviado com sucesso! 3 foto(s) anexada(s)."
        );
    }
}
