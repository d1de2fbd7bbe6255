//! Relato core types and client-side state.
//!
//! Everything here is plain data plus pure state transitions: the shift
//! enum, the report record as served by the backend, the staged attachment
//! set, the submission wizard and the timeline. No I/O and no UI coupling,
//! so the whole crate is testable without a window or a server.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

pub mod attachments;
pub mod timefmt;
pub mod timeline;
pub mod wizard;

pub use attachments::{Attachment, AttachmentSet, RejectReason, Rejection, MAX_IMAGE_BYTES};
pub use timeline::TimelineState;
pub use wizard::{WizardState, WizardStep};

/// Enumerated work period selected in step 1. Codes match the backend (1..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Primeiro,
    Segundo,
    Terceiro,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Primeiro, Shift::Segundo, Shift::Terceiro];

    pub fn code(self) -> u8 {
        match self {
            Shift::Primeiro => 1,
            Shift::Segundo => 2,
            Shift::Terceiro => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Shift> {
        match code {
            1 => Some(Shift::Primeiro),
            2 => Some(Shift::Segundo),
            3 => Some(Shift::Terceiro),
            _ => None,
        }
    }

    /// Display name, matching the label the backend attaches to records.
    pub fn label(self) -> &'static str {
        match self {
            Shift::Primeiro => "1º Turno",
            Shift::Segundo => "2º Turno",
            Shift::Terceiro => "3º Turno",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Shift::Primeiro => "☀",
            Shift::Segundo => "⛅",
            Shift::Terceiro => "🌙",
        }
    }
}

/// Server-owned report record as returned by `GET /api/reports`.
///
/// `fotos_urls` is the canonical list-shaped photo field; records without
/// it decode with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: i64,
    pub usuario: String,
    pub turno: u8,
    pub turno_nome: String,
    pub texto: String,
    pub data_criacao: String,
    #[serde(default)]
    pub fotos_urls: Vec<String>,
}

/// Payload for `POST /api/reports`, assembled from wizard state at submit time.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub shift: Shift,
    pub usuario: String,
    pub texto: String,
    pub fotos: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_codes_round_trip() {
        for s in Shift::ALL {
            assert_eq!(Shift::from_code(s.code()), Some(s));
        }
        assert_eq!(Shift::from_code(0), None);
        assert_eq!(Shift::from_code(4), None);
    }

    #[test]
    fn report_record_decodes_list_shaped_photos() {
        let raw = r#"{
            "id": 7,
            "usuario": "Ana",
            "turno": 2,
            "turno_nome": "2º Turno",
            "texto": "Inspeção concluída",
            "data_criacao": "2025-03-04T08:30:00",
            "fotos_urls": ["/static/uploads/a.jpg", "/static/uploads/b.jpg"]
        }"#;
        let rec: ReportRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.id, 7);
        assert_eq!(rec.fotos_urls.len(), 2);
    }

    #[test]
    fn report_record_missing_photos_defaults_to_empty() {
        let raw = r#"{
            "id": 1,
            "usuario": "Bruno",
            "turno": 1,
            "turno_nome": "1º Turno",
            "texto": "Sem fotos",
            "data_criacao": "2025-03-04T08:30:00"
        }"#;
        let rec: ReportRecord = serde_json::from_str(raw).unwrap();
        assert!(rec.fotos_urls.is_empty());
    }
}
