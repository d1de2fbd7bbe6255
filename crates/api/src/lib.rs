//! Relato public API façade.
//!
//! This crate defines the trait the GUI depends on, the HTTP implementation
//! speaking the report service's wire contract, and an in-memory mock for
//! tests. Paths and field names must match the service exactly:
//! `POST /api/reports` (multipart), `GET /api/reports[?turno=N]`,
//! `DELETE /api/reports/{id}`.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use relato_core::{NewReport, ReportRecord, Shift};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// API errors, bucketed the way the UI surfaces them: local validation,
/// transport failures, server-reported failures, and undecodable bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("server ({status}): {}", .message.as_deref().unwrap_or("falha reportada pelo servidor"))]
    Server { status: u16, message: Option<String> },
    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server-provided message, when one was carried in the response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Successful `POST /api/reports` outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOutcome {
    pub message: Option<String>,
    pub fotos_count: u32,
}

/// Declarative report-service surface consumed by the GUI.
#[async_trait]
pub trait ReportsApi: Send + Sync {
    /// Multipart submission: `turno`, `usuario`, `texto`, then one `fotos`
    /// part per attachment in set order.
    async fn create_report(&self, report: NewReport) -> ApiResult<CreateOutcome>;

    /// Lists reports, optionally filtered server-side by shift.
    async fn list_reports(&self, filter: Option<Shift>) -> ApiResult<Vec<ReportRecord>>;

    async fn delete_report(&self, id: i64) -> ApiResult<()>;

    /// Raw bytes of a photo URL from a report record. Relative URLs are
    /// resolved against the service base.
    async fn fetch_photo(&self, url: &str) -> ApiResult<Vec<u8>>;
}

// ----------------- Wire types -----------------

#[derive(Debug, Deserialize)]
struct CreateReportResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    #[serde(default)]
    fotos_count: u32,
}

#[derive(Debug, Deserialize)]
struct DeleteReportResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

// ----------------- HTTP implementation -----------------

/// Implementation backed by the report service over HTTP.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Base URL from `RELATO_API_URL`, falling back to localhost.
    pub fn from_env() -> ApiResult<Self> {
        let base = std::env::var("RELATO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn photo_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.url(url)
        }
    }
}

#[async_trait]
impl ReportsApi for HttpApi {
    async fn create_report(&self, report: NewReport) -> ApiResult<CreateOutcome> {
        let t0 = Instant::now();
        let fotos = report.fotos.len();
        info!(turno = report.shift.code(), fotos, "api: create_report start");
        let mut form = reqwest::multipart::Form::new()
            .text("turno", report.shift.code().to_string())
            .text("usuario", report.usuario)
            .text("texto", report.texto);
        for foto in report.fotos {
            let part = reqwest::multipart::Part::bytes(foto.data)
                .file_name(foto.name.clone())
                .mime_str(&foto.mime_type)
                .map_err(|e| ApiError::Validation(format!("{}: {}", foto.name, e)))?;
            form = form.part("fotos", part);
        }
        let resp = self
            .client
            .post(self.url("/api/reports"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<CreateReportResponse>()
                .await
                .ok()
                .and_then(|b| b.message);
            info!(status = status.as_u16(), took_ms = %t0.elapsed().as_millis(), "api: create_report failed");
            return Err(ApiError::Server { status: status.as_u16(), message });
        }
        let body: CreateReportResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if !body.success {
            return Err(ApiError::Server { status: status.as_u16(), message: body.message });
        }
        info!(fotos = body.fotos_count, took_ms = %t0.elapsed().as_millis(), "api: create_report ok");
        Ok(CreateOutcome { message: body.message, fotos_count: body.fotos_count })
    }

    async fn list_reports(&self, filter: Option<Shift>) -> ApiResult<Vec<ReportRecord>> {
        let t0 = Instant::now();
        let mut req = self.client.get(self.url("/api/reports"));
        if let Some(shift) = filter {
            req = req.query(&[("turno", shift.code().to_string())]);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            info!(status = status.as_u16(), took_ms = %t0.elapsed().as_millis(), "api: list_reports failed");
            return Err(ApiError::Server { status: status.as_u16(), message: None });
        }
        let reports: Vec<ReportRecord> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        info!(count = reports.len(), turno = ?filter.map(Shift::code), took_ms = %t0.elapsed().as_millis(), "api: list_reports ok");
        Ok(reports)
    }

    async fn delete_report(&self, id: i64) -> ApiResult<()> {
        let t0 = Instant::now();
        info!(id, "api: delete_report start");
        let resp = self
            .client
            .delete(self.url(&format!("/api/reports/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<DeleteReportResponse>()
                .await
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Server { status: status.as_u16(), message });
        }
        let body: DeleteReportResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if !body.success {
            return Err(ApiError::Server { status: status.as_u16(), message: body.message });
        }
        info!(id, took_ms = %t0.elapsed().as_millis(), "api: delete_report ok");
        Ok(())
    }

    async fn fetch_photo(&self, url: &str) -> ApiResult<Vec<u8>> {
        let resp = self
            .client
            .get(self.photo_url(url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server { status: status.as_u16(), message: None });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

// ----------------- Mock implementation -----------------

/// In-memory implementation for tests. Holds its own report list, hands
/// out sequential ids, and can be flipped into a failing mode.
#[derive(Default)]
pub struct MockApi {
    reports: Mutex<Vec<ReportRecord>>,
    photos: Mutex<HashMap<String, Vec<u8>>>,
    failure: Mutex<Option<String>>,
    next_id: AtomicI64,
}

impl MockApi {
    pub fn new() -> Self {
        Self { next_id: AtomicI64::new(1), ..Self::default() }
    }

    pub fn with_reports(reports: Vec<ReportRecord>) -> Self {
        let next = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            reports: Mutex::new(reports),
            next_id: AtomicI64::new(next),
            ..Self::default()
        }
    }

    /// While set, every call fails as a server-reported error carrying
    /// this message.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(str::to_string);
    }

    pub fn insert_photo(&self, url: &str, bytes: Vec<u8>) {
        self.photos.lock().unwrap().insert(url.to_string(), bytes);
    }

    fn check_failure(&self) -> ApiResult<()> {
        if let Some(msg) = self.failure.lock().unwrap().clone() {
            return Err(ApiError::Server { status: 500, message: Some(msg) });
        }
        Ok(())
    }
}

#[async_trait]
impl ReportsApi for MockApi {
    async fn create_report(&self, report: NewReport) -> ApiResult<CreateOutcome> {
        self.check_failure()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let fotos_count = report.fotos.len() as u32;
        let fotos_urls = report
            .fotos
            .iter()
            .map(|f| format!("/static/uploads/{}-{}", id, f.name))
            .collect();
        let record = ReportRecord {
            id,
            usuario: report.usuario,
            turno: report.shift.code(),
            turno_nome: report.shift.label().to_string(),
            texto: report.texto,
            data_criacao: relato_core::timefmt::now_local()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            fotos_urls,
        };
        self.reports.lock().unwrap().insert(0, record);
        Ok(CreateOutcome {
            message: Some("Relatório criado com sucesso!".to_string()),
            fotos_count,
        })
    }

    async fn list_reports(&self, filter: Option<Shift>) -> ApiResult<Vec<ReportRecord>> {
        self.check_failure()?;
        let reports = self.reports.lock().unwrap();
        Ok(reports
            .iter()
            .filter(|r| filter.map(|s| s.code() == r.turno).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn delete_report(&self, id: i64) -> ApiResult<()> {
        self.check_failure()?;
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        if reports.len() == before {
            return Err(ApiError::Server {
                status: 404,
                message: Some("Relatório não encontrado".to_string()),
            });
        }
        Ok(())
    }

    async fn fetch_photo(&self, url: &str) -> ApiResult<Vec<u8>> {
        self.check_failure()?;
        self.photos
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(ApiError::Server { status: 404, message: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relato_core::Attachment;

    fn new_report(shift: Shift, fotos: Vec<Attachment>) -> NewReport {
        NewReport {
            shift,
            usuario: "Ana".into(),
            texto: "Inspeção concluída".into(),
            fotos,
        }
    }

    #[test]
    fn photo_url_resolves_relative_paths_against_the_base() {
        let api = HttpApi::new("http://svc:8000/").unwrap();
        assert_eq!(
            api.photo_url("/static/uploads/a.jpg"),
            "http://svc:8000/static/uploads/a.jpg"
        );
        assert_eq!(
            api.photo_url("https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
    }

    #[test]
    fn create_response_tolerates_missing_fields() {
        let body: CreateReportResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(body.success);
        assert_eq!(body.fotos_count, 0);
        assert!(body.message.is_none());
    }

    #[tokio::test]
    async fn mock_create_then_list_round_trip() {
        let api = MockApi::new();
        let outcome = api
            .create_report(new_report(
                Shift::Segundo,
                vec![Attachment::new("a.png", "image/png", vec![1, 2, 3])],
            ))
            .await
            .unwrap();
        assert_eq!(outcome.fotos_count, 1);
        let all = api.list_reports(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].turno, 2);
        assert_eq!(all[0].fotos_urls.len(), 1);
    }

    #[tokio::test]
    async fn mock_list_filters_by_shift() {
        let api = MockApi::new();
        api.create_report(new_report(Shift::Primeiro, Vec::new())).await.unwrap();
        api.create_report(new_report(Shift::Segundo, Vec::new())).await.unwrap();
        let first = api.list_reports(Some(Shift::Primeiro)).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].turno, 1);
        let all = api.list_reports(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn mock_delete_removes_exactly_one() {
        let api = MockApi::new();
        api.create_report(new_report(Shift::Primeiro, Vec::new())).await.unwrap();
        api.create_report(new_report(Shift::Primeiro, Vec::new())).await.unwrap();
        let ids: Vec<_> = api.list_reports(None).await.unwrap().iter().map(|r| r.id).collect();
        api.delete_report(ids[0]).await.unwrap();
        let rest = api.list_reports(None).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert!(matches!(
            api.delete_report(ids[0]).await,
            Err(ApiError::Server { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn mock_failure_mode_carries_the_server_message() {
        let api = MockApi::new();
        api.set_failure(Some("banco indisponível"));
        let err = api.list_reports(None).await.unwrap_err();
        assert_eq!(err.server_message(), Some("banco indisponível"));
        api.set_failure(None);
        assert!(api.list_reports(None).await.is_ok());
    }

    #[tokio::test]
    async fn mock_fetch_photo_returns_stored_bytes() {
        let api = MockApi::new();
        api.insert_photo("/static/uploads/a.jpg", vec![9, 9]);
        assert_eq!(api.fetch_photo("/static/uploads/a.jpg").await.unwrap(), vec![9, 9]);
        assert!(api.fetch_photo("/missing.jpg").await.is_err());
    }
}
