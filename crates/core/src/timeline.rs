//! Timeline page state: the fetched report list and the active shift filter.
//!
//! The list is replaced wholesale on every successful fetch; a filter change
//! triggers a refetch (filtering is server-side). Overlapping fetches are
//! last-write-wins, which wholesale replacement keeps safe.

#![forbid(unsafe_code)]

use crate::{ReportRecord, Shift};

/// How a card lays out its photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoLayout {
    /// Exactly one photo, shown large.
    Single,
    /// Two or more photos in a grid; `dense` above four.
    Grid { dense: bool },
}

/// Layout for a photo count; `None` means no photo block at all.
pub fn photo_layout(count: usize) -> Option<PhotoLayout> {
    match count {
        0 => None,
        1 => Some(PhotoLayout::Single),
        n => Some(PhotoLayout::Grid { dense: n > 4 }),
    }
}

/// Badge text on multi-photo grids.
pub fn photos_badge(count: usize) -> String {
    if count == 1 {
        "1 foto".to_string()
    } else {
        format!("{} fotos", count)
    }
}

#[derive(Debug, Default)]
pub struct TimelineState {
    filter: Option<Shift>,
    reports: Vec<ReportRecord>,
}

impl TimelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Option<Shift> {
        self.filter
    }

    /// Stores the exclusive filter. The caller refetches; nothing is
    /// filtered client-side.
    pub fn set_filter(&mut self, filter: Option<Shift>) {
        self.filter = filter;
    }

    pub fn reports(&self) -> &[ReportRecord] {
        &self.reports
    }

    /// Wholesale replacement after a successful fetch.
    pub fn set_reports(&mut self, reports: Vec<ReportRecord>) {
        self.reports = reports;
    }

    /// Removes the record with `id` after the server confirmed deletion.
    /// Returns whether anything was removed (a stale id is tolerated).
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| r.id != id);
        self.reports.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn count_label(&self) -> String {
        match self.reports.len() {
            0 => "Nenhum relatório".to_string(),
            1 => "1 relatório".to_string(),
            n => format!("{} relatórios", n),
        }
    }

    /// Header title, contextualized by the active filter.
    pub fn title(&self) -> String {
        match self.filter {
            Some(shift) => format!("{} - Timeline", shift.label()),
            None => "Timeline de Atividades".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64) -> ReportRecord {
        ReportRecord {
            id,
            usuario: "Ana".into(),
            turno: 1,
            turno_nome: "1º Turno".into(),
            texto: "texto".into(),
            data_criacao: "2025-03-04T08:30:00".into(),
            fotos_urls: Vec::new(),
        }
    }

    #[test]
    fn set_reports_replaces_wholesale() {
        let mut t = TimelineState::new();
        t.set_reports(vec![rec(1), rec(2)]);
        t.set_reports(vec![rec(3)]);
        assert_eq!(t.reports().len(), 1);
        assert_eq!(t.reports()[0].id, 3);
    }

    #[test]
    fn a_late_stale_fetch_still_wins_wholesale() {
        // Accepted race: an older in-flight fetch resolving after a newer
        // one simply replaces the list again. No partial merges.
        let mut t = TimelineState::new();
        t.set_reports(vec![rec(10), rec(11)]);
        t.set_reports(vec![rec(10)]);
        assert_eq!(t.reports().len(), 1);
        assert_eq!(t.reports()[0].id, 10);
    }

    #[test]
    fn remove_deletes_exactly_one_record() {
        let mut t = TimelineState::new();
        t.set_reports(vec![rec(1), rec(2), rec(3)]);
        assert!(t.remove(2));
        let ids: Vec<_> = t.reports().iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3]);
        assert!(!t.remove(2));
    }

    #[test]
    fn count_label_pluralizes() {
        let mut t = TimelineState::new();
        assert_eq!(t.count_label(), "Nenhum relatório");
        t.set_reports(vec![rec(1)]);
        assert_eq!(t.count_label(), "1 relatório");
        t.set_reports(vec![rec(1), rec(2)]);
        assert_eq!(t.count_label(), "2 relatórios");
    }

    #[test]
    fn title_reflects_the_active_filter() {
        let mut t = TimelineState::new();
        assert_eq!(t.title(), "Timeline de Atividades");
        t.set_filter(Some(Shift::Segundo));
        assert_eq!(t.title(), "2º Turno - Timeline");
        t.set_filter(None);
        assert_eq!(t.title(), "Timeline de Atividades");
    }

    #[test]
    fn photo_layout_rules() {
        assert_eq!(photo_layout(0), None);
        assert_eq!(photo_layout(1), Some(PhotoLayout::Single));
        assert_eq!(photo_layout(2), Some(PhotoLayout::Grid { dense: false }));
        assert_eq!(photo_layout(4), Some(PhotoLayout::Grid { dense: false }));
        assert_eq!(photo_layout(5), Some(PhotoLayout::Grid { dense: true }));
    }

    #[test]
    fn photos_badge_pluralizes() {
        assert_eq!(photos_badge(1), "1 foto");
        assert_eq!(photos_badge(3), "3 fotos");
    }
}
