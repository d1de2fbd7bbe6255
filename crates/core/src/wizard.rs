//! The 3-step submission wizard.
//!
//! A plain state machine over {shift selection, name entry, report form}.
//! Forward moves are gated on per-step preconditions; backward moves never
//! are. The UI derives the whole step indicator from `step_status`.

#![forbid(unsafe_code)]

use crate::attachments::AttachmentSet;
use crate::{NewReport, Shift};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    ShiftSelect,
    NameEntry,
    ReportForm,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] =
        [WizardStep::ShiftSelect, WizardStep::NameEntry, WizardStep::ReportForm];

    pub fn ordinal(self) -> u8 {
        match self {
            WizardStep::ShiftSelect => 1,
            WizardStep::NameEntry => 2,
            WizardStep::ReportForm => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ShiftSelect => "Turno",
            WizardStep::NameEntry => "Nome",
            WizardStep::ReportForm => "Relatório",
        }
    }
}

/// Indicator state for a step, derived purely from the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Selecione um turno primeiro.")]
    ShiftRequired,
    #[error("Digite seu nome primeiro.")]
    NameRequired,
    #[error("Por favor, digite um nome válido com pelo menos 2 caracteres.")]
    NameTooShort,
    #[error("Por favor, digite a descrição da atividade.")]
    DescriptionRequired,
}

/// One wizard per page load. `reset` puts it back to the initial state
/// after the success confirmation is dismissed.
#[derive(Debug, Default)]
pub struct WizardState {
    step: WizardStep,
    pub selected_shift: Option<Shift>,
    pub user_name: String,
    pub description: String,
    pub attachments: AttachmentSet,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Step 1 click: stores the shift. The view swap to step 2 is scheduled
    /// by the caller, slightly behind the click so the selection registers.
    pub fn select_shift(&mut self, shift: Shift) {
        self.selected_shift = Some(shift);
    }

    pub fn name_valid(&self) -> bool {
        self.user_name.trim().chars().count() >= 2
    }

    /// Explicit continue (button or Enter) out of step 2. Normalizes the
    /// stored name on success; on failure the caller refocuses the input.
    pub fn confirm_name(&mut self) -> Result<(), WizardError> {
        let name = self.user_name.trim();
        if name.chars().count() < 2 {
            return Err(WizardError::NameTooShort);
        }
        self.user_name = name.to_string();
        self.go_to(WizardStep::ReportForm)
    }

    /// Navigation guard: forward moves require every intermediate
    /// precondition (shift chosen to pass step 1, valid name to pass
    /// step 2). A refused move mutates nothing. Backward moves always pass.
    pub fn go_to(&mut self, target: WizardStep) -> Result<(), WizardError> {
        if target > self.step {
            if target >= WizardStep::NameEntry && self.selected_shift.is_none() {
                return Err(WizardError::ShiftRequired);
            }
            if target >= WizardStep::ReportForm && !self.name_valid() {
                return Err(WizardError::NameRequired);
            }
        }
        self.step = target;
        Ok(())
    }

    /// Unconditional back action from the report form.
    pub fn back(&mut self) {
        if self.step == WizardStep::ReportForm {
            self.step = WizardStep::NameEntry;
        }
    }

    pub fn step_status(&self, step: WizardStep) -> StepStatus {
        if step == self.step {
            StepStatus::Active
        } else if step < self.step {
            StepStatus::Completed
        } else {
            StepStatus::Upcoming
        }
    }

    /// Submit-time validation: the description must be non-empty after
    /// trimming, and the earlier gates are re-checked.
    pub fn validate_submit(&self) -> Result<(), WizardError> {
        if self.selected_shift.is_none() {
            return Err(WizardError::ShiftRequired);
        }
        if !self.name_valid() {
            return Err(WizardError::NameTooShort);
        }
        if self.description.trim().is_empty() {
            return Err(WizardError::DescriptionRequired);
        }
        Ok(())
    }

    /// Builds the submission payload from current state. Fails like
    /// `validate_submit`; attachments go in set order.
    pub fn build_report(&self) -> Result<NewReport, WizardError> {
        self.validate_submit()?;
        let shift = self.selected_shift.ok_or(WizardError::ShiftRequired)?;
        Ok(NewReport {
            shift,
            usuario: self.user_name.trim().to_string(),
            texto: self.description.trim().to_string(),
            fotos: self.attachments.iter().cloned().collect(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::Attachment;

    #[test]
    fn starts_on_shift_selection() {
        let w = WizardState::new();
        assert_eq!(w.step(), WizardStep::ShiftSelect);
        assert_eq!(w.selected_shift, None);
    }

    #[test]
    fn cannot_reach_name_entry_without_a_shift() {
        let mut w = WizardState::new();
        assert_eq!(w.go_to(WizardStep::NameEntry), Err(WizardError::ShiftRequired));
        assert_eq!(w.step(), WizardStep::ShiftSelect);
    }

    #[test]
    fn shift_selection_unlocks_step_two() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Segundo);
        assert_eq!(w.go_to(WizardStep::NameEntry), Ok(()));
        assert_eq!(w.step(), WizardStep::NameEntry);
    }

    #[test]
    fn cannot_reach_report_form_without_a_name() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Primeiro);
        w.go_to(WizardStep::NameEntry).unwrap();
        assert_eq!(w.go_to(WizardStep::ReportForm), Err(WizardError::NameRequired));
        assert_eq!(w.step(), WizardStep::NameEntry);
    }

    #[test]
    fn one_char_name_is_too_short() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Primeiro);
        w.go_to(WizardStep::NameEntry).unwrap();
        w.user_name = " A ".to_string();
        assert_eq!(w.confirm_name(), Err(WizardError::NameTooShort));
        assert_eq!(w.step(), WizardStep::NameEntry);
    }

    #[test]
    fn confirm_name_trims_and_advances() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Primeiro);
        w.go_to(WizardStep::NameEntry).unwrap();
        w.user_name = "  Ana  ".to_string();
        assert_eq!(w.confirm_name(), Ok(()));
        assert_eq!(w.user_name, "Ana");
        assert_eq!(w.step(), WizardStep::ReportForm);
    }

    #[test]
    fn back_from_report_form_is_never_guarded() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Terceiro);
        w.user_name = "Ana".into();
        w.go_to(WizardStep::ReportForm).unwrap();
        w.back();
        assert_eq!(w.step(), WizardStep::NameEntry);
    }

    #[test]
    fn step_status_is_a_pure_function_of_current_step() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Primeiro);
        w.user_name = "Ana".into();
        w.go_to(WizardStep::NameEntry).unwrap();
        assert_eq!(w.step_status(WizardStep::ShiftSelect), StepStatus::Completed);
        assert_eq!(w.step_status(WizardStep::NameEntry), StepStatus::Active);
        assert_eq!(w.step_status(WizardStep::ReportForm), StepStatus::Upcoming);
    }

    #[test]
    fn submit_requires_a_description() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Segundo);
        w.user_name = "Ana".into();
        w.go_to(WizardStep::ReportForm).unwrap();
        w.description = "   ".into();
        assert_eq!(w.validate_submit(), Err(WizardError::DescriptionRequired));
    }

    #[test]
    fn build_report_carries_attachments_in_order() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Segundo);
        w.user_name = "Ana".into();
        w.go_to(WizardStep::ReportForm).unwrap();
        w.description = "Inspeção concluída".into();
        w.attachments.add_files(vec![
            Attachment::new("1.png", "image/png", vec![1]),
            Attachment::new("2.png", "image/png", vec![2, 2]),
        ]);
        let report = w.build_report().unwrap();
        assert_eq!(report.shift, Shift::Segundo);
        assert_eq!(report.usuario, "Ana");
        assert_eq!(report.texto, "Inspeção concluída");
        let names: Vec<_> = report.fotos.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["1.png", "2.png"]);
    }

    #[test]
    fn reset_returns_everything_to_initial_state() {
        let mut w = WizardState::new();
        w.select_shift(Shift::Primeiro);
        w.user_name = "Ana".into();
        w.go_to(WizardStep::ReportForm).unwrap();
        w.description = "texto".into();
        w.attachments
            .add_files(vec![Attachment::new("a.png", "image/png", vec![0])]);
        w.reset();
        assert_eq!(w.step(), WizardStep::ShiftSelect);
        assert_eq!(w.selected_shift, None);
        assert!(w.user_name.is_empty());
        assert!(w.description.is_empty());
        assert!(w.attachments.is_empty());
    }
}
