#![forbid(unsafe_code)]

use relato_core::attachments::Attachment;
use relato_core::wizard::{WizardError, WizardStep};
use relato_core::{Shift, WizardState};

fn png(name: &str, len: usize) -> Attachment {
    Attachment::new(name, "image/png", vec![0u8; len])
}

#[test]
fn full_walkthrough_gated_at_every_step() {
    let mut w = WizardState::new();

    // Jumping ahead without any precondition met fails with the first
    // unmet gate and leaves the machine where it was.
    assert_eq!(w.go_to(WizardStep::ReportForm), Err(WizardError::ShiftRequired));
    assert_eq!(w.step(), WizardStep::ShiftSelect);

    w.select_shift(Shift::Segundo);
    w.go_to(WizardStep::NameEntry).unwrap();

    // Straight to step 3 with a shift but no name is still refused.
    assert_eq!(w.go_to(WizardStep::ReportForm), Err(WizardError::NameRequired));

    w.user_name = "  Ana  ".into();
    w.confirm_name().unwrap();
    assert_eq!(w.step(), WizardStep::ReportForm);

    // Attachments: mixed batch with an invalid type, an oversized file and
    // a duplicate; only the valid, novel images survive, in order.
    let rejected = w.attachments.add_files(vec![
        png("antes.png", 64),
        Attachment::new("nota.txt", "text/plain", vec![1]),
        png("antes.png", 64),
        png("depois.png", 128),
    ]);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].name, "nota.txt");
    assert_eq!(w.attachments.len(), 2);

    // Empty description blocks the submit.
    assert_eq!(w.validate_submit(), Err(WizardError::DescriptionRequired));

    w.description = "Troca de filtros concluída".into();
    let report = w.build_report().unwrap();
    assert_eq!(report.shift.code(), 2);
    assert_eq!(report.usuario, "Ana");
    let names: Vec<_> = report.fotos.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["antes.png", "depois.png"]);

    // Back is unguarded; step indicator follows the current step.
    w.back();
    assert_eq!(w.step(), WizardStep::NameEntry);
    w.go_to(WizardStep::ReportForm).unwrap();

    // Dismissing the success confirmation resets everything.
    w.reset();
    assert_eq!(w.step(), WizardStep::ShiftSelect);
    assert!(w.attachments.is_empty());
    assert!(w.user_name.is_empty());
}
