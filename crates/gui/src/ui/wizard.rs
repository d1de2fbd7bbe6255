#![forbid(unsafe_code)]

use eframe::egui;
use std::time::Instant;
use tracing::info;

use crate::intake;
use crate::model::{success_message, ToastKind};
use crate::{RelatoGuiApp, SHIFT_ADVANCE_DELAY};
use relato_core::wizard::{StepStatus, WizardStep};
use relato_core::Shift;

pub(crate) fn ui_wizard(app: &mut RelatoGuiApp, ui: &mut egui::Ui) {
    draw_step_indicator(app, ui);
    ui.add_space(16.0);
    match app.wizard.step() {
        WizardStep::ShiftSelect => ui_step_shift(app, ui),
        WizardStep::NameEntry => ui_step_name(app, ui),
        WizardStep::ReportForm => ui_step_form(app, ui),
    }
}

fn draw_step_indicator(app: &RelatoGuiApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        for (i, step) in WizardStep::ALL.into_iter().enumerate() {
            if i > 0 {
                ui.label(egui::RichText::new("—").weak());
            }
            let text = match app.wizard.step_status(step) {
                StepStatus::Completed => egui::RichText::new(format!("✔ {}", step.title()))
                    .color(egui::Color32::from_rgb(16, 185, 129)),
                StepStatus::Active => {
                    egui::RichText::new(format!("{} {}", step.ordinal(), step.title())).strong()
                }
                StepStatus::Upcoming => {
                    egui::RichText::new(format!("{} {}", step.ordinal(), step.title())).weak()
                }
            };
            ui.label(text);
        }
    });
}

fn ui_step_shift(app: &mut RelatoGuiApp, ui: &mut egui::Ui) {
    ui.heading("Selecione o turno");
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        for shift in Shift::ALL {
            let selected = app.wizard.selected_shift == Some(shift);
            let label = egui::RichText::new(format!("{}\n{}", shift.icon(), shift.label())).size(18.0);
            let btn = egui::Button::new(label)
                .min_size(egui::vec2(140.0, 90.0))
                .selected(selected);
            if ui.add(btn).clicked() {
                info!(turno = shift.code(), "ui: shift selected");
                app.wizard.select_shift(shift);
                // Let the selection register visually before the view swaps
                app.advance_at = Some(Instant::now() + SHIFT_ADVANCE_DELAY);
            }
        }
    });
}

fn ui_step_name(app: &mut RelatoGuiApp, ui: &mut egui::Ui) {
    ui.heading("Digite seu nome");
    ui.add_space(8.0);
    let resp = ui.add(
        egui::TextEdit::singleline(&mut app.wizard.user_name)
            .hint_text("Seu nome")
            .desired_width(280.0),
    );
    if app.focus_name {
        resp.request_focus();
        app.focus_name = false;
    }
    let entered = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    ui.add_space(8.0);
    let clicked = ui
        .add_enabled(app.wizard.name_valid(), egui::Button::new("Continuar"))
        .clicked();
    if entered || clicked {
        match app.wizard.confirm_name() {
            Ok(()) => app.focus_desc = true,
            Err(e) => {
                app.toast(e.to_string(), ToastKind::Error);
                app.focus_name = true;
            }
        }
    }
}

fn ui_step_form(app: &mut RelatoGuiApp, ui: &mut egui::Ui) {
    let shift_label = app
        .wizard
        .selected_shift
        .map(|s| format!("{} {}", s.icon(), s.label()))
        .unwrap_or_default();
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(shift_label).strong());
        ui.separator();
        ui.label(egui::RichText::new(format!("👤 {}", app.wizard.user_name)).strong());
    });
    ui.add_space(8.0);

    ui.label("Descreva as atividades realizadas:");
    let desc = ui.add(
        egui::TextEdit::multiline(&mut app.wizard.description)
            .hint_text("Descrição da atividade…")
            .desired_rows(5)
            .desired_width(f32::INFINITY),
    );
    if app.focus_desc {
        desc.request_focus();
        app.focus_desc = false;
    }
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.horizontal(|ui| {
            if ui.button("📁 Adicionar fotos").clicked() {
                info!("ui: photo picker open");
                let picked = intake::pick_image_files();
                app.add_attachment_candidates(picked);
            }
            ui.label(
                egui::RichText::new("ou arraste imagens aqui, ou cole da área de transferência")
                    .weak(),
            );
        });
        if ui.ctx().input(|i| !i.raw.hovered_files.is_empty()) {
            ui.colored_label(
                egui::Color32::from_rgb(59, 130, 246),
                "Solte as imagens para anexar",
            );
        }
        ui.label(egui::RichText::new(app.wizard.attachments.status_line()).weak());

        let mut remove_idx: Option<usize> = None;
        {
            // Split borrows: the set is read while the texture cache mutates
            let attachments = &app.wizard.attachments;
            let textures = &mut app.textures;
            let ctx = ui.ctx().clone();
            ui.horizontal_wrapped(|ui| {
                for (idx, att) in attachments.iter().enumerate() {
                    let key = intake::attachment_texture_key(att);
                    if !textures.contains(&key) && !textures.is_failed(&key) {
                        textures.insert_bytes(&ctx, &key, &att.data);
                    }
                    ui.vertical(|ui| {
                        if let Some(tex) = textures.get(&key).cloned() {
                            ui.add(
                                egui::Image::new(&tex).fit_to_exact_size(egui::vec2(96.0, 96.0)),
                            );
                        } else {
                            ui.add_sized([96.0, 96.0], egui::Label::new("🖼"));
                        }
                        ui.horizontal(|ui| {
                            let mut name = att.name.clone();
                            if name.chars().count() > 14 {
                                name = format!("{}…", name.chars().take(13).collect::<String>());
                            }
                            ui.label(egui::RichText::new(name).small());
                            if ui.small_button("✕").on_hover_text("Remover").clicked() {
                                remove_idx = Some(idx);
                            }
                        });
                    });
                }
            });
        }
        if let Some(idx) = remove_idx {
            match app.wizard.attachments.remove(idx) {
                Ok(removed) => {
                    info!(name = %removed.name, "ui: attachment removed");
                    app.textures.remove(&intake::attachment_texture_key(&removed));
                }
                Err(e) => app.toast(e.to_string(), ToastKind::Error),
            }
        }
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("← Voltar").clicked() {
            app.wizard.back();
            app.focus_name = true;
        }
        if app.submit.running {
            ui.add_enabled(false, egui::Button::new("Enviando…"));
            ui.add(egui::Spinner::new());
        } else if ui.button("Enviar Relatório").clicked() {
            info!("ui: submit click");
            app.start_submit_task();
        }
    });
}

pub(crate) fn ui_success_modal(app: &mut RelatoGuiApp, ctx: &egui::Context) {
    let Some(outcome) = app.submit.success.clone() else { return };
    egui::Window::new("Relatório Enviado")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, -40.0))
        .show(ctx, |ui| {
            ui.label(success_message(outcome.fotos_count));
            ui.add_space(8.0);
            if ui.button("Novo Relatório").clicked() {
                info!("ui: success dismissed");
                app.dismiss_success();
            }
        });
}
