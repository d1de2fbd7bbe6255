#![forbid(unsafe_code)]

use chrono::NaiveDateTime;
use eframe::egui;
use tracing::info;

use crate::RelatoGuiApp;
use relato_core::timeline::{photo_layout, photos_badge, PhotoLayout};
use relato_core::{timefmt, ReportRecord, Shift};

pub(crate) fn ui_timeline(app: &mut RelatoGuiApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.heading(app.timeline.state.title());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(app.timeline.state.count_label()).weak());
            if app.timeline.loading {
                ui.add(egui::Spinner::new());
            }
        });
    });
    ui.add_space(4.0);

    // Filter row: exclusively active, refetch on change (server-side filter)
    let current = app.timeline.state.filter();
    let mut picked: Option<Option<Shift>> = None;
    ui.horizontal(|ui| {
        if ui.selectable_label(current.is_none(), "Todos").clicked() && current.is_some() {
            picked = Some(None);
        }
        for shift in Shift::ALL {
            let active = current == Some(shift);
            let label = format!("{} {}", shift.icon(), shift.label());
            if ui.selectable_label(active, label).clicked() && !active {
                picked = Some(Some(shift));
            }
        }
    });
    if let Some(filter) = picked {
        info!(turno = ?filter.map(|s| s.code()), "ui: filter change");
        app.timeline.state.set_filter(filter);
        app.start_load_reports_task();
    }
    ui.separator();

    if let Some(err) = app.timeline.error.clone() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.heading("Ops! Algo deu errado");
            ui.label(err);
            ui.add_space(8.0);
            if ui.button("Tentar Novamente").clicked() {
                info!("ui: retry load");
                app.start_load_reports_task();
            }
        });
        return;
    }

    if app.timeline.state.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            if app.timeline.loading {
                ui.add(egui::Spinner::new());
            } else {
                ui.label(egui::RichText::new("📋").size(40.0));
                ui.heading("Nenhum relatório encontrado");
                ui.label(egui::RichText::new("Os relatórios enviados aparecem aqui.").weak());
            }
        });
        return;
    }

    let now = timefmt::now_local();
    let reports = app.timeline.state.reports().to_vec();
    egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
        for report in &reports {
            draw_report_card(app, ui, report, now);
            ui.add_space(8.0);
        }
    });
}

fn draw_report_card(app: &mut RelatoGuiApp, ui: &mut egui::Ui, report: &ReportRecord, now: NaiveDateTime) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("👤 {}", report.usuario)).strong());
            let chip = Shift::from_code(report.turno)
                .map(|s| format!("{} {}", s.icon(), s.label()))
                .unwrap_or_else(|| report.turno_nome.clone());
            ui.label(egui::RichText::new(chip).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if app.timeline.deleting == Some(report.id) {
                    ui.add_enabled(false, egui::Button::new("…"))
                        .on_disabled_hover_text("Excluindo…");
                } else if ui.button("🗑").on_hover_text("Excluir relatório").clicked() {
                    app.timeline.confirm_delete = Some(report.id);
                }
                match timefmt::parse_timestamp(&report.data_criacao) {
                    Some(ts) => {
                        ui.label(egui::RichText::new(timefmt::relative_age(ts, now)).weak())
                            .on_hover_text(timefmt::format_absolute(ts));
                    }
                    None => {
                        ui.label(egui::RichText::new(&report.data_criacao).weak());
                    }
                }
            });
        });
        ui.add_space(4.0);
        ui.label(&report.texto);
        draw_card_photos(app, ui, report);
    });
}

fn draw_card_photos(app: &mut RelatoGuiApp, ui: &mut egui::Ui, report: &ReportRecord) {
    let Some(layout) = photo_layout(report.fotos_urls.len()) else { return };
    ui.add_space(6.0);
    match layout {
        PhotoLayout::Single => {
            draw_photo(app, ui, &report.fotos_urls[0], egui::vec2(320.0, 240.0));
        }
        PhotoLayout::Grid { dense } => {
            let side = if dense { 90.0 } else { 120.0 };
            ui.horizontal_wrapped(|ui| {
                for url in &report.fotos_urls {
                    draw_photo(app, ui, url, egui::vec2(side, side));
                }
            });
            ui.label(
                egui::RichText::new(format!("🖼 {}", photos_badge(report.fotos_urls.len())))
                    .weak()
                    .small(),
            );
        }
    }
}

fn draw_photo(app: &mut RelatoGuiApp, ui: &mut egui::Ui, url: &str, size: egui::Vec2) {
    app.request_photo(url);
    if let Some(tex) = app.textures.get(url).cloned() {
        let resp = ui.add(egui::ImageButton::new(
            egui::Image::new(&tex).fit_to_exact_size(size),
        ));
        if resp.clicked() {
            app.photo_modal = Some(url.to_string());
        }
    } else if app.textures.is_failed(url) {
        ui.add_sized(size, egui::Label::new(egui::RichText::new("🖼 indisponível").weak()));
    } else {
        ui.add_sized(size, egui::Spinner::new());
    }
}

pub(crate) fn ui_confirm_delete(app: &mut RelatoGuiApp, ctx: &egui::Context) {
    let Some(id) = app.timeline.confirm_delete else { return };
    let mut open = true;
    egui::Window::new("Confirmar Exclusão")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, -40.0))
        .show(ctx, |ui| {
            ui.label("Tem certeza que deseja excluir este relatório?");
            ui.label(egui::RichText::new("Esta ação não pode ser desfeita.").weak());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancelar").clicked() {
                    app.timeline.confirm_delete = None;
                }
                if ui.button("Excluir").clicked() {
                    info!(id, "ui: delete confirm");
                    app.start_delete_task(id);
                    app.timeline.confirm_delete = None;
                }
            });
        });
    if !open {
        app.timeline.confirm_delete = None;
    }
}
