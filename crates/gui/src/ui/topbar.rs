#![forbid(unsafe_code)]

use eframe::egui;
use tracing::info;

use crate::{Page, RelatoGuiApp};

pub(crate) fn ui_topbar(app: &mut RelatoGuiApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Relatórios por Turno");
            ui.separator();
            if ui
                .selectable_label(app.page == Page::Wizard, "Novo Relatório")
                .clicked()
                && app.page != Page::Wizard
            {
                info!("ui: page -> wizard");
                app.page = Page::Wizard;
            }
            if ui
                .selectable_label(app.page == Page::Timeline, "Timeline")
                .clicked()
                && app.page != Page::Timeline
            {
                info!("ui: page -> timeline");
                app.page = Page::Timeline;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if app.page == Page::Timeline {
                    ui.label(egui::RichText::new(app.timeline.state.count_label()).weak());
                }
            });
        });
    });
}
