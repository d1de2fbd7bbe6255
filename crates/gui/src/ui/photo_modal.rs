#![forbid(unsafe_code)]

use eframe::egui;

use crate::RelatoGuiApp;

/// Full-screen photo overlay. Dismissed by Escape, a click on the backdrop
/// (the image itself swallows its clicks) or the close control.
pub(crate) fn ui_photo_modal(app: &mut RelatoGuiApp, ctx: &egui::Context) {
    let Some(url) = app.photo_modal.clone() else { return };
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.photo_modal = None;
        return;
    }
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("photo_modal"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let backdrop = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(200));

            app.request_photo(&url);
            if let Some(tex) = app.textures.get(&url).cloned() {
                let max = screen.size() * 0.85;
                let tex_size = tex.size_vec2();
                let scale = (max.x / tex_size.x).min(max.y / tex_size.y).min(1.0);
                let size = tex_size * scale;
                let rect = egui::Rect::from_center_size(screen.center(), size);
                // Click sense so a click on the photo does not reach the backdrop
                ui.put(
                    rect,
                    egui::Image::new(&tex)
                        .fit_to_exact_size(size)
                        .sense(egui::Sense::click()),
                );
            } else {
                let rect = egui::Rect::from_center_size(screen.center(), egui::vec2(60.0, 60.0));
                ui.put(rect, egui::Spinner::new());
            }

            let close_rect = egui::Rect::from_min_size(
                egui::pos2(screen.right() - 52.0, screen.top() + 16.0),
                egui::vec2(36.0, 36.0),
            );
            if ui.put(close_rect, egui::Button::new("✕")).clicked() {
                app.photo_modal = None;
            }
            if backdrop.clicked() {
                app.photo_modal = None;
            }
        });
}
