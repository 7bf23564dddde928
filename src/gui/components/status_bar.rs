// src/gui/components/status_bar.rs

use eframe::egui::{self, widgets::Spinner};

use crate::gui::{app::App, sink::Shared};

pub fn draw(ui: &mut egui::Ui, app: &App, view: &Shared) {
    ui.horizontal(|ui| {
        let stop = ui.add_enabled(view.running, egui::Button::new("Stop polling"));
        if stop.clicked() {
            app.stop();
        }

        if view.fetching {
            ui.add(Spinner::new().size(14.0));
        }

        ui.label(&view.status);

        if let Some(at) = view.last_update {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!(
                    "{} · every {}s · updated {}s ago",
                    app.opts.source.kind,
                    app.opts.poll.interval.as_secs(),
                    at.elapsed().as_secs()
                ));
            });
        }
    });
}
