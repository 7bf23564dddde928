// src/gui/components/board.rs
//
// The two caps and the countdown. Purely a view over `Shared`.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::format::Freshness;
use crate::gui::sink::Shared;

const GOLD: Color32 = Color32::from_rgb(212, 175, 55);
const BITCOIN: Color32 = Color32::from_rgb(247, 147, 26);
const STALE: Color32 = Color32::from_rgb(150, 150, 150);

pub fn draw(ui: &mut egui::Ui, view: &Shared) {
    let board = &view.board;

    ui.vertical_centered(|ui| {
        ui.heading("Bitcoin vs Gold");
    });
    ui.add_space(8.0);

    let value_color = match board.freshness {
        Freshness::Cached => STALE,
        _ => ui.visuals().text_color(),
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| { ui.strong("Asset"); });
            header.col(|ui| { ui.strong("Market cap"); });
        })
        .body(|mut body| {
            for (name, color, text) in [
                ("Gold", GOLD, &board.gold),
                ("Bitcoin", BITCOIN, &board.bitcoin),
            ] {
                body.row(24.0, |mut row| {
                    row.col(|ui| { ui.label(RichText::new(name).color(color).strong()); });
                    row.col(|ui| {
                        ui.label(RichText::new(text).monospace().color(value_color));
                    });
                });
            }
        });

    ui.add_space(12.0);
    ui.separator();
    ui.vertical_centered(|ui| {
        ui.label("Time until Bitcoin overtakes Gold");
        ui.label(RichText::new(&board.countdown).size(26.0).strong());
    });
}
