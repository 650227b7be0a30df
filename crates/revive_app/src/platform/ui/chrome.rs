use chrono::{Datelike, Local};
use egui::{Align, Button, Frame, Key, Layout, RichText, TextEdit, Ui};
use revive_core::{AppViewModel, Msg};

use super::constants::*;
use super::UiAction;

const STEPS: [(&str, &str, &str); 3] = [
    (
        "1",
        "Upload Photo",
        "Drop your old black and white or damaged photos into the dashboard.",
    ),
    (
        "2",
        "AI Processing",
        "The model analyzes the structure and fills in missing detail and color.",
    ),
    (
        "3",
        "Download Memory",
        "Save your crystal clear, restored photo instantly.",
    ),
];

/// Brand on the left, key connection on the right.
pub fn navbar(ui: &mut Ui, view: &AppViewModel, key_input: &mut String, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(BRAND).size(22.0).strong().color(ACCENT));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if view.credential_present {
                ui.label(RichText::new("API key connected").color(SUCCESS_TEXT));
                return;
            }
            let connect = ui.add(
                Button::new(RichText::new("Connect API key").color(egui::Color32::WHITE))
                    .fill(ACCENT),
            );
            let field = ui.add(
                TextEdit::singleline(key_input)
                    .password(true)
                    .hint_text("Gemini API key")
                    .desired_width(240.0),
            );
            let submitted = field.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
            if connect.clicked() || submitted {
                actions.push(UiAction::Send(Msg::ConnectCredentialClicked {
                    key: std::mem::take(key_input),
                }));
            }
        });
    });
}

pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(BRAND).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(
                RichText::new(format!(
                    "© {} {}. All rights reserved.",
                    Local::now().year(),
                    BRAND
                ))
                .small()
                .color(MUTED),
            );
        });
    });
}

pub fn how_it_works(ui: &mut Ui) {
    ui.columns(STEPS.len(), |columns| {
        for (column, (number, title, text)) in columns.iter_mut().zip(STEPS) {
            Frame::group(column.style())
                .inner_margin(16.0)
                .show(column, |ui| {
                    ui.label(RichText::new(number).strong().color(ACCENT));
                    ui.label(RichText::new(title).strong());
                    ui.label(RichText::new(text).small().color(MUTED));
                });
        }
    });
}
