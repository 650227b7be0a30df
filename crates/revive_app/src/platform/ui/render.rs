use egui::{
    vec2, Align, Align2, Button, CentralPanel, Checkbox, Color32, Context, FontId, Frame, Layout,
    RichText, ScrollArea, Sense, TextureHandle, TopBottomPanel, Ui,
};
use revive_core::{AppViewModel, Msg, WorkflowPhase};

use super::constants::*;
use super::textures::TextureCache;
use super::{chrome, slider, UiAction, UiLocal};

const MIB: u64 = 1024 * 1024;

pub fn render(
    ctx: &Context,
    view: &AppViewModel,
    local: &mut UiLocal,
    textures: &TextureCache,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    TopBottomPanel::top("navbar").show(ctx, |ui| {
        ui.add_space(6.0);
        chrome::navbar(ui, view, &mut local.key_input, &mut actions);
        ui.add_space(6.0);
    });
    TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.add_space(4.0);
        chrome::footer(ui);
        ui.add_space(4.0);
    });
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(PANEL_MAX_WIDTH);
                hero(ui);
                if let Some(error) = &view.error {
                    error_banner(ui, error, &mut actions);
                }
                Frame::group(ui.style()).inner_margin(24.0).show(ui, |ui| {
                    match view.phase {
                        WorkflowPhase::Idle => upload_panel(ui, view, &mut actions),
                        WorkflowPhase::FileSelected | WorkflowPhase::Processing => {
                            configure_panel(ui, view, textures, &mut actions)
                        }
                        WorkflowPhase::Success => {
                            result_panel(ui, view, local, textures, &mut actions)
                        }
                    }
                });
                ui.add_space(24.0);
                chrome::how_it_works(ui);
                ui.add_space(12.0);
            });
        });
    });

    actions
}

fn hero(ui: &mut Ui) {
    ui.add_space(16.0);
    ui.label(RichText::new("Restore Your Memories").size(32.0).strong());
    ui.label(
        RichText::new(
            "Upload any old, damaged, or black & white photo and bring it back to life in seconds.",
        )
        .color(MUTED),
    );
    ui.add_space(16.0);
}

fn error_banner(ui: &mut Ui, error: &str, actions: &mut Vec<UiAction>) {
    Frame::none()
        .fill(ERROR_FILL)
        .rounding(CORNER_RADIUS)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(error).color(ERROR_TEXT).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button("Dismiss").clicked() {
                        actions.push(UiAction::Send(Msg::DismissError));
                    }
                });
            });
        });
    ui.add_space(12.0);
}

fn upload_panel(ui: &mut Ui, view: &AppViewModel, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        let button = Button::new(RichText::new("Click to upload or drag and drop").strong())
            .min_size(vec2(340.0, 120.0));
        if ui.add_enabled(view.picker_enabled, button).clicked() {
            actions.push(UiAction::PickFile);
        }
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!(
                "JPG, PNG or WEBP (MAX. {})",
                format_megabytes(view.upload_hint_bytes)
            ))
            .small()
            .color(MUTED),
        );
        ui.add_space(24.0);
    });
}

fn configure_panel(
    ui: &mut Ui,
    view: &AppViewModel,
    textures: &TextureCache,
    actions: &mut Vec<UiAction>,
) {
    let processing = view.phase == WorkflowPhase::Processing;
    ui.columns(2, |columns| {
        let texture = view.preview.and_then(|id| textures.get(id));
        let decoding = view.preview.is_some_and(|id| textures.is_decoding(id));
        preview(&mut columns[0], texture, decoding, processing);
        if let Some(name) = &view.file_name {
            columns[0].label(RichText::new(name).small().color(MUTED));
        }

        let ui = &mut columns[1];
        ui.label(RichText::new("Restore Configuration").size(20.0).strong());
        ui.label(RichText::new("Choose how you want to enhance your photo.").color(MUTED));
        ui.add_space(12.0);
        for toggle in &view.enhancements {
            let mut enabled = toggle.enabled;
            let checkbox = Checkbox::new(&mut enabled, toggle.label);
            if ui.add_enabled(!view.toggles_locked, checkbox).changed() {
                actions.push(UiAction::Send(Msg::EnhancementToggled(toggle.enhancement)));
            }
        }
        if view.file_size_hint_exceeded {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "This photo is larger than {}. It will still be sent, but may take longer.",
                    format_megabytes(view.upload_hint_bytes)
                ))
                .small()
                .color(WARNING_TEXT),
            );
        }

        ui.add_space(16.0);
        if processing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(view.progress_phrase.unwrap_or("Restoring..."));
            });
            ui.add_space(8.0);
        }
        ui.horizontal(|ui| {
            if ui.add_enabled(view.reset_enabled, Button::new("Reset")).clicked() {
                actions.push(UiAction::Send(Msg::ResetClicked));
            }
            if ui
                .add_enabled(view.picker_enabled, Button::new("Choose another photo"))
                .clicked()
            {
                actions.push(UiAction::PickFile);
            }
            let label = if processing { "Restoring..." } else { "Restore Now" };
            let restore =
                Button::new(RichText::new(label).strong().color(Color32::WHITE)).fill(ACCENT);
            if ui.add_enabled(view.restore_enabled, restore).clicked() {
                actions.push(UiAction::Restore);
            }
        });
    });
}

fn result_panel(
    ui: &mut Ui,
    view: &AppViewModel,
    local: &mut UiLocal,
    textures: &TextureCache,
    actions: &mut Vec<UiAction>,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Restoration Result").size(20.0).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let again = Button::new(RichText::new("New Restoration").color(Color32::WHITE))
                .fill(ACCENT);
            if ui.add(again).clicked() {
                actions.push(UiAction::Send(Msg::NewRestorationClicked));
            }
            if ui.button("Download").clicked() {
                actions.push(UiAction::Send(Msg::DownloadClicked));
            }
        });
    });
    ui.add_space(12.0);

    if let Some(pair) = view.comparison {
        slider::comparison(
            ui,
            &mut local.slider,
            textures.get(pair.before),
            textures.get(pair.after),
        );
    }
    ui.add_space(12.0);

    Frame::none()
        .fill(SUCCESS_FILL)
        .rounding(CORNER_RADIUS)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.label(RichText::new("Successfully Restored").strong().color(SUCCESS_TEXT));
            ui.label(
                RichText::new("Drag the divider across the photo to compare.")
                    .small()
                    .color(SUCCESS_TEXT),
            );
            if let Some(path) = &view.last_saved {
                ui.label(RichText::new(format!("Saved to {path}")).small());
            }
        });
}

fn preview(ui: &mut Ui, texture: Option<&TextureHandle>, decoding: bool, dimmed: bool) {
    let width = ui.available_width().max(1.0);
    let Some(texture) = texture else {
        let placeholder = if decoding {
            "Loading preview..."
        } else {
            "Preview unavailable"
        };
        let (rect, _) = ui.allocate_exact_size(vec2(width, width * DEFAULT_ASPECT), Sense::hover());
        ui.painter().rect_filled(rect, CORNER_RADIUS, PLACEHOLDER_FILL);
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            placeholder,
            FontId::proportional(14.0),
            MUTED,
        );
        return;
    };
    let size = texture.size_vec2();
    let scale = (width / size.x).min(PREVIEW_MAX_HEIGHT / size.y);
    let (rect, _) = ui.allocate_exact_size(size * scale, Sense::hover());
    ui.painter().image(texture.id(), rect, FULL_UV, Color32::WHITE);
    if dimmed {
        ui.painter()
            .rect_filled(rect, 0.0, Color32::from_black_alpha(80));
    }
}

/// Formats a byte budget like `5MB`, rounding up to whole mebibytes.
pub(crate) fn format_megabytes(bytes: u64) -> String {
    format!("{}MB", bytes.div_ceil(MIB).max(1))
}
