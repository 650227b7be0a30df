//! Before/after comparison widget.
//!
//! The divider position lives in [`ComparisonSlider`]; this module only maps
//! pointer input onto it and paints the two layers.

use egui::{
    pos2, vec2, Align2, Color32, CursorIcon, FontId, Painter, Pos2, Rect, Sense, Stroke,
    TextureHandle, Ui,
};
use revive_core::{ComparisonSlider, HorizontalSpan};

use super::constants::*;

/// Draws `after` full-bleed and `before` clipped to the divider.
pub fn comparison(
    ui: &mut Ui,
    slider: &mut ComparisonSlider,
    before: Option<&TextureHandle>,
    after: Option<&TextureHandle>,
) {
    let size = widget_size(ui.available_width(), after.or(before));
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let span = HorizontalSpan::new(rect.left(), rect.width());

    if response.is_pointer_button_down_on() {
        if let Some(pointer) = response.interact_pointer_pos() {
            if slider.is_dragging() {
                slider.pointer_move(pointer.x, span);
            } else {
                slider.pointer_down(pointer.x, span);
            }
        }
    } else if slider.is_dragging() {
        slider.pointer_up();
    }
    if response.hovered() || slider.is_dragging() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, CORNER_RADIUS, PLACEHOLDER_FILL);
    paint_layer(&painter, rect, after);

    let clip_width = slider.clip_width(rect.width());
    let before_clip = Rect::from_min_size(rect.min, vec2(clip_width, rect.height()));
    paint_layer(&painter.with_clip_rect(before_clip), rect, before);

    let x = rect.left() + clip_width;
    painter.line_segment(
        [pos2(x, rect.top()), pos2(x, rect.bottom())],
        Stroke::new(DIVIDER_WIDTH, Color32::WHITE),
    );
    let knob = pos2(x, rect.center().y);
    painter.circle_filled(knob, KNOB_RADIUS, Color32::WHITE);
    for dx in [-3.0, 3.0] {
        painter.line_segment(
            [pos2(knob.x + dx, knob.y - 6.0), pos2(knob.x + dx, knob.y + 6.0)],
            Stroke::new(2.0, ACCENT),
        );
    }

    badge(
        &painter,
        rect.left_bottom() + vec2(16.0, -16.0),
        Align2::LEFT_BOTTOM,
        "ORIGINAL",
        BADGE_DARK,
    );
    badge(
        &painter,
        rect.right_bottom() + vec2(-16.0, -16.0),
        Align2::RIGHT_BOTTOM,
        "REVIVED",
        ACCENT,
    );
}

/// Fits the base image into the available width without distortion.
fn widget_size(available_width: f32, base: Option<&TextureHandle>) -> egui::Vec2 {
    let width = available_width.max(1.0);
    let aspect = base
        .map(|texture| {
            let size = texture.size_vec2();
            size.y / size.x
        })
        .filter(|aspect| aspect.is_finite() && *aspect > 0.0)
        .unwrap_or(DEFAULT_ASPECT);
    let height = width * aspect;
    if height > COMPARISON_MAX_HEIGHT {
        vec2(COMPARISON_MAX_HEIGHT / aspect, COMPARISON_MAX_HEIGHT)
    } else {
        vec2(width, height)
    }
}

fn paint_layer(painter: &Painter, rect: Rect, texture: Option<&TextureHandle>) {
    match texture {
        Some(texture) => {
            painter.image(texture.id(), rect, FULL_UV, Color32::WHITE);
        }
        None => {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Preview unavailable",
                FontId::proportional(14.0),
                MUTED,
            );
        }
    }
}

fn badge(painter: &Painter, anchor: Pos2, align: Align2, text: &str, fill: Color32) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(11.0),
        Color32::WHITE,
    );
    let padding = vec2(10.0, 6.0);
    let rect = align.anchor_size(anchor, galley.size() + padding * 2.0);
    painter.rect_filled(rect, 8.0, fill);
    painter.galley(rect.min + padding, galley, Color32::WHITE);
}
