use egui::{pos2, Color32, Rect};

pub const BRAND: &str = "ReviveAI";
pub const WINDOW_TITLE: &str = "ReviveAI - Photo Restoration";

/// Extensions offered by the file picker. Other files may still be dropped in.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "gif", "bmp", "heic", "heif", "tif", "tiff",
];

pub const ACCENT: Color32 = Color32::from_rgb(79, 70, 229);
pub const MUTED: Color32 = Color32::from_rgb(100, 116, 139);
pub const ERROR_FILL: Color32 = Color32::from_rgb(254, 242, 242);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(220, 38, 38);
pub const SUCCESS_FILL: Color32 = Color32::from_rgb(236, 253, 245);
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(6, 95, 70);
pub const WARNING_TEXT: Color32 = Color32::from_rgb(180, 83, 9);
pub const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(226, 232, 240);
pub const BADGE_DARK: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

pub const PANEL_MAX_WIDTH: f32 = 820.0;
pub const PREVIEW_MAX_HEIGHT: f32 = 360.0;
pub const COMPARISON_MAX_HEIGHT: f32 = 560.0;
/// Height over width used before an image is decoded.
pub const DEFAULT_ASPECT: f32 = 0.75;
pub const CORNER_RADIUS: f32 = 12.0;
pub const DIVIDER_WIDTH: f32 = 3.0;
pub const KNOB_RADIUS: f32 = 18.0;

pub const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
