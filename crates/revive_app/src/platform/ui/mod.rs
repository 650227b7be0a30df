pub mod chrome;
pub mod constants;
pub mod render;
pub mod slider;
pub mod textures;

use revive_core::{ComparisonSlider, Msg};

/// What a frame of UI interaction asks the app to do.
pub enum UiAction {
    /// Open the native file picker.
    PickFile,
    /// Restore was clicked; the app stamps the request time.
    Restore,
    Send(Msg),
}

/// Widget state that lives only in the shell.
#[derive(Default)]
pub struct UiLocal {
    pub slider: ComparisonSlider,
    pub key_input: String,
}
