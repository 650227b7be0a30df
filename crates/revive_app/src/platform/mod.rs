pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod ui;

use revive_core::AppState;
use revive_engine::EngineHandle;
use revive_logging::revive_info;

use self::app::ReviveApp;
use self::config::AppConfig;
use self::effects::EffectRunner;
use self::ui::constants::WINDOW_TITLE;

/// Opens the main window. `env_key` is the key read from the environment, if any.
pub fn run_app(config: AppConfig, env_key: Option<String>) -> anyhow::Result<()> {
    let provisioned = config.provisioned_key(env_key);
    revive_info!("Credential provisioned at startup: {}", provisioned.is_some());

    let state = AppState::with_settings(config.workflow_settings(provisioned.is_some()));
    let effects = EffectRunner::new(EngineHandle::new(config.engine_config(provisioned)));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1080.0, 860.0])
            .with_min_inner_size([640.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ReviveApp::new(state, effects)))),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}
