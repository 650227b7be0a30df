use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use revive_core::{update, AppState, AppViewModel, Effect, Msg};
use revive_logging::{revive_info, revive_warn};

use super::effects::{register_selection, EffectRunner};
use super::ui::constants::ACCEPTED_EXTENSIONS;
use super::ui::textures::TextureCache;
use super::ui::{self, UiAction, UiLocal};

/// Engine events arrive off the UI thread, so the frame loop polls at this rate.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub struct ReviveApp {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
    textures: TextureCache,
    local: UiLocal,
}

impl ReviveApp {
    pub fn new(state: AppState, effects: EffectRunner) -> Self {
        effects.run(state.startup_effects());
        let view = state.view();
        Self {
            state,
            view,
            effects,
            textures: TextureCache::default(),
            local: UiLocal::default(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.run(effects);
    }

    fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a photo to restore")
            .add_filter("Images", ACCEPTED_EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            self.select_path(&path);
        }
    }

    fn accept_dropped_file(&mut self, ctx: &egui::Context) {
        let dropped: Option<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.select_path(&path);
        }
    }

    fn select_path(&mut self, path: &Path) {
        if !self.view.picker_enabled {
            return;
        }
        let photo = match register_selection(self.effects.store(), path) {
            Ok(photo) => photo,
            Err(err) => {
                revive_warn!("Could not open {:?}: {}", path, err);
                self.dispatch(Msg::SelectionFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };
        revive_info!(
            "Selected {:?} mime={} bytes={}",
            photo.file_name,
            photo.mime_type,
            photo.byte_len
        );
        let image = photo.image;
        self.dispatch(Msg::FileSelected(photo));
        if self.state.photo().map(|photo| photo.image) != Some(image) {
            self.effects.run(vec![Effect::ReleaseImage { image }]);
        }
    }
}

impl eframe::App for ReviveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for msg in self.effects.drain_events() {
            self.dispatch(msg);
        }
        self.accept_dropped_file(ctx);

        if let Some(pair) = self.view.comparison {
            self.local.slider.present(pair);
        }
        self.textures.sync(ctx, &self.view, self.effects.store());

        let actions = ui::render::render(ctx, &self.view, &mut self.local, &self.textures);
        for action in actions {
            match action {
                UiAction::PickFile => self.pick_file(),
                UiAction::Restore => self.dispatch(Msg::RestoreClicked {
                    requested_at_ms: now_millis(),
                }),
                UiAction::Send(msg) => self.dispatch(msg),
            }
        }

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
