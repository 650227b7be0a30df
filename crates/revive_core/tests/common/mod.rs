#![allow(dead_code)]

use revive_core::{
    update, AppState, Effect, JobId, Msg, RestoredImage, SelectedPhoto, WorkflowSettings,
};

pub fn init_logging() {
    revive_logging::initialize_for_tests();
}

pub fn photo(image: u64) -> SelectedPhoto {
    SelectedPhoto {
        image,
        file_name: format!("photo-{image}.jpg"),
        mime_type: "image/jpeg".to_string(),
        byte_len: 2 * 1024 * 1024,
    }
}

pub fn restored(image: u64) -> RestoredImage {
    RestoredImage {
        image,
        mime_type: "image/png".to_string(),
    }
}

/// State with a confirmed credential and nothing selected.
pub fn connected_state() -> AppState {
    AppState::with_settings(WorkflowSettings {
        credential_provisioned: true,
        ..WorkflowSettings::default()
    })
}

pub fn select(state: AppState, image: u64) -> (AppState, Vec<Effect>) {
    update(state, Msg::FileSelected(photo(image)))
}

pub fn restore(state: AppState) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::RestoreClicked {
            requested_at_ms: 1_700_000_000_000,
        },
    )
}

pub fn restore_job_id(effects: &[Effect]) -> JobId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Restore { job_id, .. } => Some(*job_id),
            _ => None,
        })
        .expect("restore effect")
}

pub fn released(effects: &[Effect]) -> Vec<u64> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ReleaseImage { image } => Some(*image),
            _ => None,
        })
        .collect()
}
