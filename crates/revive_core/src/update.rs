use crate::{
    build_instruction, AppState, Effect, Msg, WorkflowPhase, DEFAULT_DOWNLOAD_NAME,
    EMPTY_KEY_MESSAGE, MISSING_CREDENTIAL_MESSAGE, NO_FILE_MESSAGE, UNREADABLE_FILE_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(photo) => {
            // The picker is disabled while a restoration is outstanding.
            if state.phase() == WorkflowPhase::Processing {
                return (state, Vec::new());
            }
            state.replace_photo(photo)
        }
        Msg::SelectionFailed { reason } => {
            let reason = reason.trim();
            if reason.is_empty() {
                state.set_error(UNREADABLE_FILE_MESSAGE);
            } else {
                state.set_error(format!("{UNREADABLE_FILE_MESSAGE} ({reason})"));
            }
            Vec::new()
        }
        Msg::EnhancementToggled(enhancement) => {
            if state.phase() != WorkflowPhase::Processing {
                state.toggle_enhancement(enhancement);
            }
            Vec::new()
        }
        Msg::RestoreClicked { requested_at_ms } => match state.phase() {
            WorkflowPhase::Processing | WorkflowPhase::Success => Vec::new(),
            WorkflowPhase::Idle => {
                state.set_error(NO_FILE_MESSAGE);
                Vec::new()
            }
            WorkflowPhase::FileSelected if !state.credential_present() => {
                state.set_error(MISSING_CREDENTIAL_MESSAGE);
                Vec::new()
            }
            WorkflowPhase::FileSelected => {
                let Some(photo) = state.photo().cloned() else {
                    return (state, Vec::new());
                };
                let instruction = build_instruction(state.enhancements());
                let job_id = state.begin_job(photo.image, requested_at_ms);
                vec![
                    Effect::StartProgress { job_id },
                    Effect::Restore {
                        job_id,
                        image: photo.image,
                        mime_type: photo.mime_type,
                        instruction,
                    },
                ]
            }
        },
        Msg::ProgressTick { job_id } => {
            if state.in_flight_job_id() == Some(job_id) {
                state.advance_narrative();
            }
            Vec::new()
        }
        Msg::RestoreFinished { job_id, result } => {
            if state.in_flight_job_id() != Some(job_id) {
                // Stale resolution: nothing will ever display its image.
                return match result {
                    Ok(restored) => (
                        state,
                        vec![Effect::ReleaseImage {
                            image: restored.image,
                        }],
                    ),
                    Err(_) => (state, Vec::new()),
                };
            }
            match result {
                Ok(restored) => state.complete_job(restored),
                Err(failure) => {
                    if failure.is_credential_rejection() {
                        state.set_credential_present(false);
                    }
                    state.set_error(failure.user_message());
                    state.discard_job();
                }
            }
            vec![Effect::StopProgress { job_id }]
        }
        Msg::ResetClicked | Msg::NewRestorationClicked => match state.phase() {
            WorkflowPhase::Processing => Vec::new(),
            WorkflowPhase::Idle if state.error().is_none() => Vec::new(),
            _ => state.reset(),
        },
        Msg::DownloadClicked => state
            .job()
            .and_then(|job| job.restored())
            .map(|restored| {
                vec![Effect::Download {
                    image: restored.image,
                    suggested_name: DEFAULT_DOWNLOAD_NAME.to_string(),
                }]
            })
            .unwrap_or_default(),
        Msg::DownloadFinished(result) => {
            match result {
                Ok(path) => state.set_last_saved(path),
                Err(reason) => state.set_error(format!("Could not save the photo: {reason}")),
            }
            Vec::new()
        }
        Msg::CredentialChecked { present } => {
            state.set_credential_present(present);
            Vec::new()
        }
        Msg::ConnectCredentialClicked { key } => {
            let key = key.trim();
            if key.is_empty() {
                state.set_error(EMPTY_KEY_MESSAGE);
                Vec::new()
            } else {
                // Optimistic: the next credential rejection demotes this again.
                state.set_credential_present(true);
                state.clear_error();
                vec![Effect::RequestCredential {
                    key: key.to_string(),
                }]
            }
        }
        Msg::CredentialRequestFailed { reason } => {
            state.set_credential_present(false);
            state.set_error(format!("Could not connect your API key: {reason}"));
            Vec::new()
        }
        Msg::DismissError => {
            state.clear_error();
            Vec::new()
        }
    };

    (state, effects)
}
