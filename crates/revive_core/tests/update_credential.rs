mod common;

use common::{connected_state, init_logging, restore, restore_job_id, select};
use revive_core::{
    update, AppState, Effect, FailureKind, Msg, RestoreFailure, WorkflowPhase,
    CREDENTIAL_REJECTED_MESSAGE, EMPTY_KEY_MESSAGE, MISSING_CREDENTIAL_MESSAGE,
};

fn fail_with(state: AppState, failure: RestoreFailure) -> AppState {
    let (state, effects) = restore(state);
    let job_id = restore_job_id(&effects);
    let (state, _) = update(
        state,
        Msg::RestoreFinished {
            job_id,
            result: Err(failure),
        },
    );
    state
}

#[test]
fn credential_check_result_is_recorded() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CredentialChecked { present: true });
    assert!(effects.is_empty());
    assert!(state.view().credential_present);

    let (state, _) = update(state, Msg::CredentialChecked { present: false });
    assert!(!state.view().credential_present);
}

#[test]
fn invalid_api_key_reason_demotes_credential() {
    init_logging();
    let (state, _) = select(connected_state(), 1);
    let state = fail_with(
        state,
        RestoreFailure::new(FailureKind::Remote, "400: Invalid API Key provided"),
    );

    let view = state.view();
    assert!(!view.credential_present);
    assert_eq!(view.error.as_deref(), Some(CREDENTIAL_REJECTED_MESSAGE));
    assert!(view.error.unwrap().contains("reconnect"));
    assert_eq!(view.phase, WorkflowPhase::FileSelected);

    // The next attempt re-checks and fails fast.
    let (state, effects) = restore(state);
    assert!(effects.is_empty());
    assert_eq!(state.error(), Some(MISSING_CREDENTIAL_MESSAGE));
}

#[test]
fn credential_rejected_kind_demotes_credential() {
    init_logging();
    let (state, _) = select(connected_state(), 1);
    let state = fail_with(
        state,
        RestoreFailure::new(FailureKind::CredentialRejected, "HTTP 403"),
    );
    assert!(!state.credential_present());
}

#[test]
fn key_missing_at_call_time_asks_to_connect() {
    init_logging();
    let (state, _) = select(connected_state(), 1);
    let state = fail_with(
        state,
        RestoreFailure::new(FailureKind::MissingCredential, "no api key configured"),
    );
    let view = state.view();
    assert!(!view.credential_present);
    assert_eq!(view.error.as_deref(), Some(MISSING_CREDENTIAL_MESSAGE));
    assert_eq!(view.phase, WorkflowPhase::FileSelected);
}

#[test]
fn other_failures_leave_credential_untouched() {
    init_logging();
    let (state, _) = select(connected_state(), 1);
    let state = fail_with(
        state,
        RestoreFailure::new(FailureKind::Remote, "Resource has been exhausted"),
    );
    assert!(state.credential_present());
}

#[test]
fn connecting_marks_credential_present_optimistically() {
    init_logging();
    let (state, _) = select(AppState::new(), 1);
    let (state, _) = restore(state);
    assert_eq!(state.error(), Some(MISSING_CREDENTIAL_MESSAGE));

    let (state, effects) = update(
        state,
        Msg::ConnectCredentialClicked {
            key: "  AIzaTestKey  ".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RequestCredential {
            key: "AIzaTestKey".to_string()
        }]
    );
    assert!(state.credential_present());
    assert_eq!(state.error(), None);

    let (_, effects) = restore(state);
    assert_eq!(restore_job_id(&effects), 1);
}

#[test]
fn empty_key_is_rejected_locally() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::ConnectCredentialClicked {
            key: "   ".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.credential_present());
    assert_eq!(state.error(), Some(EMPTY_KEY_MESSAGE));
}

#[test]
fn failed_connection_reverts_optimistic_state() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ConnectCredentialClicked {
            key: "key".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::CredentialRequestFailed {
            reason: "permission denied".to_string(),
        },
    );
    assert!(!state.credential_present());
    assert!(state.error().unwrap().contains("permission denied"));
}
