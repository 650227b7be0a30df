//! Revive core: pure restoration workflow state machine and view-model helpers.
mod effect;
mod failure;
mod instruction;
mod msg;
mod narrative;
mod slider;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, DEFAULT_DOWNLOAD_NAME};
pub use failure::{
    is_credential_rejection, FailureKind, RestoreFailure, CREDENTIAL_REJECTED_MESSAGE,
    EMPTY_KEY_MESSAGE, ENCODE_FAILED_MESSAGE, GENERIC_FAILURE_MESSAGE,
    MISSING_CREDENTIAL_MESSAGE, NO_FILE_MESSAGE, NO_IMAGE_MESSAGE, UNREADABLE_FILE_MESSAGE,
};
pub use instruction::{build_instruction, Enhancement, EnhancementOptions, DEFAULT_INSTRUCTION};
pub use msg::Msg;
pub use narrative::{ProgressNarrative, PROGRESS_PHRASES};
pub use slider::{position_for_pointer, ComparisonSlider, HorizontalSpan, DEFAULT_POSITION};
pub use state::{
    AppState, ImageRef, Job, JobId, JobStatus, RestoredImage, SelectedPhoto, WorkflowPhase,
    WorkflowSettings, DEFAULT_UPLOAD_HINT_BYTES,
};
pub use update::update;
pub use view_model::{AppViewModel, ComparisonPair, EnhancementView};
