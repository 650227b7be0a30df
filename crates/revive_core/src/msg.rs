use crate::{Enhancement, JobId, RestoreFailure, RestoredImage, SelectedPhoto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file; its preview reference is already allocated.
    FileSelected(SelectedPhoto),
    /// The picked or dropped path could not be opened.
    SelectionFailed { reason: String },
    /// User flipped one of the enhancement toggles.
    EnhancementToggled(Enhancement),
    /// User clicked Restore. `requested_at_ms` becomes the job timestamp.
    RestoreClicked { requested_at_ms: u64 },
    /// Engine resolution of the remote restoration call.
    RestoreFinished {
        job_id: JobId,
        result: Result<RestoredImage, RestoreFailure>,
    },
    /// Progress ticker fired for a job.
    ProgressTick { job_id: JobId },
    /// User clicked Reset on the configuration panel.
    ResetClicked,
    /// User clicked New Restoration on the result panel.
    NewRestorationClicked,
    /// User clicked Download on the result panel.
    DownloadClicked,
    /// Engine finished saving: the written path, or a failure reason.
    DownloadFinished(Result<String, String>),
    /// Credential capability answered a presence check.
    CredentialChecked { present: bool },
    /// User submitted a key through the connect affordance.
    ConnectCredentialClicked { key: String },
    /// Credential capability failed to store the submitted key.
    CredentialRequestFailed { reason: String },
    /// User closed the error banner.
    DismissError,
}
