use crate::{ImageRef, JobId};

/// Filename offered when the restored photo is saved locally.
pub const DEFAULT_DOWNLOAD_NAME: &str = "restored-photo.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the credential capability whether a usable key is present.
    CheckCredential,
    /// Hand a user-supplied key to the credential capability.
    RequestCredential { key: String },
    /// Start the cosmetic progress ticker for a job.
    StartProgress { job_id: JobId },
    /// Cancel the progress ticker. Emitted on both resolution paths.
    StopProgress { job_id: JobId },
    /// Encode the image and invoke the remote restoration capability.
    Restore {
        job_id: JobId,
        image: ImageRef,
        mime_type: String,
        instruction: String,
    },
    /// Drop a session-local image reference that is no longer shown.
    ReleaseImage { image: ImageRef },
    /// Offer the restored image for local save.
    Download {
        image: ImageRef,
        suggested_name: String,
    },
}
