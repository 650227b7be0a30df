use std::fmt;
use std::path::PathBuf;

pub type JobId = u64;
pub type ImageId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CredentialChecked { present: bool },
    CredentialStored,
    CredentialFailed { reason: String },
    ProgressTick { job_id: JobId },
    RestoreCompleted {
        job_id: JobId,
        result: Result<RestoreOutput, RestoreError>,
    },
    ImageSaved { result: Result<PathBuf, String> },
}

/// A restored image registered in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutput {
    pub image: ImageId,
    pub mime_type: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RestoreError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RestoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source image could not be read or encoded.
    Encode,
    /// No key is available to authorize the call.
    MissingCredential,
    /// The service refused the key.
    CredentialRejected,
    /// The response carried no image part.
    NoImage,
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidResponse,
    Network,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Encode => write!(f, "encode error"),
            ErrorKind::MissingCredential => write!(f, "missing credential"),
            ErrorKind::CredentialRejected => write!(f, "credential rejected"),
            ErrorKind::NoImage => write!(f, "no image returned"),
            ErrorKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            ErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            ErrorKind::InvalidResponse => write!(f, "invalid response"),
            ErrorKind::Network => write!(f, "network error"),
        }
    }
}
