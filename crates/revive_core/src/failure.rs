use std::fmt;

pub const NO_FILE_MESSAGE: &str = "Choose a photo to restore first.";
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Connect your API key to start restoring photos.";
pub const CREDENTIAL_REJECTED_MESSAGE: &str =
    "Your API key was rejected. Please reconnect your API key and try again.";
pub const ENCODE_FAILED_MESSAGE: &str = "Error reading file. Please choose the photo again.";
pub const NO_IMAGE_MESSAGE: &str = "No image was returned from the restoration process.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to restore image. Please try again.";
pub const UNREADABLE_FILE_MESSAGE: &str = "That file could not be opened. Please choose a photo.";
pub const EMPTY_KEY_MESSAGE: &str = "Enter an API key before connecting.";

/// Lowercase substrings that identify a rejected credential in a failure reason.
const CREDENTIAL_MARKERS: &[&str] = &[
    "invalid api key",
    "api key not valid",
    "api_key_invalid",
    "requested entity was not found",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The selected file could not be read or encoded.
    Encode,
    /// No credential was available when the call was about to be made.
    MissingCredential,
    /// The remote service rejected the credential.
    CredentialRejected,
    /// The remote call succeeded but carried no image part.
    NoImage,
    /// Any other remote or transport failure.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl RestoreFailure {
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// True when the failure should demote the confirmed credential.
    pub fn is_credential_rejection(&self) -> bool {
        match self.kind {
            FailureKind::MissingCredential | FailureKind::CredentialRejected => true,
            FailureKind::Remote => is_credential_rejection(&self.reason),
            FailureKind::Encode | FailureKind::NoImage => false,
        }
    }

    /// Human-readable banner text for this failure.
    pub fn user_message(&self) -> String {
        if self.kind == FailureKind::MissingCredential {
            return MISSING_CREDENTIAL_MESSAGE.to_string();
        }
        if self.is_credential_rejection() {
            return CREDENTIAL_REJECTED_MESSAGE.to_string();
        }
        match self.kind {
            FailureKind::Encode => ENCODE_FAILED_MESSAGE.to_string(),
            FailureKind::NoImage => NO_IMAGE_MESSAGE.to_string(),
            FailureKind::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            FailureKind::CredentialRejected => CREDENTIAL_REJECTED_MESSAGE.to_string(),
            FailureKind::Remote => {
                let reason = self.reason.trim();
                if reason.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    reason.to_string()
                }
            }
        }
    }
}

impl fmt::Display for RestoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.reason)
    }
}

/// Case-insensitive check for a credential-rejection marker in a failure reason.
pub fn is_credential_rejection(reason: &str) -> bool {
    let lowered = reason.to_ascii_lowercase();
    CREDENTIAL_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
