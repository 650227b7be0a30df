use std::path::Path;

use revive_core::{Effect, FailureKind, Msg, RestoreFailure, RestoredImage, SelectedPhoto};
use revive_engine::{EngineEvent, EngineHandle, ErrorKind, ImageStore, RestoreError, StoreError};
use revive_logging::{redact_key, revive_debug, revive_info, revive_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn store(&self) -> &ImageStore {
        self.engine.store()
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CheckCredential => self.engine.check_credential(),
                Effect::RequestCredential { key } => {
                    revive_info!("RequestCredential key={}", redact_key(&key));
                    self.engine.request_credential(key);
                }
                Effect::StartProgress { job_id } => self.engine.start_progress(job_id),
                Effect::StopProgress { job_id } => self.engine.stop_progress(job_id),
                Effect::Restore {
                    job_id,
                    image,
                    mime_type,
                    instruction,
                } => {
                    revive_info!(
                        "Restore job_id={} image={} mime={} instruction_len={}",
                        job_id,
                        image,
                        mime_type,
                        instruction.len()
                    );
                    self.engine.restore(job_id, image, mime_type, instruction);
                }
                Effect::ReleaseImage { image } => {
                    if !self.store().release(image) {
                        revive_debug!("Image {} was already released", image);
                    }
                }
                Effect::Download {
                    image,
                    suggested_name,
                } => self.engine.save_image(image, suggested_name),
            }
        }
    }

    /// Drains pending engine events without blocking.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = event_to_msg(event) {
                msgs.push(msg);
            }
        }
        msgs
    }
}

/// Registers a user-chosen file and describes it for the workflow.
pub fn register_selection(store: &ImageStore, path: &Path) -> Result<SelectedPhoto, StoreError> {
    let image = store.register_file(path)?;
    let stored = store.get(image)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedPhoto {
        image,
        file_name,
        mime_type: stored.mime_type().to_string(),
        byte_len: stored.byte_len(),
    })
}

fn event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::CredentialChecked { present } => Some(Msg::CredentialChecked { present }),
        // The credential was already marked present when the request was sent.
        EngineEvent::CredentialStored => None,
        EngineEvent::CredentialFailed { reason } => Some(Msg::CredentialRequestFailed { reason }),
        EngineEvent::ProgressTick { job_id } => Some(Msg::ProgressTick { job_id }),
        EngineEvent::RestoreCompleted { job_id, result } => Some(Msg::RestoreFinished {
            job_id,
            result: result
                .map(|output| RestoredImage {
                    image: output.image,
                    mime_type: output.mime_type,
                })
                .map_err(|err| {
                    revive_warn!("Job {} failed: {}", job_id, err);
                    map_failure(err)
                }),
        }),
        EngineEvent::ImageSaved { result } => Some(Msg::DownloadFinished(
            result.map(|path| path.display().to_string()),
        )),
    }
}

fn map_failure(err: RestoreError) -> RestoreFailure {
    let kind = match err.kind {
        ErrorKind::Encode => FailureKind::Encode,
        ErrorKind::MissingCredential => FailureKind::MissingCredential,
        ErrorKind::CredentialRejected => FailureKind::CredentialRejected,
        ErrorKind::NoImage => FailureKind::NoImage,
        ErrorKind::InvalidEndpoint
        | ErrorKind::HttpStatus(_)
        | ErrorKind::Timeout
        | ErrorKind::TooLarge { .. }
        | ErrorKind::InvalidResponse
        | ErrorKind::Network => FailureKind::Remote,
    };
    RestoreFailure::new(kind, err.message)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use revive_engine::RestoreOutput;

    use super::*;

    fn failed(kind: ErrorKind, message: &str) -> Option<Msg> {
        event_to_msg(EngineEvent::RestoreCompleted {
            job_id: 3,
            result: Err(RestoreError {
                kind,
                message: message.to_string(),
            }),
        })
    }

    #[test]
    fn completed_restore_becomes_restored_image() {
        let msg = event_to_msg(EngineEvent::RestoreCompleted {
            job_id: 3,
            result: Ok(RestoreOutput {
                image: 9,
                mime_type: "image/png".to_string(),
                byte_len: 10,
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::RestoreFinished {
                job_id: 3,
                result: Ok(RestoredImage {
                    image: 9,
                    mime_type: "image/png".to_string(),
                }),
            })
        );
    }

    #[test]
    fn error_kinds_map_to_failure_kinds() {
        let cases = [
            (ErrorKind::Encode, FailureKind::Encode),
            (ErrorKind::MissingCredential, FailureKind::MissingCredential),
            (ErrorKind::CredentialRejected, FailureKind::CredentialRejected),
            (ErrorKind::NoImage, FailureKind::NoImage),
            (ErrorKind::HttpStatus(500), FailureKind::Remote),
            (ErrorKind::Timeout, FailureKind::Remote),
        ];
        for (kind, expected) in cases {
            let Some(Msg::RestoreFinished {
                result: Err(failure),
                ..
            }) = failed(kind, "boom")
            else {
                panic!("expected a failed RestoreFinished");
            };
            assert_eq!(failure.kind, expected);
            assert_eq!(failure.reason, "boom");
        }
    }

    #[test]
    fn credential_events() {
        assert_eq!(event_to_msg(EngineEvent::CredentialStored), None);
        assert_eq!(
            event_to_msg(EngineEvent::CredentialFailed {
                reason: "disk full".to_string()
            }),
            Some(Msg::CredentialRequestFailed {
                reason: "disk full".to_string()
            })
        );
    }

    #[test]
    fn selection_describes_registered_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("wedding-1962.png");
        std::fs::write(&path, [0u8; 12]).unwrap();

        let store = ImageStore::new();
        let photo = register_selection(&store, &path).unwrap();
        assert_eq!(photo.file_name, "wedding-1962.png");
        assert_eq!(photo.mime_type, "image/png");
        assert_eq!(photo.byte_len, 12);
        assert_eq!(store.len(), 1);
        assert!(register_selection(&store, &temp.path().join("missing.jpg")).is_err());
    }

    #[test]
    fn dropped_directory_is_refused_with_its_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = ImageStore::new();
        let err = register_selection(&store, temp.path()).unwrap_err();
        assert!(matches!(err, StoreError::NotAFile(_)));
        assert!(err.to_string().contains(&temp.path().display().to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn saved_path_is_reported_as_text() {
        let path = PathBuf::from("downloads").join("restored-photo.png");
        assert_eq!(
            event_to_msg(EngineEvent::ImageSaved {
                result: Ok(path.clone())
            }),
            Some(Msg::DownloadFinished(Ok(path.display().to_string())))
        );
    }
}
