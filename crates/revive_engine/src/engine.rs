use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use revive_logging::{revive_debug, revive_error, revive_info, revive_trace, revive_warn};
use tokio_util::sync::CancellationToken;

use crate::credential::{CredentialProvider, FileCredentialStore};
use crate::encode::{decode_payload, encode_payload};
use crate::persist::AtomicFileWriter;
use crate::restore::{GeminiRestorer, RestoreRequest, RestoreSettings, Restorer};
use crate::store::{ImageStore, StoredImage};
use crate::ticker::{spawn_ticker, TickSink};
use crate::{EngineEvent, ErrorKind, ImageId, JobId, RestoreError, RestoreOutput};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub restore: RestoreSettings,
    pub progress_interval: Duration,
    pub download_dir: PathBuf,
    /// Key provisioned through configuration before startup.
    pub provisioned_key: Option<String>,
    pub key_file: Option<PathBuf>,
}

impl EngineConfig {
    pub fn default_with_downloads(download_dir: PathBuf) -> Self {
        Self {
            restore: RestoreSettings::default(),
            progress_interval: Duration::from_secs(3),
            download_dir,
            provisioned_key: None,
            key_file: None,
        }
    }
}

enum EngineCommand {
    CheckCredential,
    RequestCredential {
        key: String,
    },
    Restore {
        job_id: JobId,
        image: ImageId,
        mime_type: String,
        instruction: String,
    },
    StartProgress {
        job_id: JobId,
    },
    StopProgress {
        job_id: JobId,
    },
    SaveImage {
        image: ImageId,
        filename: String,
    },
}

struct ChannelTickSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl TickSink for ChannelTickSink {
    fn tick(&self, job_id: JobId) {
        revive_trace!("Progress tick job_id={}", job_id);
        let _ = self.tx.send(EngineEvent::ProgressTick { job_id });
    }
}

struct Services {
    restorer: Arc<dyn Restorer>,
    credentials: Arc<dyn CredentialProvider>,
    store: ImageStore,
    progress_interval: Duration,
    download_dir: PathBuf,
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    store: ImageStore,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let restorer = Arc::new(GeminiRestorer::new(config.restore.clone()));
        let credentials = Arc::new(FileCredentialStore::new(
            config.provisioned_key.clone(),
            config.key_file.clone(),
        ));
        Self::with_services(config, restorer, credentials, ImageStore::new())
    }

    /// Builds an engine around explicit capabilities.
    pub fn with_services(
        config: EngineConfig,
        restorer: Arc<dyn Restorer>,
        credentials: Arc<dyn CredentialProvider>,
        store: ImageStore,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let services = Arc::new(Services {
            restorer,
            credentials,
            store: store.clone(),
            progress_interval: config.progress_interval,
            download_dir: config.download_dir,
        });

        thread::spawn(move || run_engine(services, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx,
            store,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn check_credential(&self) {
        self.send(EngineCommand::CheckCredential);
    }

    pub fn request_credential(&self, key: impl Into<String>) {
        self.send(EngineCommand::RequestCredential { key: key.into() });
    }

    pub fn restore(
        &self,
        job_id: JobId,
        image: ImageId,
        mime_type: impl Into<String>,
        instruction: impl Into<String>,
    ) {
        self.send(EngineCommand::Restore {
            job_id,
            image,
            mime_type: mime_type.into(),
            instruction: instruction.into(),
        });
    }

    pub fn start_progress(&self, job_id: JobId) {
        self.send(EngineCommand::StartProgress { job_id });
    }

    pub fn stop_progress(&self, job_id: JobId) {
        self.send(EngineCommand::StopProgress { job_id });
    }

    pub fn save_image(&self, image: ImageId, filename: impl Into<String>) {
        self.send(EngineCommand::SaveImage {
            image,
            filename: filename.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            revive_error!("Engine thread is gone; command dropped");
        }
    }
}

fn run_engine(
    services: Arc<Services>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            revive_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };
    // Owned by this loop only; commands are handled in arrival order.
    let mut tickers: HashMap<JobId, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::StartProgress { job_id } => {
                let sink = Arc::new(ChannelTickSink {
                    tx: event_tx.clone(),
                });
                let token = spawn_ticker(
                    runtime.handle(),
                    job_id,
                    services.progress_interval,
                    sink,
                );
                if let Some(previous) = tickers.insert(job_id, token) {
                    previous.cancel();
                }
                revive_debug!("Progress ticker started job_id={}", job_id);
            }
            EngineCommand::StopProgress { job_id } => {
                if let Some(token) = tickers.remove(&job_id) {
                    token.cancel();
                    revive_debug!("Progress ticker stopped job_id={}", job_id);
                }
            }
            command => {
                let services = services.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&services, command, event_tx).await;
                });
            }
        }
    }

    for (_, token) in tickers.drain() {
        token.cancel();
    }
}

async fn handle_command(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::CheckCredential => {
            let present = services.credentials.has_credential().await;
            revive_info!("Credential check present={}", present);
            let _ = event_tx.send(EngineEvent::CredentialChecked { present });
        }
        EngineCommand::RequestCredential { key } => {
            let event = match services.credentials.request_credential(&key).await {
                Ok(()) => EngineEvent::CredentialStored,
                Err(err) => {
                    revive_warn!("Credential request failed: {}", err);
                    EngineEvent::CredentialFailed {
                        reason: err.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        }
        EngineCommand::Restore {
            job_id,
            image,
            mime_type,
            instruction,
        } => {
            let result = run_restore(services, image, mime_type, instruction).await;
            match &result {
                Ok(output) => revive_info!(
                    "Restore job_id={} done image={} bytes={}",
                    job_id,
                    output.image,
                    output.byte_len
                ),
                Err(err) => revive_warn!("Restore job_id={} failed: {}", job_id, err),
            }
            let _ = event_tx.send(EngineEvent::RestoreCompleted { job_id, result });
        }
        EngineCommand::SaveImage { image, filename } => {
            let store = services.store.clone();
            let dir = services.download_dir.clone();
            let saved = tokio::task::spawn_blocking(move || {
                let bytes = store.read(image).map_err(|err| err.to_string())?;
                AtomicFileWriter::new(dir)
                    .write_new(&filename, &bytes)
                    .map_err(|err| err.to_string())
            })
            .await
            .unwrap_or_else(|err| Err(err.to_string()));
            match &saved {
                Ok(path) => revive_info!("Saved restored image to {:?}", path),
                Err(err) => revive_warn!("Failed to save restored image: {}", err),
            }
            let _ = event_tx.send(EngineEvent::ImageSaved { result: saved });
        }
        EngineCommand::StartProgress { .. } | EngineCommand::StopProgress { .. } => {}
    }
}

/// Encode, call, decode, register. Encoding always completes before the call is issued.
async fn run_restore(
    services: &Services,
    image: ImageId,
    mime_type: String,
    instruction: String,
) -> Result<RestoreOutput, RestoreError> {
    let api_key = services.credentials.api_key().await.ok_or_else(|| {
        RestoreError::new(ErrorKind::MissingCredential, "no api key connected")
    })?;

    let source = services
        .store
        .get(image)
        .map_err(|err| RestoreError::new(ErrorKind::Encode, err.to_string()))?;
    let bytes = match source {
        StoredImage::File { path, .. } => tokio::fs::read(&path)
            .await
            .map_err(|err| RestoreError::new(ErrorKind::Encode, err.to_string()))?,
        StoredImage::Memory { bytes, .. } => bytes.as_ref().clone(),
    };
    if bytes.is_empty() {
        return Err(RestoreError::new(ErrorKind::Encode, "selected file is empty"));
    }

    let request = RestoreRequest {
        payload: encode_payload(&bytes),
        mime_type,
        instruction,
    };
    revive_debug!(
        "Restore request image={} mime={} payload_len={}",
        image,
        request.mime_type,
        request.payload.len()
    );
    let restored = services.restorer.restore(&request, &api_key).await?;

    let decoded = decode_payload(&restored.data)
        .map_err(|err| RestoreError::new(ErrorKind::InvalidResponse, err.to_string()))?;
    let byte_len = decoded.len() as u64;
    let id = services
        .store
        .register_bytes(decoded, restored.mime_type.clone())
        .map_err(|err| RestoreError::new(ErrorKind::InvalidResponse, err.to_string()))?;

    Ok(RestoreOutput {
        image: id,
        mime_type: restored.mime_type,
        byte_len,
    })
}
