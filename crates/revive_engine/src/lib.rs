//! Revive engine: IO for the restoration workflow and effect execution.
mod credential;
mod encode;
mod engine;
mod persist;
mod restore;
mod store;
mod ticker;
mod types;

pub use credential::{CredentialError, CredentialProvider, FileCredentialStore};
pub use encode::{decode_payload, encode_payload, strip_data_url_prefix, EncodeError};
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use restore::{GeminiRestorer, RestoreRequest, RestoreSettings, RestoredPayload, Restorer};
pub use store::{mime_for_path, ImageStore, StoreError, StoredImage};
pub use ticker::{spawn_ticker, TickSink};
pub use types::{EngineEvent, ErrorKind, ImageId, JobId, RestoreError, RestoreOutput};
