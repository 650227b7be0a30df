use crate::view_model::{AppViewModel, ComparisonPair, EnhancementView};
use crate::{Effect, Enhancement, EnhancementOptions, ProgressNarrative};

pub type JobId = u64;
/// Session-local handle to an image held by the engine's store.
pub type ImageRef = u64;

/// Soft upload size guidance; larger files are accepted with a hint.
pub const DEFAULT_UPLOAD_HINT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    FileSelected,
    Processing,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPhoto {
    pub image: ImageRef,
    pub file_name: String,
    pub mime_type: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredImage {
    pub image: ImageRef,
    pub mime_type: String,
}

/// Failures are surfaced as banner text and never retained as a job state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Processing,
    Completed { restored: RestoredImage },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    original: ImageRef,
    created_at_ms: u64,
    status: JobStatus,
}

impl Job {
    pub(crate) fn processing(id: JobId, original: ImageRef, created_at_ms: u64) -> Self {
        Self {
            id,
            original,
            created_at_ms,
            status: JobStatus::Processing,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn original(&self) -> ImageRef {
        self.original
    }

    pub fn created_at_ms(&self) -> u64 {
        self.created_at_ms
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.status, JobStatus::Processing)
    }

    /// The restored image; only reachable once the job has completed.
    pub fn restored(&self) -> Option<&RestoredImage> {
        match &self.status {
            JobStatus::Completed { restored } => Some(restored),
            JobStatus::Processing => None,
        }
    }

    pub(crate) fn complete(&mut self, restored: RestoredImage) {
        self.status = JobStatus::Completed { restored };
    }
}

/// Construction-time configuration for the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// A credential was provisioned through configuration before startup.
    pub credential_provisioned: bool,
    pub upload_hint_bytes: u64,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            credential_provisioned: false,
            upload_hint_bytes: DEFAULT_UPLOAD_HINT_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: WorkflowSettings,
    photo: Option<SelectedPhoto>,
    job: Option<Job>,
    enhancements: EnhancementOptions,
    narrative: ProgressNarrative,
    credential_present: bool,
    error: Option<String>,
    last_saved: Option<String>,
    next_job_id: JobId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(WorkflowSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: WorkflowSettings) -> Self {
        Self {
            settings,
            photo: None,
            job: None,
            enhancements: EnhancementOptions::default(),
            narrative: ProgressNarrative::default(),
            credential_present: settings.credential_provisioned,
            error: None,
            last_saved: None,
            next_job_id: 1,
            dirty: false,
        }
    }

    /// Effects the platform runs once before the first message.
    pub fn startup_effects(&self) -> Vec<Effect> {
        vec![Effect::CheckCredential]
    }

    pub fn phase(&self) -> WorkflowPhase {
        match (&self.photo, &self.job) {
            (None, _) => WorkflowPhase::Idle,
            (Some(_), Some(job)) if job.is_processing() => WorkflowPhase::Processing,
            (Some(_), Some(_)) => WorkflowPhase::Success,
            (Some(_), None) => WorkflowPhase::FileSelected,
        }
    }

    pub fn photo(&self) -> Option<&SelectedPhoto> {
        self.photo.as_ref()
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn enhancements(&self) -> &EnhancementOptions {
        &self.enhancements
    }

    pub fn narrative(&self) -> &ProgressNarrative {
        &self.narrative
    }

    pub fn credential_present(&self) -> bool {
        self.credential_present
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let phase = self.phase();
        let comparison = self.job.as_ref().and_then(|job| {
            job.restored().map(|restored| ComparisonPair {
                before: job.original(),
                after: restored.image,
            })
        });
        AppViewModel {
            phase,
            file_name: self.photo.as_ref().map(|photo| photo.file_name.clone()),
            file_size_hint_exceeded: self
                .photo
                .as_ref()
                .is_some_and(|photo| photo.byte_len > self.settings.upload_hint_bytes),
            upload_hint_bytes: self.settings.upload_hint_bytes,
            preview: self.photo.as_ref().map(|photo| photo.image),
            comparison,
            enhancements: Enhancement::ALL
                .iter()
                .map(|&enhancement| EnhancementView {
                    enhancement,
                    label: enhancement.label(),
                    enabled: self.enhancements.is_enabled(enhancement),
                })
                .collect(),
            toggles_locked: phase == WorkflowPhase::Processing,
            progress_phrase: self.narrative.phrase(),
            restore_enabled: phase == WorkflowPhase::FileSelected,
            reset_enabled: matches!(
                phase,
                WorkflowPhase::FileSelected | WorkflowPhase::Success
            ),
            picker_enabled: phase != WorkflowPhase::Processing,
            credential_present: self.credential_present,
            error: self.error.clone(),
            last_saved: self.last_saved.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_credential_present(&mut self, present: bool) {
        if self.credential_present != present {
            self.credential_present = present;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_last_saved(&mut self, path: String) {
        self.last_saved = Some(path);
        self.mark_dirty();
    }

    pub(crate) fn toggle_enhancement(&mut self, enhancement: Enhancement) {
        self.enhancements.toggle(enhancement);
        self.mark_dirty();
    }

    /// Replaces the selection, returning release effects for superseded references.
    pub(crate) fn replace_photo(&mut self, photo: SelectedPhoto) -> Vec<Effect> {
        let mut effects = self.release_result();
        if let Some(previous) = self.photo.take() {
            if previous.image != photo.image {
                effects.push(Effect::ReleaseImage {
                    image: previous.image,
                });
            }
        }
        self.photo = Some(photo);
        self.error = None;
        self.last_saved = None;
        self.mark_dirty();
        effects
    }

    /// Opens the single job slot for a new restoration.
    pub(crate) fn begin_job(&mut self, original: ImageRef, created_at_ms: u64) -> JobId {
        let id = self.next_job_id;
        self.next_job_id += 1;
        self.job = Some(Job::processing(id, original, created_at_ms));
        self.narrative.start();
        self.error = None;
        self.last_saved = None;
        self.mark_dirty();
        id
    }

    pub(crate) fn in_flight_job_id(&self) -> Option<JobId> {
        self.job
            .as_ref()
            .filter(|job| job.is_processing())
            .map(Job::id)
    }

    pub(crate) fn advance_narrative(&mut self) {
        if self.narrative.advance() {
            self.mark_dirty();
        }
    }

    pub(crate) fn complete_job(&mut self, restored: RestoredImage) {
        if let Some(job) = self.job.as_mut() {
            job.complete(restored);
        }
        self.narrative.stop();
        self.error = None;
        self.mark_dirty();
    }

    /// Discards the in-flight job; the selection stays so the user may retry.
    pub(crate) fn discard_job(&mut self) {
        self.job = None;
        self.narrative.stop();
        self.mark_dirty();
    }

    /// Returns to `Idle`, releasing every held reference.
    pub(crate) fn reset(&mut self) -> Vec<Effect> {
        let mut effects = self.release_result();
        if let Some(photo) = self.photo.take() {
            effects.push(Effect::ReleaseImage { image: photo.image });
        }
        self.enhancements = EnhancementOptions::default();
        self.narrative.stop();
        self.error = None;
        self.last_saved = None;
        self.mark_dirty();
        effects
    }

    fn release_result(&mut self) -> Vec<Effect> {
        match self.job.take() {
            Some(job) => job
                .restored()
                .map(|restored| Effect::ReleaseImage {
                    image: restored.image,
                })
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }
}
