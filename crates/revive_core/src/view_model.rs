use crate::{Enhancement, ImageRef, WorkflowPhase};

/// The two images shown by the comparison slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComparisonPair {
    pub before: ImageRef,
    pub after: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementView {
    pub enhancement: Enhancement,
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: WorkflowPhase,
    pub file_name: Option<String>,
    pub file_size_hint_exceeded: bool,
    pub upload_hint_bytes: u64,
    pub preview: Option<ImageRef>,
    /// Present only once the job has completed.
    pub comparison: Option<ComparisonPair>,
    pub enhancements: Vec<EnhancementView>,
    pub toggles_locked: bool,
    pub progress_phrase: Option<&'static str>,
    pub restore_enabled: bool,
    pub reset_enabled: bool,
    pub picker_enabled: bool,
    pub credential_present: bool,
    pub error: Option<String>,
    pub last_saved: Option<String>,
    pub dirty: bool,
}
