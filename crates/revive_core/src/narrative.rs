/// Status phrases shown in order while the remote call is outstanding.
pub const PROGRESS_PHRASES: &[&str] = &[
    "Analyzing photo damage...",
    "Removing scratches and noise...",
    "Enhancing facial details...",
    "Restoring natural colors...",
    "Sharpening fine details...",
    "Finalizing your restored photo...",
];

/// Timer-driven progress narrative. Holds no notion of real progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressNarrative {
    step: Option<usize>,
}

impl ProgressNarrative {
    pub fn start(&mut self) {
        self.step = Some(0);
    }

    pub fn stop(&mut self) {
        self.step = None;
    }

    /// Moves to the next phrase, holding on the last one. Returns true if the phrase changed.
    pub fn advance(&mut self) -> bool {
        match self.step {
            Some(step) if step + 1 < PROGRESS_PHRASES.len() => {
                self.step = Some(step + 1);
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.step.is_some()
    }

    pub fn step(&self) -> Option<usize> {
        self.step
    }

    pub fn phrase(&self) -> Option<&'static str> {
        self.step.map(|step| PROGRESS_PHRASES[step])
    }
}
