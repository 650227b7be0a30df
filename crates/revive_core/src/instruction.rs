/// Instruction sent when every enhancement is enabled.
pub const DEFAULT_INSTRUCTION: &str = "Please restore this photo. Remove scratches, enhance details, improve clarity, and colorize if it's black and white. Make it look like a high-quality modern photograph while keeping the original faces and composition intact.";

const OPENING: &str = "Please restore this photo.";
const FACES_ON: &str =
    "Make it look like a high-quality modern photograph while keeping the original faces and composition intact.";
const FACES_OFF: &str = "Keep the original faces and composition exactly as they are.";
const NO_ACTIONS: &str = "Clean up the photo without altering its content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enhancement {
    Colorize,
    DenoiseSharpen,
    RemoveScratches,
    EnhanceFaces,
}

impl Enhancement {
    /// Display order on the configuration panel.
    pub const ALL: [Enhancement; 4] = [
        Enhancement::Colorize,
        Enhancement::DenoiseSharpen,
        Enhancement::RemoveScratches,
        Enhancement::EnhanceFaces,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Enhancement::Colorize => "AI Colorization",
            Enhancement::DenoiseSharpen => "Denoise & Sharpen",
            Enhancement::RemoveScratches => "Scratch & Noise Removal",
            Enhancement::EnhanceFaces => "Face Enhancement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancementOptions {
    pub colorize: bool,
    pub denoise_sharpen: bool,
    pub remove_scratches: bool,
    pub enhance_faces: bool,
}

impl Default for EnhancementOptions {
    fn default() -> Self {
        Self {
            colorize: true,
            denoise_sharpen: true,
            remove_scratches: true,
            enhance_faces: true,
        }
    }
}

impl EnhancementOptions {
    pub fn is_enabled(&self, enhancement: Enhancement) -> bool {
        match enhancement {
            Enhancement::Colorize => self.colorize,
            Enhancement::DenoiseSharpen => self.denoise_sharpen,
            Enhancement::RemoveScratches => self.remove_scratches,
            Enhancement::EnhanceFaces => self.enhance_faces,
        }
    }

    pub fn toggle(&mut self, enhancement: Enhancement) {
        let flag = match enhancement {
            Enhancement::Colorize => &mut self.colorize,
            Enhancement::DenoiseSharpen => &mut self.denoise_sharpen,
            Enhancement::RemoveScratches => &mut self.remove_scratches,
            Enhancement::EnhanceFaces => &mut self.enhance_faces,
        };
        *flag = !*flag;
    }
}

/// Builds the instruction text for the remote capability from the enabled toggles.
pub fn build_instruction(options: &EnhancementOptions) -> String {
    let mut actions: Vec<&str> = Vec::with_capacity(4);
    if options.remove_scratches {
        actions.push("remove scratches");
    }
    if options.denoise_sharpen {
        actions.push("enhance details");
        actions.push("improve clarity");
    }
    if options.colorize {
        actions.push("colorize if it's black and white");
    }

    let middle = if actions.is_empty() {
        NO_ACTIONS.to_string()
    } else {
        let mut sentence = join_actions(&actions);
        capitalize_first(&mut sentence);
        sentence.push('.');
        sentence
    };
    let closing = if options.enhance_faces {
        FACES_ON
    } else {
        FACES_OFF
    };
    format!("{OPENING} {middle} {closing}")
}

fn join_actions(actions: &[&str]) -> String {
    match actions {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

fn capitalize_first(text: &mut String) {
    if let Some(first) = text.chars().next() {
        let upper: String = first.to_uppercase().collect();
        text.replace_range(..first.len_utf8(), &upper);
    }
}
