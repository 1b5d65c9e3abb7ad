//! Prompt Form
//!
//! The input line, the Ask button and the response area, as plain state.
//! Rendering lives in [`crate::app`]; this module decides what they show and
//! whether a submission is allowed.

use gem3d_core::ResponseText;

/// Page title
pub const TITLE: &str = "Gemini 3 in 3D";

/// Shown in the empty input line
pub const INPUT_PLACEHOLDER: &str = "Ask Gemini 3 something...";

/// Shown before the first answer arrives (or when an answer is empty)
pub const RESPONSE_PLACEHOLDER: &str = "Your Gemini 3 response will appear here.";

/// Button label while idle
pub const ASK_LABEL: &str = "Ask";

/// Button label while a request is in flight
pub const THINKING_LABEL: &str = "Thinking...";

/// State of the prompt form
#[derive(Debug, Default)]
pub struct PromptForm {
    input: String,
    loading: bool,
    response: String,
}

impl PromptForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current prompt text
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submission needs a non-empty prompt and no request in flight
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.is_empty()
    }

    /// Start a submission
    ///
    /// Returns the prompt to send, or `None` when submission is disabled. The
    /// prompt stays in the input line.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.loading = true;
        Some(self.input.clone())
    }

    /// Store a finished response and leave the loading state
    pub fn complete(&mut self, text: ResponseText) {
        self.response = text.into_string();
        self.loading = false;
    }

    /// Button label for the current state
    pub fn button_label(&self) -> &'static str {
        if self.loading {
            THINKING_LABEL
        } else {
            ASK_LABEL
        }
    }

    /// Text for the response area
    pub fn response_text(&self) -> &str {
        if self.response.is_empty() {
            RESPONSE_PLACEHOLDER
        } else {
            &self.response
        }
    }
}
