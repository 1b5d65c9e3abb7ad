//! gem3d TUI - terminal host for the prompt form and the spinning cube
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering, one layer per screen region
//! - **Form / Submission**: Prompt state and background fetches
//! - **Scene**: Braille wireframe of the cube driven by `gem3d_core::RotationDriver`
//! - **Widgets**: Borderless scrollable text block for the response

pub mod app;
pub mod cli;
pub mod compositor;
pub mod form;
pub mod layout;
pub mod scene;
pub mod submission;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use cli::Args;
pub use form::PromptForm;
pub use submission::{SubmissionId, Submitter};
