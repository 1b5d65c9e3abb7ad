//! Scene - Rotation Driver for the Rendered Cube
//!
//! Pure state for the one object on screen. The rendering host owns the
//! render loop and the pointer plumbing; this module only reacts to what the
//! host tells it and answers "how should the cube look right now".
//!
//! # Architecture
//!
//! ```text
//! render loop ── on_frame(delta) ──┐
//! pointer     ── enter/leave ──────┼──► RotationDriver ──► projection() ──► renderer
//! mouse       ── click ────────────┘     (Orientation,      (rotation,
//!                                          InteractionState)  scale, tint)
//! ```
//!
//! Nothing here can fail and nothing here knows about terminals.

mod driver;
mod projection;

pub use driver::{InteractionState, Orientation, RotationDriver, SceneEvent};
pub use projection::{Projection, Tint, ACTIVE_SCALE, IDLE_SCALE};
