//! Rotation Driver
//!
//! Two unbounded angle accumulators advanced by the host's frame delta, and
//! two independent interaction flags flipped by pointer events. The frame
//! callback never touches the flags and pointer events never touch the
//! angles.

use std::time::Duration;

use super::projection::{Projection, Tint, ACTIVE_SCALE, IDLE_SCALE};

/// Input delivered by the rendering host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    /// A frame was rendered; `delta` seconds elapsed since the previous one
    Frame {
        /// Seconds since the previous frame
        delta: f64,
    },
    /// Pointer moved onto the cube
    PointerEnter,
    /// Pointer moved off the cube
    PointerLeave,
    /// Cube was clicked
    Click,
}

/// Accumulated rotation in radians
///
/// Grows without bound; the renderer's trig functions wrap it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about the X axis
    pub x: f64,
    /// Rotation about the Y axis
    pub y: f64,
}

/// Pointer-driven flags; any combination is valid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Pointer is over the cube
    pub hovered: bool,
    /// Toggled by each click
    pub active: bool,
}

/// State machine behind the rotating cube
///
/// Created at mount with zero rotation and both flags cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RotationDriver {
    orientation: Orientation,
    interaction: InteractionState,
}

impl RotationDriver {
    /// Create a driver in its mounted state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both axes by `delta` seconds (call once per rendered frame)
    ///
    /// The host guarantees a non-negative delta.
    pub fn on_frame(&mut self, delta: f64) {
        debug_assert!(delta >= 0.0, "frame delta must be non-negative");
        self.orientation.x += delta;
        self.orientation.y += delta;
    }

    /// [`on_frame`](Self::on_frame) for hosts that measure with `Instant`
    pub fn on_frame_duration(&mut self, delta: Duration) {
        self.on_frame(delta.as_secs_f64());
    }

    /// Pointer moved onto the cube
    pub fn pointer_enter(&mut self) {
        self.interaction.hovered = true;
    }

    /// Pointer moved off the cube
    pub fn pointer_leave(&mut self) {
        self.interaction.hovered = false;
    }

    /// Cube was clicked
    pub fn click(&mut self) {
        self.interaction.active = !self.interaction.active;
    }

    /// Dispatch a host event
    pub fn apply(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Frame { delta } => self.on_frame(delta),
            SceneEvent::PointerEnter => self.pointer_enter(),
            SceneEvent::PointerLeave => self.pointer_leave(),
            SceneEvent::Click => self.click(),
        }
    }

    /// Current accumulated rotation
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current pointer flags
    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Scale for the current state
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.interaction.active {
            ACTIVE_SCALE
        } else {
            IDLE_SCALE
        }
    }

    /// Tint for the current state
    #[must_use]
    pub fn tint(&self) -> Tint {
        if self.interaction.hovered {
            Tint::Hovered
        } else {
            Tint::Idle
        }
    }

    /// Everything the renderer needs for this frame
    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection {
            rotation_x: self.orientation.x,
            rotation_y: self.orientation.y,
            scale: self.scale(),
            tint: self.tint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_mounted_state() {
        let driver = RotationDriver::new();
        assert_eq!(driver.orientation(), Orientation { x: 0.0, y: 0.0 });
        assert_eq!(driver.interaction(), InteractionState::default());

        let projection = driver.projection();
        assert!((projection.scale - 1.0).abs() < EPS);
        assert_eq!(projection.tint, Tint::Idle);
    }

    #[test]
    fn test_frames_accumulate_on_both_axes() {
        let mut driver = RotationDriver::new();
        let deltas = [0.016, 0.017, 0.0, 0.5, 0.033];
        for d in deltas {
            driver.on_frame(d);
        }
        let sum: f64 = deltas.iter().sum();
        assert!((driver.orientation().x - sum).abs() < EPS);
        assert!((driver.orientation().y - sum).abs() < EPS);
    }

    #[test]
    fn test_no_wraparound() {
        let mut driver = RotationDriver::new();
        for _ in 0..1000 {
            driver.on_frame(0.1);
        }
        // Well past 2π, still growing
        assert!((driver.orientation().x - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_duration_variant() {
        let mut driver = RotationDriver::new();
        driver.on_frame_duration(Duration::from_millis(250));
        assert!((driver.orientation().x - 0.25).abs() < EPS);
    }

    #[test]
    fn test_hover_flags() {
        let mut driver = RotationDriver::new();
        driver.pointer_enter();
        assert!(driver.interaction().hovered);
        assert_eq!(driver.tint(), Tint::Hovered);

        // Repeated enter is idempotent
        driver.pointer_enter();
        assert!(driver.interaction().hovered);

        driver.pointer_leave();
        assert!(!driver.interaction().hovered);
        assert_eq!(driver.tint(), Tint::Idle);
    }

    #[test]
    fn test_click_toggles_active() {
        let mut driver = RotationDriver::new();
        driver.click();
        assert!(driver.interaction().active);
        assert!((driver.scale() - 1.5).abs() < EPS);

        driver.click();
        assert!(!driver.interaction().active);
        assert!((driver.scale() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_flags_independent() {
        let mut driver = RotationDriver::new();
        driver.pointer_enter();
        driver.click();
        assert_eq!(
            driver.interaction(),
            InteractionState {
                hovered: true,
                active: true
            }
        );

        driver.pointer_leave();
        assert!(driver.interaction().active, "leave must not clear active");
    }

    #[test]
    fn test_apply_dispatch() {
        let mut driver = RotationDriver::new();
        driver.apply(SceneEvent::Frame { delta: 0.2 });
        driver.apply(SceneEvent::PointerEnter);
        driver.apply(SceneEvent::Click);
        driver.apply(SceneEvent::PointerLeave);

        let p = driver.projection();
        assert!((p.rotation_x - 0.2).abs() < EPS);
        assert!((p.rotation_y - 0.2).abs() < EPS);
        assert!((p.scale - 1.5).abs() < EPS);
        assert_eq!(p.tint, Tint::Idle);
    }

    #[test]
    fn test_accumulators_sum_deltas_across_interleaved_events() {
        let mut driver = RotationDriver::new();
        let mut expected = 0.0;
        let mut clicks = 0;

        for i in 0..300_u32 {
            let delta = f64::from(i % 7) * 0.013;
            driver.apply(SceneEvent::Frame { delta });
            expected += delta;

            match i % 5 {
                0 => driver.apply(SceneEvent::PointerEnter),
                1 | 3 => {
                    driver.apply(SceneEvent::Click);
                    clicks += 1;
                }
                2 => driver.apply(SceneEvent::PointerLeave),
                _ => {}
            }
        }

        let orientation = driver.orientation();
        assert!((orientation.x - expected).abs() < EPS);
        assert!((orientation.y - expected).abs() < EPS);
        assert_eq!(driver.interaction().active, clicks % 2 == 1);
        // Last pointer event at i = 297 was a leave
        assert!(!driver.interaction().hovered);
    }
}
