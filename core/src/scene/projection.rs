//! Projection - what the host reads every frame

/// Scale while the cube is active (clicked on)
pub const ACTIVE_SCALE: f64 = 1.5;

/// Scale while the cube is not active
pub const IDLE_SCALE: f64 = 1.0;

/// Surface tint of the cube
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// Pointer is elsewhere (orange)
    Idle,
    /// Pointer is over the cube (hot pink)
    Hovered,
}

impl Tint {
    /// CSS color name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "orange",
            Self::Hovered => "hotpink",
        }
    }

    /// RGB components
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Idle => (255, 165, 0),
            Self::Hovered => (255, 105, 180),
        }
    }
}

/// Presentation of the cube derived from driver state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Rotation about the X axis (radians)
    pub rotation_x: f64,
    /// Rotation about the Y axis (radians)
    pub rotation_y: f64,
    /// Uniform scale
    pub scale: f64,
    /// Surface tint
    pub tint: Tint,
}
