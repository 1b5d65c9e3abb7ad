//! Theme and Colors
//!
//! Palette for the terminal host. The cube colors come straight from the
//! core [`Tint`]; the rest mirrors the dark page the scene sits on.

use ratatui::style::Color;

use gem3d_core::Tint;

// ============================================================================
// Cube
// ============================================================================

/// Terminal color for a cube tint
pub fn tint_color(tint: Tint) -> Color {
    let (r, g, b) = tint.rgb();
    Color::Rgb(r, g, b)
}

/// Frame around the scene
pub const SCENE_BORDER: Color = Color::Rgb(255, 255, 255);

// ============================================================================
// UI Colors
// ============================================================================

/// Title text
pub const TITLE: Color = Color::Rgb(255, 255, 255);

/// Button accent (cyan)
pub const BUTTON_ACCENT: Color = Color::Rgb(97, 218, 251);

/// Prompt text
pub const INPUT_TEXT: Color = Color::Rgb(230, 230, 230);

/// Placeholders and disabled controls
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Response text
pub const RESPONSE_TEXT: Color = Color::Rgb(170, 170, 170);

/// Status bar
pub const STATUS: Color = Color::DarkGray;
