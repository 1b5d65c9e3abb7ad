//! Screen layout
//!
//! Stacks the regions the way the page did: title, prompt row, response,
//! then the scene filling what is left, plus a status bar at the bottom.

use ratatui::layout::Rect;

/// Share of the flexible height given to the response area (percent)
const RESPONSE_SHARE: u16 = 30;

/// Minimum response height (lines)
const MIN_RESPONSE_HEIGHT: u16 = 2;

/// Regions of the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub input: Rect,
    pub response: Rect,
    pub scene: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Split `area` into regions
    ///
    /// Fixed rows: title, gap, prompt, gap, status. The rest is shared
    /// between response and scene.
    pub fn compute(area: Rect) -> Self {
        let width = area.width;
        let row = |y: u16, height: u16| Rect::new(area.x, area.y + y, width, height);

        let flexible = area.height.saturating_sub(5);
        let share = u32::from(flexible) * u32::from(RESPONSE_SHARE) / 100;
        let response_height = u16::try_from(share)
            .unwrap_or(flexible)
            .max(MIN_RESPONSE_HEIGHT)
            .min(flexible);
        let scene_height = flexible - response_height;

        Self {
            header: row(0, area.height.min(1)),
            input: row(2, u16::from(area.height > 2)),
            response: row(4, response_height),
            scene: row(4 + response_height, scene_height),
            status: row(area.height.saturating_sub(1), area.height.min(1)),
        }
    }
}
