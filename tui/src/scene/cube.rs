//! Cube Renderer
//!
//! Draws the unit box as a Braille wireframe on a ratatui canvas. The camera
//! sits on the +Z axis looking at the origin; rotation is applied in XYZ
//! Euler order (Y first, then X, as a column-vector product `Rx * Ry`).

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line};
use ratatui::widgets::Widget;

use gem3d_core::Projection;

use crate::theme::tint_color;

/// Camera distance from the origin
const CAMERA_Z: f64 = 5.0;

/// Vertical field of view (degrees)
const FOV_DEG: f64 = 75.0;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Corners of the unit box centered on the origin
const VERTICES: [[f64; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Vertex index pairs forming the twelve edges
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Projected cube for one frame and one drawing area
#[derive(Debug, Clone, PartialEq)]
pub struct CubeView {
    /// Screen-space vertices in canvas units (x in `[-aspect, aspect]`, y in `[-1, 1]`)
    points: [(f64, f64); 8],
    /// Half-width of the canvas in canvas units
    aspect: f64,
    area: Rect,
    projection: Projection,
}

impl CubeView {
    /// Project the cube into `area`
    pub fn new(projection: Projection, area: Rect) -> Self {
        let aspect = if area.height == 0 {
            1.0
        } else {
            f64::from(area.width) / (f64::from(area.height) * CELL_ASPECT)
        };
        let focal = 1.0 / (FOV_DEG.to_radians() / 2.0).tan();

        let points = VERTICES.map(|v| {
            let [x, y, z] = rotate(scale(v, projection.scale), projection);
            let depth = CAMERA_Z - z;
            (x * focal / depth, y * focal / depth)
        });

        Self {
            points,
            aspect,
            area,
            projection,
        }
    }

    /// Smallest cell rectangle covering every projected vertex, clipped to the area
    pub fn footprint(&self) -> Option<Rect> {
        if self.area.is_empty() {
            return None;
        }

        let (mut min_col, mut max_col) = (f64::MAX, f64::MIN);
        let (mut min_row, mut max_row) = (f64::MAX, f64::MIN);
        for &(x, y) in &self.points {
            let (col, row) = self.to_cell(x, y);
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            min_row = min_row.min(row);
            max_row = max_row.max(row);
        }

        let width = f64::from(self.area.width);
        let height = f64::from(self.area.height);
        let left = min_col.floor().clamp(0.0, width) as u16;
        let right = max_col.ceil().clamp(0.0, width) as u16;
        let top = min_row.floor().clamp(0.0, height) as u16;
        let bottom = max_row.ceil().clamp(0.0, height) as u16;

        let rect = Rect::new(
            self.area.x + left,
            self.area.y + top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        );
        (!rect.is_empty()).then_some(rect)
    }

    /// Map canvas units to fractional cell coordinates within the area
    fn to_cell(&self, x: f64, y: f64) -> (f64, f64) {
        let col = (x + self.aspect) / (2.0 * self.aspect) * f64::from(self.area.width);
        let row = (1.0 - y) / 2.0 * f64::from(self.area.height);
        (col, row)
    }
}

impl Widget for &CubeView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = tint_color(self.projection.tint);
        let points = self.points;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-self.aspect, self.aspect])
            .y_bounds([-1.0, 1.0])
            .paint(move |ctx| {
                for (a, b) in EDGES {
                    let (x1, y1) = points[a];
                    let (x2, y2) = points[b];
                    ctx.draw(&Line::new(x1, y1, x2, y2, color));
                }
            })
            .render(area, buf);
    }
}

fn scale(v: [f64; 3], factor: f64) -> [f64; 3] {
    v.map(|c| c * factor)
}

fn rotate([x, y, z]: [f64; 3], projection: Projection) -> [f64; 3] {
    let (sin_y, cos_y) = projection.rotation_y.sin_cos();
    let (sin_x, cos_x) = projection.rotation_x.sin_cos();

    // Y axis
    let (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);
    // X axis
    let (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

    [x, y, z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gem3d_core::{RotationDriver, Tint};

    fn still(scale: f64) -> Projection {
        Projection {
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale,
            tint: Tint::Idle,
        }
    }

    #[test]
    fn test_rotation_identity_at_zero() {
        let v = rotate([0.5, -0.5, 0.5], still(1.0));
        assert!((v[0] - 0.5).abs() < 1e-12);
        assert!((v[1] + 0.5).abs() < 1e-12);
        assert!((v[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let mut projection = still(1.0);
        projection.rotation_y = std::f64::consts::FRAC_PI_2;
        // +X swings to -Z
        let v = rotate([1.0, 0.0, 0.0], projection);
        assert!(v[0].abs() < 1e-12);
        assert!((v[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_footprint_centered() {
        let area = Rect::new(0, 0, 80, 20);
        let footprint = CubeView::new(still(1.0), area)
            .footprint()
            .expect("cube is visible");

        let center_col = footprint.x + footprint.width / 2;
        let center_row = footprint.y + footprint.height / 2;
        assert!((38..=42).contains(&center_col), "col {center_col}");
        assert!((8..=12).contains(&center_row), "row {center_row}");
        assert!(footprint.width < area.width);
        assert!(footprint.height < area.height);
    }

    #[test]
    fn test_active_footprint_is_larger() {
        let area = Rect::new(0, 0, 80, 24);
        let mut driver = RotationDriver::new();
        let idle = CubeView::new(driver.projection(), area)
            .footprint()
            .expect("visible");
        driver.click();
        let active = CubeView::new(driver.projection(), area)
            .footprint()
            .expect("visible");

        assert!(active.width > idle.width);
        assert!(active.height > idle.height);
    }

    #[test]
    fn test_footprint_offset_by_area() {
        let base = CubeView::new(still(1.0), Rect::new(0, 0, 60, 20))
            .footprint()
            .expect("visible");
        let shifted = CubeView::new(still(1.0), Rect::new(5, 3, 60, 20))
            .footprint()
            .expect("visible");
        assert_eq!(shifted.x, base.x + 5);
        assert_eq!(shifted.y, base.y + 3);
    }

    #[test]
    fn test_empty_area_has_no_footprint() {
        assert_eq!(CubeView::new(still(1.0), Rect::new(0, 0, 0, 0)).footprint(), None);
    }

    #[test]
    fn test_render_draws_in_tint() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let mut projection = still(1.5);
        projection.tint = Tint::Hovered;

        (&CubeView::new(projection, area)).render(area, &mut buf);

        let pink = tint_color(Tint::Hovered);
        let drawn = buf
            .content
            .iter()
            .filter(|cell| cell.fg == pink && cell.symbol() != " ")
            .count();
        assert!(drawn > 0, "wireframe should paint some cells");
    }
}
