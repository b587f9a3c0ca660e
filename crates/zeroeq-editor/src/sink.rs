//! Rendering backends for response curves.
//!
//! The curve engine only knows how to hand over a polyline in plot-local
//! pixel coordinates. [`CurveSink`] is that seam; [`EguiCurveSink`] turns
//! the points into an `egui` shape, and `Vec<[f32; 2]>` simply records them.

use egui::{Color32, Pos2, Rect, Shape, Stroke};

/// Accepts a curve as a polyline and draws it.
pub trait CurveSink {
    /// Draws one connected line through `points` (plot-local `[x, y]` pixels).
    fn polyline(&mut self, points: &[[f32; 2]]);
}

impl CurveSink for Vec<[f32; 2]> {
    fn polyline(&mut self, points: &[[f32; 2]]) {
        self.clear();
        self.extend_from_slice(points);
    }
}

/// Collects curves as `egui` line shapes positioned inside `rect`.
///
/// ```rust,ignore
/// let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
/// let mut sink = EguiCurveSink::new(rect, Stroke::new(2.0, Color32::WHITE));
/// curve.render_to(&mut sink);
/// ui.painter().extend(sink.into_shapes());
/// ```
#[derive(Debug, Clone)]
pub struct EguiCurveSink {
    rect: Rect,
    stroke: Stroke,
    shapes: Vec<Shape>,
}

impl EguiCurveSink {
    /// Default curve stroke.
    pub const DEFAULT_STROKE: Stroke = Stroke {
        width: 2.0,
        color: Color32::WHITE,
    };

    /// Sink drawing into `rect` with `stroke`.
    pub fn new(rect: Rect, stroke: Stroke) -> Self {
        Self {
            rect,
            stroke,
            shapes: Vec::new(),
        }
    }

    /// Target rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Shapes collected so far.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Consumes the sink, returning its shapes for `Painter::extend`.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl CurveSink for EguiCurveSink {
    fn polyline(&mut self, points: &[[f32; 2]]) {
        if points.len() < 2 {
            return;
        }
        let origin = self.rect.min;
        let points: Vec<Pos2> = points
            .iter()
            .map(|&[x, y]| Pos2::new(origin.x + x, origin.y + y))
            .collect();
        self.shapes.push(Shape::line(points, self.stroke));
    }
}
