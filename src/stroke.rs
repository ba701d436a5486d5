//! Stroke capture: pointer movement in, ordered strokes out.
//!
//! Coordinates arriving here are already canvas-relative (see
//! `canvas::surface_point`); the capture does not know whether they came from a
//! mouse or a finger.

use crate::error::StrokeError;
use crate::geometry::Point;

pub const DEFAULT_PEN_COLOR: &str = "#2b2b2b";

/// One pointer-down to pointer-up gesture. Never empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    points: Vec<Point>,
    pub color: String,
}

impl Stroke {
    pub fn begin(start: Point, color: impl Into<String>) -> Self {
        Self {
            points: vec![start],
            color: color.into(),
        }
    }

    /// Build a finished stroke from recorded points. Returns `None` for an empty list.
    pub fn from_points(points: Vec<Point>, color: impl Into<String>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            color: color.into(),
        })
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    // Kept for clippy's len_without_is_empty; a stroke always has its start point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The strokes of one drawing attempt, in drawing order, plus the one in progress.
#[derive(Clone, Debug)]
pub struct StrokeCapture {
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    pen_color: String,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            active: None,
            pen_color: DEFAULT_PEN_COLOR.to_string(),
        }
    }

    pub fn begin_stroke(&mut self, x: f64, y: f64) -> Result<&Stroke, StrokeError> {
        if self.active.is_some() {
            return Err(StrokeError::StrokeInProgress);
        }
        let stroke = Stroke::begin(Point::new(x, y), self.pen_color.clone());
        Ok(&*self.active.insert(stroke))
    }

    pub fn extend_stroke(&mut self, x: f64, y: f64) -> Result<(), StrokeError> {
        let stroke = self.active.as_mut().ok_or(StrokeError::NoActiveStroke)?;
        stroke.push(Point::new(x, y));
        Ok(())
    }

    /// Move the active stroke into the finished list.
    pub fn end_stroke(&mut self) -> Result<&Stroke, StrokeError> {
        let stroke = self.active.take().ok_or(StrokeError::NoActiveStroke)?;
        self.strokes.push(stroke);
        // just pushed
        Ok(&self.strokes[self.strokes.len() - 1])
    }

    pub fn undo_last_stroke(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Points of all finished strokes, in drawing order.
    pub fn all_points(&self) -> Vec<Point> {
        self.strokes
            .iter()
            .flat_map(|s| s.points().iter().copied())
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub fn pen_color(&self) -> &str {
        &self.pen_color
    }

    /// Applies to strokes begun after the call.
    pub fn set_pen_color(&mut self, color: impl Into<String>) {
        self.pen_color = color.into();
    }
}
