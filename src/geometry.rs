//! Point clouds and the shape normalizer.
//!
//! Drawn strokes live in canvas pixel space, reference skeletons in a nominal
//! 100x100 design space. `normalize` maps either into a shared frame where the
//! longer side of the bounding box spans `0..1`, so the scorer can compare them
//! without caring about position or size.

/// A 2D coordinate. Canvas pixels for drawn input, design units for references.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Bounds of `points`, or `None` for an empty set.
    pub fn of(points: &[Point]) -> Option<Bounds> {
        let first = points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Bounds {
            min_x,
            max_x,
            min_y,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Larger of the two extents; the normalizer divides by this.
    pub fn scale(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// A point cloud in the normalized frame plus the bounds it came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedShape {
    pub points: Vec<Point>,
    /// Pre-normalization extents (used for raw aspect ratio comparison).
    pub bounds: Bounds,
}

/// Remove translation and scale from a point set.
///
/// Every point maps to `((x - min_x) / scale, (y - min_y) / scale)` where
/// `scale` is the larger bounding box side. A degenerate set (all points equal)
/// uses a scale of 1 so the output stays finite. An empty set yields an empty
/// shape with zero bounds.
pub fn normalize(points: &[Point]) -> NormalizedShape {
    let Some(bounds) = Bounds::of(points) else {
        return NormalizedShape::default();
    };
    let mut scale = bounds.scale();
    if scale == 0.0 {
        scale = 1.0;
    }
    let points = points
        .iter()
        .map(|p| Point::new((p.x - bounds.min_x) / scale, (p.y - bounds.min_y) / scale))
        .collect();
    NormalizedShape { points, bounds }
}
