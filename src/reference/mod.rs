//! Reference character store.
//!
//! Each practiced character gets a [`ReferenceCharacterEntry`]: a canonical point
//! set plus a few derived features. Entries are built the first time a character
//! is needed and cached for as long as the store lives. The store is owned by
//! the practice session rather than living in global state.

use std::collections::HashMap;

use crate::geometry::{Bounds, Point};

pub mod patterns;

/// Nominal side of the design grid the patterns are authored on.
pub const GRID_SIZE: u32 = 100;

// Fraction of width/height that counts as "near an edge".
const EDGE_BAND: f64 = 0.3;

/// Source of hand-authored point patterns.
pub trait PatternSource {
    fn lookup(&self, character: &str) -> Option<Vec<Point>>;
}

/// The fixed pattern table in [`patterns`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinPatterns;

impl PatternSource for BuiltinPatterns {
    fn lookup(&self, character: &str) -> Option<Vec<Point>> {
        patterns::pattern_for(character).map(to_points)
    }
}

fn to_points(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

/// Bounding features of a reference shape.
///
/// The edge subsets may overlap and are not used by the current scorer; they
/// are kept so symmetry-style checks can be layered on later.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFeatures {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub top_points: Vec<Point>,
    pub bottom_points: Vec<Point>,
    pub left_points: Vec<Point>,
    pub right_points: Vec<Point>,
}

impl KeyFeatures {
    pub fn from_points(points: &[Point]) -> KeyFeatures {
        let bounds = Bounds::of(points).unwrap_or_default();
        let (w, h) = (bounds.width, bounds.height);
        let pick = |pred: &dyn Fn(&Point) -> bool| -> Vec<Point> {
            points.iter().copied().filter(|p| pred(p)).collect()
        };
        KeyFeatures {
            center: bounds.center(),
            width: w,
            height: h,
            top_points: pick(&|p| p.y <= bounds.min_y + EDGE_BAND * h),
            bottom_points: pick(&|p| p.y >= bounds.min_y + (1.0 - EDGE_BAND) * h),
            left_points: pick(&|p| p.x <= bounds.min_x + EDGE_BAND * w),
            right_points: pick(&|p| p.x >= bounds.min_x + (1.0 - EDGE_BAND) * w),
        }
    }
}

/// Comparison target for one character.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceCharacterEntry {
    pub character: String,
    /// Forwarded for pronunciation playback; never interpreted here.
    pub romaji: String,
    pub category: String,
    pub reference_points: Vec<Point>,
    pub key_features: KeyFeatures,
    pub grid_size: u32,
}

impl ReferenceCharacterEntry {
    pub fn new(character: &str, romaji: &str, category: &str, reference_points: Vec<Point>) -> Self {
        let key_features = KeyFeatures::from_points(&reference_points);
        Self {
            character: character.to_string(),
            romaji: romaji.to_string(),
            category: category.to_string(),
            reference_points,
            key_features,
            grid_size: GRID_SIZE,
        }
    }
}

/// Lazily populated cache of reference entries.
#[derive(Debug, Default)]
pub struct ReferenceStore<S = BuiltinPatterns> {
    source: S,
    entries: HashMap<String, ReferenceCharacterEntry>,
}

impl ReferenceStore<BuiltinPatterns> {
    pub fn new() -> Self {
        Self::with_source(BuiltinPatterns)
    }
}

impl<S: PatternSource> ReferenceStore<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// Return the cached entry for `character`, building it on first use.
    ///
    /// A cached entry is returned unchanged, so `romaji`/`category` only matter
    /// on the first call. Characters without a bespoke pattern get the default
    /// skeleton.
    pub fn get_or_create(&mut self, character: &str, romaji: &str, category: &str) -> &ReferenceCharacterEntry {
        if !self.entries.contains_key(character) {
            let points = self.source.lookup(character).unwrap_or_else(|| {
                log::debug!("no reference pattern for {character:?}, using default skeleton");
                to_points(&patterns::DEFAULT_PATTERN)
            });
            let entry = ReferenceCharacterEntry::new(character, romaji, category, points);
            self.entries.insert(character.to_string(), entry);
        }
        &self.entries[character]
    }

    pub fn get(&self, character: &str) -> Option<&ReferenceCharacterEntry> {
        self.entries.get(character)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
