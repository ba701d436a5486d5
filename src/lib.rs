//! Kana Trace core crate.
//!
//! Handwriting verification for kana writing practice. The learner draws on a
//! canvas; strokes are normalized and compared against a loose reference
//! skeleton, and a correct drawing is reported to the host's progress tracker.
//! Everything except `canvas` is plain Rust and runs natively under `cargo test`.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod config;
mod error;
pub mod geometry;
pub mod logging;
pub mod practice;
pub mod reference;
pub mod scorer;
pub mod stroke;

pub use config::ScoringConfig;
pub use error::StrokeError;
pub use geometry::{Bounds, NormalizedShape, Point, normalize};
pub use practice::{
    MasteryLog, MasteryRecord, PointerPhase, PracticeMode, PracticeSession, PracticeTarget, ProgressTracker, Renderer,
};
pub use reference::{BuiltinPatterns, KeyFeatures, PatternSource, ReferenceCharacterEntry, ReferenceStore};
pub use scorer::{ScoreBreakdown, VerificationResult, verify};
pub use stroke::{Stroke, StrokeCapture};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Turn on debug output (score breakdowns, fallback skeletons) in the console.
#[wasm_bindgen(js_name = setVerboseLogging)]
pub fn set_verbose_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    logging::init(level);
}

// -----------------------------------------------------------------------------
// Practice characters: (kana, Hepburn romaji, category)
// -----------------------------------------------------------------------------

pub const CATEGORIES: &[&str] = &["gojuon", "dakuon", "handakuon"];

pub const KANA: &[(&str, &str, &str)] = &[
    ("あ", "a", "gojuon"), ("い", "i", "gojuon"), ("う", "u", "gojuon"), ("え", "e", "gojuon"), ("お", "o", "gojuon"),
    ("か", "ka", "gojuon"), ("き", "ki", "gojuon"), ("く", "ku", "gojuon"), ("け", "ke", "gojuon"), ("こ", "ko", "gojuon"),
    ("さ", "sa", "gojuon"), ("し", "shi", "gojuon"), ("す", "su", "gojuon"), ("せ", "se", "gojuon"), ("そ", "so", "gojuon"),
    ("た", "ta", "gojuon"), ("ち", "chi", "gojuon"), ("つ", "tsu", "gojuon"), ("て", "te", "gojuon"), ("と", "to", "gojuon"),
    ("な", "na", "gojuon"), ("に", "ni", "gojuon"), ("ぬ", "nu", "gojuon"), ("ね", "ne", "gojuon"), ("の", "no", "gojuon"),
    ("は", "ha", "gojuon"), ("ひ", "hi", "gojuon"), ("ふ", "fu", "gojuon"), ("へ", "he", "gojuon"), ("ほ", "ho", "gojuon"),
    ("ま", "ma", "gojuon"), ("み", "mi", "gojuon"), ("む", "mu", "gojuon"), ("め", "me", "gojuon"), ("も", "mo", "gojuon"),
    ("や", "ya", "gojuon"), ("ゆ", "yu", "gojuon"), ("よ", "yo", "gojuon"),
    ("ら", "ra", "gojuon"), ("り", "ri", "gojuon"), ("る", "ru", "gojuon"), ("れ", "re", "gojuon"), ("ろ", "ro", "gojuon"),
    ("わ", "wa", "gojuon"), ("を", "wo", "gojuon"), ("ん", "n", "gojuon"),
    ("が", "ga", "dakuon"), ("ぎ", "gi", "dakuon"), ("ぐ", "gu", "dakuon"), ("げ", "ge", "dakuon"), ("ご", "go", "dakuon"),
    ("ざ", "za", "dakuon"), ("じ", "ji", "dakuon"), ("ず", "zu", "dakuon"), ("ぜ", "ze", "dakuon"), ("ぞ", "zo", "dakuon"),
    ("だ", "da", "dakuon"), ("ぢ", "dji", "dakuon"), ("づ", "dzu", "dakuon"), ("で", "de", "dakuon"), ("ど", "do", "dakuon"),
    ("ば", "ba", "dakuon"), ("び", "bi", "dakuon"), ("ぶ", "bu", "dakuon"), ("べ", "be", "dakuon"), ("ぼ", "bo", "dakuon"),
    ("ぱ", "pa", "handakuon"), ("ぴ", "pi", "handakuon"), ("ぷ", "pu", "handakuon"), ("ぺ", "pe", "handakuon"), ("ぽ", "po", "handakuon"),
];

/// Romaji and category for a practice character.
pub fn kana_info(character: &str) -> Option<(&'static str, &'static str)> {
    KANA.iter()
        .find(|(k, _, _)| *k == character)
        .map(|&(_, romaji, category)| (romaji, category))
}

// -----------------------------------------------------------------------------
// Stateless JSON entry point
// -----------------------------------------------------------------------------

/// Verify strokes given as `[[[x, y], ...], ...]` JSON and return the
/// `VerificationResult` as JSON. Empty strokes are ignored.
#[cfg(feature = "serde_json")]
pub fn verify_strokes_json(strokes_json: &str, character: &str, romaji: &str, category: &str) -> Result<String, StrokeError> {
    let raw: Vec<Vec<[f64; 2]>> =
        serde_json::from_str(strokes_json).map_err(|e| StrokeError::InvalidInput(e.to_string()))?;
    let strokes: Vec<Stroke> = raw
        .into_iter()
        .filter_map(|s| {
            let points = s.into_iter().map(|[x, y]| Point::new(x, y)).collect();
            Stroke::from_points(points, stroke::DEFAULT_PEN_COLOR)
        })
        .collect();
    let points: Vec<Point> = strokes.iter().flat_map(|s| s.points().iter().copied()).collect();
    let mut store = ReferenceStore::new();
    let entry = store.get_or_create(character, romaji, category);
    let result = verify(&points, entry, &ScoringConfig::default());
    serde_json::to_string(&result).map_err(|e| StrokeError::InvalidInput(e.to_string()))
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen(js_name = verifyStrokes)]
pub fn verify_strokes(strokes_json: &str, character: &str, romaji: &str, category: &str) -> Result<String, JsValue> {
    Ok(verify_strokes_json(strokes_json, character, romaji, category)?)
}
