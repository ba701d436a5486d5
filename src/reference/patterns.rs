// Hand-authored reference skeletons on the nominal 100x100 grid.
// Only the vowels and the k-row have bespoke shapes; everything else falls back
// to DEFAULT_PATTERN. These are loose approximations for a practice aid.

/// Rectangle plus a vertical bar through the middle.
pub static DEFAULT_PATTERN: [(f64, f64); 6] = [
    (20.0, 20.0),
    (80.0, 20.0),
    (80.0, 80.0),
    (20.0, 80.0),
    (50.0, 20.0),
    (50.0, 80.0),
];

// Two horizontal bars and one vertical bar.
pub static HIRAGANA_A: [(f64, f64); 6] = [
    (25.0, 30.0),
    (75.0, 30.0),
    (50.0, 15.0),
    (50.0, 85.0),
    (25.0, 60.0),
    (75.0, 60.0),
];

pub static HIRAGANA_I: [(f64, f64); 8] = [
    (28.0, 25.0),
    (26.0, 45.0),
    (28.0, 65.0),
    (36.0, 78.0),
    (68.0, 32.0),
    (74.0, 45.0),
    (76.0, 58.0),
    (72.0, 66.0),
];

pub static HIRAGANA_U: [(f64, f64); 8] = [
    (40.0, 15.0),
    (58.0, 20.0),
    (30.0, 42.0),
    (55.0, 38.0),
    (70.0, 48.0),
    (68.0, 65.0),
    (55.0, 78.0),
    (40.0, 88.0),
];

pub static HIRAGANA_E: [(f64, f64); 9] = [
    (42.0, 15.0),
    (58.0, 20.0),
    (30.0, 40.0),
    (60.0, 40.0),
    (40.0, 58.0),
    (25.0, 80.0),
    (50.0, 62.0),
    (62.0, 80.0),
    (78.0, 82.0),
];

pub static HIRAGANA_O: [(f64, f64); 10] = [
    (22.0, 35.0),
    (55.0, 33.0),
    (40.0, 15.0),
    (40.0, 60.0),
    (38.0, 85.0),
    (28.0, 75.0),
    (55.0, 55.0),
    (72.0, 65.0),
    (62.0, 82.0),
    (75.0, 25.0),
];

pub static HIRAGANA_KA: [(f64, f64); 11] = [
    (18.0, 38.0),
    (40.0, 35.0),
    (60.0, 34.0),
    (62.0, 55.0),
    (55.0, 78.0),
    (45.0, 15.0),
    (38.0, 55.0),
    (25.0, 85.0),
    (74.0, 30.0),
    (82.0, 42.0),
    (88.0, 55.0),
];

pub static HIRAGANA_KI: [(f64, f64); 12] = [
    (25.0, 28.0),
    (50.0, 25.0),
    (72.0, 22.0),
    (28.0, 45.0),
    (52.0, 42.0),
    (75.0, 40.0),
    (42.0, 12.0),
    (52.0, 35.0),
    (62.0, 58.0),
    (38.0, 70.0),
    (45.0, 85.0),
    (70.0, 88.0),
];

pub static HIRAGANA_KU: [(f64, f64); 6] = [
    (62.0, 15.0),
    (50.0, 28.0),
    (35.0, 45.0),
    (30.0, 52.0),
    (45.0, 68.0),
    (62.0, 88.0),
];

pub static HIRAGANA_KE: [(f64, f64); 10] = [
    (25.0, 18.0),
    (22.0, 45.0),
    (24.0, 70.0),
    (30.0, 85.0),
    (45.0, 38.0),
    (65.0, 37.0),
    (85.0, 36.0),
    (68.0, 15.0),
    (70.0, 55.0),
    (60.0, 88.0),
];

pub static HIRAGANA_KO: [(f64, f64); 8] = [
    (30.0, 28.0),
    (50.0, 26.0),
    (70.0, 28.0),
    (65.0, 38.0),
    (28.0, 68.0),
    (34.0, 78.0),
    (55.0, 80.0),
    (75.0, 76.0),
];

/// Look up the bespoke skeleton for `character`.
pub fn pattern_for(character: &str) -> Option<&'static [(f64, f64)]> {
    let pattern: &'static [(f64, f64)] = match character {
        "あ" => &HIRAGANA_A,
        "い" => &HIRAGANA_I,
        "う" => &HIRAGANA_U,
        "え" => &HIRAGANA_E,
        "お" => &HIRAGANA_O,
        "か" => &HIRAGANA_KA,
        "き" => &HIRAGANA_KI,
        "く" => &HIRAGANA_KU,
        "け" => &HIRAGANA_KE,
        "こ" => &HIRAGANA_KO,
        _ => return None,
    };
    Some(pattern)
}
