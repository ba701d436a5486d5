// End-to-end checks of the practice flow: drawing, verification, undo and the
// mastery signal. Native only; nothing here touches a browser.

use std::cell::Cell;
use std::rc::Rc;

use kana_trace::reference::patterns::HIRAGANA_A;
use kana_trace::{
    BuiltinPatterns, MasteryLog, PatternSource, Point, PointerPhase, PracticeMode, PracticeSession, ReferenceStore,
    VerificationResult,
};

// Scale design-space points onto a 300px canvas with an offset, the way a user
// would draw them.
fn on_canvas(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(40.0 + x * 2.2, 25.0 + y * 2.2)).collect()
}

fn draw_stroke(s: &mut PracticeSession, points: &[Point], now: f64) -> Option<VerificationResult> {
    s.handle_pointer(PointerPhase::Down, points[0], now).unwrap();
    for p in &points[1..] {
        s.handle_pointer(PointerPhase::Move, *p, now).unwrap();
    }
    s.handle_pointer(PointerPhase::Up, points[points.len() - 1], now).unwrap();
    s.verdict().cloned()
}

#[test]
fn drawing_a_as_single_upsampled_stroke_passes() {
    let mut s = PracticeSession::new(PracticeMode::Practice);
    s.select_target("あ", "a", "gojuon");
    let entry = s.store().get("あ").unwrap();
    assert_eq!(entry.reference_points.len(), 6);

    // every reference point twice: 12 points
    let drawn: Vec<Point> = on_canvas(&HIRAGANA_A).into_iter().flat_map(|p| [p, p]).collect();
    let r = draw_stroke(&mut s, &drawn, 0.0).unwrap();
    assert!(r.is_correct, "{:?}", r);
    assert_eq!(r.accuracy, 1.0);
}

#[test]
fn drawing_a_as_three_strokes_passes() {
    let mut s = PracticeSession::new(PracticeMode::Practice);
    s.select_target("あ", "a", "gojuon");
    let canvas = on_canvas(&HIRAGANA_A);
    let mut last = None;
    // two horizontal bars and the vertical, each with its midpoint interpolated
    for pair in canvas.chunks(2) {
        let (a, b) = (pair[0], pair[1]);
        let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        last = draw_stroke(&mut s, &[a, a, mid, b], 0.0);
    }
    assert_eq!(s.strokes().len(), 3);
    let r = last.unwrap();
    assert!(r.is_correct, "{:?}", r);
    assert_eq!(r.accuracy, 1.0);
}

#[test]
fn early_strokes_are_incomplete_not_wrong() {
    let mut s = PracticeSession::new(PracticeMode::Practice);
    s.select_target("あ", "a", "gojuon");
    let r = draw_stroke(&mut s, &on_canvas(&HIRAGANA_A[..2]), 0.0).unwrap();
    assert!(!r.is_correct);
    assert_eq!(r.accuracy, 0.0);
}

#[test]
fn undo_reproduces_earlier_verdict() {
    let stroke_a: Vec<Point> = (0..12).map(|i| Point::new(30.0 + i as f64 * 15.0, 60.0 + (i % 3) as f64)).collect();
    let stroke_b: Vec<Point> = (0..8).map(|i| Point::new(120.0, 20.0 + i as f64 * 30.0)).collect();

    let mut only_a = PracticeSession::new(PracticeMode::Practice);
    only_a.select_target("か", "ka", "gojuon");
    let expected = draw_stroke(&mut only_a, &stroke_a, 0.0).unwrap();

    let mut both = PracticeSession::new(PracticeMode::Practice);
    both.select_target("か", "ka", "gojuon");
    draw_stroke(&mut both, &stroke_a, 0.0);
    let with_b = draw_stroke(&mut both, &stroke_b, 0.0).unwrap();
    assert_ne!(with_b, expected);
    both.undo_last_stroke(0.0).unwrap();
    assert_eq!(both.verdict(), Some(&expected));
}

#[test]
fn mastery_log_receives_character_and_category() {
    let log = MasteryLog::new();
    let mut s = PracticeSession::new(PracticeMode::Practice);
    s.set_tracker(Box::new(log.clone()));
    s.select_target("あ", "a", "gojuon");
    let drawn: Vec<Point> = on_canvas(&HIRAGANA_A).into_iter().flat_map(|p| [p, p]).collect();
    draw_stroke(&mut s, &drawn, 42.0);
    let records = log.take();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].character, "あ");
    assert_eq!(records[0].category, "gojuon");
    assert_eq!(records[0].timestamp_ms, 42.0);
}

#[test]
fn failed_attempt_is_not_reported() {
    let log = MasteryLog::new();
    let mut s = PracticeSession::new(PracticeMode::Practice);
    s.set_tracker(Box::new(log.clone()));
    s.select_target("あ", "a", "gojuon");
    // a flat scribble along one edge
    let scribble: Vec<Point> = (0..20).map(|i| Point::new(10.0 + i as f64 * 12.0, 280.0)).collect();
    let r = draw_stroke(&mut s, &scribble, 0.0).unwrap();
    assert!(!r.is_correct);
    assert!(log.is_empty());
}

struct CountingPatterns(Rc<Cell<usize>>);

impl PatternSource for CountingPatterns {
    fn lookup(&self, character: &str) -> Option<Vec<Point>> {
        self.0.set(self.0.get() + 1);
        BuiltinPatterns.lookup(character)
    }
}

#[test]
fn store_consults_pattern_table_once_per_character() {
    let calls = Rc::new(Cell::new(0));
    let mut store = ReferenceStore::with_source(CountingPatterns(calls.clone()));
    let a = store.get_or_create("か", "ka", "gojuon").clone();
    let b = store.get_or_create("か", "ka", "gojuon").clone();
    assert_eq!(a.key_features, b.key_features);
    assert_eq!(a, b);
    assert_eq!(calls.get(), 1);
}

#[test]
fn session_builds_entry_once_across_attempts() {
    let calls = Rc::new(Cell::new(0));
    let mut s = PracticeSession::with_patterns(PracticeMode::Practice, CountingPatterns(calls.clone()));
    s.select_target("か", "ka", "gojuon");
    for _ in 0..3 {
        s.begin_stroke(Point::new(0.0, 0.0)).unwrap();
        s.end_stroke(0.0).unwrap();
    }
    s.select_target("か", "ka", "gojuon");
    assert_eq!(calls.get(), 1);
}

#[test]
fn mouse_and_touch_sequences_capture_the_same_strokes() {
    let path: Vec<Point> = (0..6).map(|i| Point::new(20.0 + i as f64 * 10.0, 40.0)).collect();

    // mouse: hover moves before the button goes down are ignored, up ends
    let mut mouse = PracticeSession::new(PracticeMode::Free);
    mouse.handle_pointer(PointerPhase::Move, Point::new(5.0, 5.0), 0.0).unwrap();
    mouse.handle_pointer(PointerPhase::Down, path[0], 0.0).unwrap();
    for p in &path[1..] {
        mouse.handle_pointer(PointerPhase::Move, *p, 0.0).unwrap();
    }
    mouse.handle_pointer(PointerPhase::Up, path[5], 0.0).unwrap();
    mouse.handle_pointer(PointerPhase::Up, path[5], 0.0).unwrap();

    // touch: the system cancels the gesture instead of lifting the finger
    let mut touch = PracticeSession::new(PracticeMode::Free);
    touch.handle_pointer(PointerPhase::Down, path[0], 0.0).unwrap();
    for p in &path[1..] {
        touch.handle_pointer(PointerPhase::Move, *p, 0.0).unwrap();
    }
    touch.handle_pointer(PointerPhase::Cancel, path[5], 0.0).unwrap();

    assert_eq!(mouse.strokes(), touch.strokes());
    assert_eq!(mouse.strokes().len(), 1);
    assert_eq!(mouse.strokes()[0].points(), &path[..]);
    assert!(mouse.active_stroke().is_none() && touch.active_stroke().is_none());
}

#[cfg(feature = "serde_json")]
#[test]
fn json_entry_point_round_trips_strokes() {
    let strokes: Vec<Vec<[f64; 2]>> = vec![
        HIRAGANA_A[..2].iter().flat_map(|&(x, y)| [[x, y], [x, y]]).collect(),
        HIRAGANA_A[2..4].iter().flat_map(|&(x, y)| [[x, y], [x, y]]).collect(),
        HIRAGANA_A[4..].iter().flat_map(|&(x, y)| [[x, y], [x, y]]).collect(),
    ];
    let input = serde_json::to_string(&strokes).unwrap();
    let out = kana_trace::verify_strokes_json(&input, "あ", "a", "gojuon").unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["isCorrect"], serde_json::Value::Bool(true));
    assert_eq!(v["accuracy"].as_f64(), Some(1.0));
}

#[cfg(feature = "serde_json")]
#[test]
fn json_entry_point_rejects_garbage() {
    let err = kana_trace::verify_strokes_json("[[1,2", "あ", "a", "gojuon").unwrap_err();
    assert!(matches!(err, kana_trace::StrokeError::InvalidInput(_)));
}

#[cfg(feature = "serde_json")]
#[test]
fn json_entry_point_ignores_empty_strokes() {
    let doubled: Vec<[f64; 2]> = HIRAGANA_A.iter().flat_map(|&(x, y)| [[x, y], [x, y]]).collect();
    let with_gaps = serde_json::json!([[], doubled, []]).to_string();
    let plain = serde_json::json!([doubled]).to_string();
    assert_eq!(
        kana_trace::verify_strokes_json(&with_gaps, "あ", "a", "gojuon").unwrap(),
        kana_trace::verify_strokes_json(&plain, "あ", "a", "gojuon").unwrap()
    );
}
