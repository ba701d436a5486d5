//! Writing-practice session.
//!
//! Owns everything one practice page needs: the stroke capture, the reference
//! store, the scoring config, the selected character and the latest verdict.
//! Drawing and progress tracking are collaborators injected as trait objects so
//! none of this depends on a browser.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use crate::config::ScoringConfig;
use crate::error::StrokeError;
use crate::geometry::Point;
use crate::reference::{BuiltinPatterns, PatternSource, ReferenceStore};
use crate::scorer::{self, VerificationResult};
use crate::stroke::{Stroke, StrokeCapture};

/// Practice mode verifies after every stroke; free mode is a scratch pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PracticeMode {
    #[default]
    Practice,
    Free,
}

impl FromStr for PracticeMode {
    type Err = StrokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "practice" => Ok(PracticeMode::Practice),
            "free" => Ok(PracticeMode::Free),
            other => Err(StrokeError::UnknownMode(other.to_string())),
        }
    }
}

/// Pointer lifecycle as seen by the session, whatever the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// The character being practiced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeTarget {
    pub character: String,
    pub romaji: String,
    pub category: String,
}

/// Drawing surface. Called after every structural change with the full state;
/// implementations clear and redraw everything.
pub trait Renderer {
    fn render(&mut self, strokes: &[Stroke], active: Option<&Stroke>);
}

/// Receives "character mastered" signals. Scheduling, streaks and persistence
/// belong to the implementor.
pub trait ProgressTracker {
    fn notify_mastered(&mut self, character: &str, timestamp_ms: f64, category: &str);
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasteryRecord {
    pub character: String,
    pub timestamp_ms: f64,
    pub category: String,
}

/// In-memory tracker. Clones share the same log, so one handle can be given to
/// the session while another drains it.
#[derive(Clone, Debug, Default)]
pub struct MasteryLog {
    records: Rc<RefCell<Vec<MasteryRecord>>>,
}

impl MasteryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn records(&self) -> Vec<MasteryRecord> {
        self.records.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<MasteryRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }
}

impl ProgressTracker for MasteryLog {
    fn notify_mastered(&mut self, character: &str, timestamp_ms: f64, category: &str) {
        self.records.borrow_mut().push(MasteryRecord {
            character: character.to_string(),
            timestamp_ms,
            category: category.to_string(),
        });
    }
}

pub struct PracticeSession<S = BuiltinPatterns> {
    capture: StrokeCapture,
    store: ReferenceStore<S>,
    config: ScoringConfig,
    mode: PracticeMode,
    target: Option<PracticeTarget>,
    verdict: Option<VerificationResult>,
    renderer: Option<Box<dyn Renderer>>,
    tracker: Option<Box<dyn ProgressTracker>>,
}

impl PracticeSession<BuiltinPatterns> {
    pub fn new(mode: PracticeMode) -> Self {
        Self::with_patterns(mode, BuiltinPatterns)
    }
}

impl<S: PatternSource> PracticeSession<S> {
    pub fn with_patterns(mode: PracticeMode, source: S) -> Self {
        Self {
            capture: StrokeCapture::new(),
            store: ReferenceStore::with_source(source),
            config: ScoringConfig::default(),
            mode,
            target: None,
            verdict: None,
            renderer: None,
            tracker: None,
        }
    }

    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: ScoringConfig) {
        self.config = config;
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
        self.redraw();
    }

    pub fn set_tracker(&mut self, tracker: Box<dyn ProgressTracker>) {
        self.tracker = Some(tracker);
    }

    /// Switch to a new character. The reference entry is built now if this is
    /// the first time the character is practiced; the canvas starts over.
    pub fn select_target(&mut self, character: &str, romaji: &str, category: &str) {
        self.store.get_or_create(character, romaji, category);
        self.target = Some(PracticeTarget {
            character: character.to_string(),
            romaji: romaji.to_string(),
            category: category.to_string(),
        });
        self.clear();
    }

    pub fn set_mode(&mut self, mode: PracticeMode) {
        self.mode = mode;
        if mode == PracticeMode::Free {
            self.verdict = None;
        }
    }

    pub fn set_pen_color(&mut self, color: &str) {
        self.capture.set_pen_color(color);
    }

    pub fn begin_stroke(&mut self, p: Point) -> Result<(), StrokeError> {
        self.capture.begin_stroke(p.x, p.y)?;
        self.redraw();
        Ok(())
    }

    pub fn extend_stroke(&mut self, p: Point) -> Result<(), StrokeError> {
        self.capture.extend_stroke(p.x, p.y)?;
        self.redraw();
        Ok(())
    }

    /// Finish the active stroke; in practice mode, score the attempt.
    pub fn end_stroke(&mut self, now_ms: f64) -> Result<Option<&VerificationResult>, StrokeError> {
        self.capture.end_stroke()?;
        self.redraw();
        if self.mode == PracticeMode::Practice {
            self.verify_current(now_ms);
        }
        Ok(self.verdict.as_ref())
    }

    /// Drop the last finished stroke. In practice mode the remaining strokes are
    /// scored again, or the verdict is cleared when none are left.
    pub fn undo_last_stroke(&mut self, now_ms: f64) -> Option<Stroke> {
        let removed = self.capture.undo_last_stroke()?;
        self.redraw();
        if self.mode == PracticeMode::Practice {
            if self.capture.strokes().is_empty() {
                self.verdict = None;
            } else {
                self.verify_current(now_ms);
            }
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.capture.clear();
        self.verdict = None;
        self.redraw();
    }

    /// Single entry point for mouse and touch input.
    ///
    /// A `Down` while a stroke is still open (pointer released outside the
    /// canvas) closes that stroke first. `Move` without an open stroke is hover
    /// and is ignored.
    pub fn handle_pointer(&mut self, phase: PointerPhase, p: Point, now_ms: f64) -> Result<(), StrokeError> {
        match phase {
            PointerPhase::Down => {
                if self.capture.is_drawing() {
                    self.end_stroke(now_ms)?;
                }
                self.begin_stroke(p)
            }
            PointerPhase::Move => {
                if self.capture.is_drawing() {
                    self.extend_stroke(p)?;
                }
                Ok(())
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                if self.capture.is_drawing() {
                    self.end_stroke(now_ms)?;
                }
                Ok(())
            }
        }
    }

    /// Score the finished strokes against the selected character.
    ///
    /// Does nothing without a target. Every correct verdict is reported to the
    /// tracker, including repeat passes on the same drawing.
    pub fn verify_current(&mut self, now_ms: f64) -> Option<&VerificationResult> {
        let Some(target) = self.target.as_ref() else {
            log::debug!("no practice target selected, skipping verification");
            return None;
        };
        let entry = self
            .store
            .get_or_create(&target.character, &target.romaji, &target.category);
        let result = scorer::verify(&self.capture.all_points(), entry, &self.config);
        if result.is_correct {
            if let Some(tracker) = self.tracker.as_mut() {
                tracker.notify_mastered(&target.character, now_ms, &target.category);
            }
        }
        self.verdict = Some(result);
        self.verdict.as_ref()
    }

    fn redraw(&mut self) {
        if let Some(r) = self.renderer.as_mut() {
            r.render(self.capture.strokes(), self.capture.active_stroke());
        }
    }

    pub fn verdict(&self) -> Option<&VerificationResult> {
        self.verdict.as_ref()
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.capture.strokes()
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.capture.active_stroke()
    }

    pub fn target(&self) -> Option<&PracticeTarget> {
        self.target.as_ref()
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn store(&self) -> &ReferenceStore<S> {
        &self.store
    }
}
