//! Browser binding: a `<canvas>` writing pad.
//!
//! Mouse and touch listeners both reduce their events to a canvas-pixel
//! [`Point`] through [`surface_point`] and feed the same
//! [`PracticeSession::handle_pointer`] path. Drawing goes through
//! [`CanvasRenderer`]; mastery notifications are queued and handed to the JS
//! callback only after the session borrow is released, so the callback may call
//! back into the pad.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::geometry::Point;
use crate::practice::{MasteryLog, PointerPhase, PracticeMode, PracticeSession, Renderer};
use crate::stroke::Stroke;

const DEFAULT_SIZE: u32 = 300;
const PEN_WIDTH: f64 = 8.0;
const GRID_COLOR: &str = "#d8d8d8";
const BACKGROUND: &str = "#fdfcf8";

/// Convert a client (viewport) coordinate to canvas pixels.
///
/// `rect_*` is the canvas bounding client rect in CSS pixels, `px_*` the canvas
/// backing size. The result is clamped onto the canvas.
#[allow(clippy::too_many_arguments)]
pub fn client_to_canvas(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
    rect_width: f64,
    rect_height: f64,
    px_width: f64,
    px_height: f64,
) -> Point {
    let x = (client_x - rect_left) * px_width / rect_width.max(1.0);
    let y = (client_y - rect_top) * px_height / rect_height.max(1.0);
    Point::new(x.clamp(0.0, px_width), y.clamp(0.0, px_height))
}

/// Canvas-relative point for a mouse or touch client coordinate.
pub fn surface_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Point {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas(
        client_x,
        client_y,
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        canvas.width() as f64,
        canvas.height() as f64,
    )
}

/// Clears the canvas and redraws the guide grid plus every stroke.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn draw_grid(&self, w: f64, h: f64) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(0.5, 0.5, w - 1.0, h - 1.0);
        // center cross, then thirds
        line(ctx, w / 2.0, 0.0, w / 2.0, h);
        line(ctx, 0.0, h / 2.0, w, h / 2.0);
        for i in [1.0, 2.0] {
            line(ctx, w * i / 3.0, 0.0, w * i / 3.0, h);
            line(ctx, 0.0, h * i / 3.0, w, h * i / 3.0);
        }
    }

    fn draw_stroke(&self, stroke: &Stroke) {
        let ctx = &self.ctx;
        let pts = stroke.points();
        if pts.len() == 1 {
            ctx.set_fill_style_str(&stroke.color);
            ctx.begin_path();
            if let Err(e) = ctx.arc(pts[0].x, pts[0].y, PEN_WIDTH / 2.0, 0.0, std::f64::consts::TAU) {
                log::error!("drawing dot failed: {e:?}");
                return;
            }
            ctx.fill();
            return;
        }
        ctx.set_stroke_style_str(&stroke.color);
        ctx.set_line_width(PEN_WIDTH);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.begin_path();
        ctx.move_to(pts[0].x, pts[0].y);
        for p in &pts[1..] {
            ctx.line_to(p.x, p.y);
        }
        ctx.stroke();
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, strokes: &[Stroke], active: Option<&Stroke>) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.draw_grid(w, h);
        for s in strokes.iter().chain(active) {
            self.draw_stroke(s);
        }
    }
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

struct PadState {
    session: PracticeSession,
    mastered: MasteryLog,
    on_mastered: Option<js_sys::Function>,
}

type SharedPad = Rc<RefCell<PadState>>;

/// Run one session operation, then deliver any queued mastery notifications.
fn with_session<R>(state: &SharedPad, op: impl FnOnce(&mut PracticeSession) -> R) -> R {
    let (out, records, callback) = {
        let mut st = state.borrow_mut();
        let out = op(&mut st.session);
        (out, st.mastered.take(), st.on_mastered.clone())
    };
    if let Some(cb) = callback {
        for r in records {
            let res = cb.call3(
                &JsValue::NULL,
                &JsValue::from_str(&r.character),
                &JsValue::from_f64(r.timestamp_ms),
                &JsValue::from_str(&r.category),
            );
            if let Err(e) = res {
                log::error!("mastery callback failed: {e:?}");
            }
        }
    }
    out
}

fn dispatch(state: &SharedPad, phase: PointerPhase, p: Point) {
    let now = js_sys::Date::now();
    with_session(state, |s| {
        if let Err(e) = s.handle_pointer(phase, p, now) {
            log::warn!("pointer {phase:?} ignored: {e}");
        }
    });
}

fn listen_mouse(canvas: &HtmlCanvasElement, state: &SharedPad, event: &str, phase: PointerPhase) -> Result<(), JsValue> {
    let canvas_ev = canvas.clone();
    let state = state.clone();
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        evt.prevent_default();
        let p = surface_point(&canvas_ev, evt.client_x() as f64, evt.client_y() as f64);
        dispatch(&state, phase, p);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_touch(canvas: &HtmlCanvasElement, state: &SharedPad, event: &str, phase: PointerPhase) -> Result<(), JsValue> {
    let canvas_ev = canvas.clone();
    let state = state.clone();
    let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
        evt.prevent_default();
        // touchend has an empty `touches`; the lifted finger is in `changed_touches`
        let Some(touch) = evt.changed_touches().get(0) else {
            return;
        };
        let p = surface_point(&canvas_ev, touch.client_x() as f64, touch.client_y() as f64);
        dispatch(&state, phase, p);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Writing-practice canvas exported to JS.
#[wasm_bindgen]
pub struct WritingPad {
    state: SharedPad,
}

#[wasm_bindgen]
impl WritingPad {
    /// Attach to the canvas with `canvas_id`, creating it if missing.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WritingPad, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let doc = win
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(canvas_id) {
            el.dyn_into()?
        } else {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id(canvas_id);
            c.set_width(DEFAULT_SIZE);
            c.set_height(DEFAULT_SIZE);
            let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
            body.append_child(&c)?;
            c
        };
        // keep the browser from scrolling/zooming while the finger draws
        canvas.style().set_property("touch-action", "none")?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let mastered = MasteryLog::new();
        let mut session = PracticeSession::new(PracticeMode::Practice);
        session.set_tracker(Box::new(mastered.clone()));
        session.set_renderer(Box::new(CanvasRenderer::new(canvas.clone(), ctx)));
        let state: SharedPad = Rc::new(RefCell::new(PadState {
            session,
            mastered,
            on_mastered: None,
        }));

        listen_mouse(&canvas, &state, "mousedown", PointerPhase::Down)?;
        listen_mouse(&canvas, &state, "mousemove", PointerPhase::Move)?;
        listen_mouse(&canvas, &state, "mouseup", PointerPhase::Up)?;
        listen_mouse(&canvas, &state, "mouseleave", PointerPhase::Up)?;
        listen_touch(&canvas, &state, "touchstart", PointerPhase::Down)?;
        listen_touch(&canvas, &state, "touchmove", PointerPhase::Move)?;
        listen_touch(&canvas, &state, "touchend", PointerPhase::Up)?;
        listen_touch(&canvas, &state, "touchcancel", PointerPhase::Cancel)?;

        Ok(WritingPad { state })
    }

    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&self, character: &str, romaji: &str, category: &str) {
        with_session(&self.state, |s| s.select_target(character, romaji, category));
    }

    /// `"practice"` or `"free"`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: PracticeMode = mode.parse()?;
        with_session(&self.state, |s| s.set_mode(mode));
        Ok(())
    }

    #[wasm_bindgen(js_name = setPenColor)]
    pub fn set_pen_color(&self, color: &str) {
        with_session(&self.state, |s| s.set_pen_color(color));
    }

    /// Register `callback(character, timestampMs, category)` for successful attempts.
    #[wasm_bindgen(js_name = onMastered)]
    pub fn on_mastered(&self, callback: js_sys::Function) {
        self.state.borrow_mut().on_mastered = Some(callback);
    }

    /// Remove the last stroke. Returns false when there was nothing to undo.
    pub fn undo(&self) -> bool {
        let now = js_sys::Date::now();
        with_session(&self.state, |s| s.undo_last_stroke(now).is_some())
    }

    pub fn clear(&self) {
        with_session(&self.state, |s| s.clear());
    }

    /// Accuracy of the latest verdict, 0 when there is none.
    pub fn accuracy(&self) -> f64 {
        self.state
            .borrow()
            .session
            .verdict()
            .map_or(0.0, |v| v.accuracy)
    }

    #[wasm_bindgen(js_name = isCorrect)]
    pub fn is_correct(&self) -> bool {
        self.state
            .borrow()
            .session
            .verdict()
            .is_some_and(|v| v.is_correct)
    }

    pub fn message(&self) -> Option<String> {
        self.state
            .borrow()
            .session
            .verdict()
            .map(|v| v.message.clone())
    }

    #[wasm_bindgen(js_name = strokeCount)]
    pub fn stroke_count(&self) -> usize {
        self.state.borrow().session.strokes().len()
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl WritingPad {
    /// Override scoring knobs from a (partial) JSON object.
    #[wasm_bindgen(js_name = setConfigJson)]
    pub fn set_config_json(&self, json: &str) -> Result<(), JsValue> {
        let config = crate::config::ScoringConfig::from_json(json)?;
        with_session(&self.state, |s| s.set_config(config));
        Ok(())
    }

    /// Latest verdict as `{"isCorrect", "message", "accuracy"}` JSON.
    #[wasm_bindgen(js_name = resultJson)]
    pub fn result_json(&self) -> Result<Option<String>, JsValue> {
        let st = self.state.borrow();
        let Some(v) = st.session.verdict() else {
            return Ok(None);
        };
        serde_json::to_string(v)
            .map(Some)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_coordinates_are_offset_by_canvas_rect() {
        let p = client_to_canvas(130.0, 250.0, 100.0, 200.0, 300.0, 300.0, 300.0, 300.0);
        assert_eq!(p, Point::new(30.0, 50.0));
    }

    #[test]
    fn css_scaling_maps_to_backing_pixels() {
        // canvas displayed at 150 CSS px but backed by 300 px
        let p = client_to_canvas(75.0, 30.0, 0.0, 0.0, 150.0, 150.0, 300.0, 300.0);
        assert_eq!(p, Point::new(150.0, 60.0));
    }

    #[test]
    fn off_canvas_points_are_clamped() {
        let p = client_to_canvas(-20.0, 999.0, 0.0, 0.0, 300.0, 300.0, 300.0, 300.0);
        assert_eq!(p, Point::new(0.0, 300.0));
    }
}
