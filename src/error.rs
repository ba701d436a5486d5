use wasm_bindgen::JsValue;

/// Rejected capture operations and malformed input at the JS boundary.
///
/// Capture errors are integration mistakes (e.g. a move event with no
/// preceding down event). The operation is refused and state is left as it was.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StrokeError {
    #[error("no stroke is being drawn")]
    NoActiveStroke,
    #[error("a stroke is already being drawn")]
    StrokeInProgress,
    #[error("unknown practice mode {0:?}")]
    UnknownMode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<StrokeError> for JsValue {
    fn from(err: StrokeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
