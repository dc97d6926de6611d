use thiserror::Error;

/// Everything that can stop a motion component from mounting.
///
/// None of these reach the page as a visible error: the entry point logs them
/// and leaves the affected component dormant.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("2d drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("invalid motion config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MotionError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        MotionError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<MotionError> for wasm_bindgen::JsValue {
    fn from(err: MotionError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
