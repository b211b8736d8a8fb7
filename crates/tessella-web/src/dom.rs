//! Access to browser globals.

use wasm_bindgen::JsValue;

/// Errors from browser API calls.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// No global `window` (not running in a browser main thread).
    #[error("no global window")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// The document has no `<body>`.
    #[error("document has no body")]
    NoBody,

    /// An image element fired `error` instead of `load`.
    #[error("image failed to load: {0}")]
    ImageLoad(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// The global window.
///
/// # Errors
///
/// Returns [`DomError::NoWindow`] outside a browser main thread.
pub fn window() -> Result<web_sys::Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

/// The window's document.
///
/// # Errors
///
/// Returns [`DomError::NoWindow`] or [`DomError::NoDocument`].
pub fn document() -> Result<web_sys::Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}
