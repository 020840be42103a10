//! Async clipboard access through the browser's Clipboard API.

use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: no window")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Write(String),
}

/// Write `text` to the system clipboard.
///
/// The returned future resolves once the browser accepts or rejects the
/// write. Browsers reject when the document is not focused or the page lacks
/// clipboard permission.
pub async fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|err| ClipboardError::Write(js_error_message(&err)))
}

fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
