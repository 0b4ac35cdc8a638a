//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Canvas sizing
//! - Fetching the level file (browser only)

use crate::consts::{DESKTOP_MARGIN, MOBILE_BREAKPOINT};
use crate::sim::Viewport;

/// Canvas size for a window of `inner_width` x `inner_height`:
/// the window minus a margin on desktop, the full window on mobile
pub fn canvas_size(inner_width: f32, inner_height: f32) -> Viewport {
    let margin = if inner_width <= MOBILE_BREAKPOINT {
        0.0
    } else {
        DESKTOP_MARGIN
    };
    Viewport::new(
        (inner_width - margin * 2.0).max(1.0),
        (inner_height - margin * 2.0).max(1.0),
    )
}

/// Fetch a text resource relative to the page
#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(url: &str) -> Result<String, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or("no window")?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(format!("{} returned HTTP {}", url, response.status()).into());
    }
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("response body is not text"))
}
