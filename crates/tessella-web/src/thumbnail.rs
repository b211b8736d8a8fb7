//! Thumbnail loading through detached `<img>` elements.

use tessella_core::{LoadError, Size, ThumbnailSource};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::dom::DomError;

/// Loads each thumbnail into an off-document image element and reports
/// its natural size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSource;

impl ThumbnailSource for ImageSource {
    async fn load(&self, url: &str) -> Result<Size, LoadError> {
        load_image(url)
            .await
            .map_err(|err| LoadError::new(url, err.to_string()))
    }
}

/// Load `url` and wait for the element's `load` or `error` event.
///
/// # Errors
///
/// Returns [`DomError::ImageLoad`] if the browser fires `error`, or
/// [`DomError::JsError`] if the element cannot be created.
pub async fn load_image(url: &str) -> Result<Size, DomError> {
    let image = HtmlImageElement::new()?;

    // The executor's resolve/reject functions double as the event
    // handlers, so no Rust closures outlive this call.
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(url);

    let outcome = JsFuture::from(promise).await;
    image.set_onload(None);
    image.set_onerror(None);
    outcome.map_err(|_| DomError::ImageLoad(url.to_owned()))?;

    Ok(Size::new(
        f64::from(image.natural_width()),
        f64::from(image.natural_height()),
    ))
}

/// Start fetching `url` so it is cached by the time the lightbox shows
/// it. Failures only cost the head start.
pub fn preload(url: &str) {
    match HtmlImageElement::new() {
        Ok(image) => image.set_src(url),
        Err(err) => tracing::debug!(url, ?err, "preload skipped"),
    }
}
