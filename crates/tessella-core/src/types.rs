//! Shared types for the tessella gallery core.

use serde::{Deserialize, Serialize};

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Gallery configuration recognized at construction time.
///
/// The completion callback is not part of this struct; register it on the
/// gallery's [`EventEmitter`](crate::events::EventEmitter) via
/// [`Gallery::on_complete`](crate::gallery::Gallery::on_complete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Whether the lightbox shows one bullet per catalog item.
    pub show_navigation_bullets: bool,

    /// Whether horizontal swipes navigate the lightbox.
    pub enable_gesture_navigation: bool,

    /// Extra horizontal space each grid cell adds around its thumbnail
    /// (padding plus borders), in pixels.
    pub cell_chrome: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            show_navigation_bullets: true,
            enable_gesture_navigation: false,
            cell_chrome: 0.0,
        }
    }
}

/// Why a single media record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The record has no thumbnail path.
    #[error("missing thumbnail path")]
    MissingThumbnail,

    /// None of the image, video or audio fields are populated.
    #[error("no recognized media payload (expected image, video or audio fields)")]
    NoPayload,

    /// More than one payload kind is populated.
    #[error("ambiguous media payload: {0}")]
    AmbiguousPayload(String),

    /// A video record lacks a positive width or height.
    #[error("video requires positive width and height")]
    MissingVideoDimensions,
}

/// Errors raised while building a gallery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    /// A catalog record failed validation. The whole catalog is rejected.
    #[error("invalid media descriptor at index {index}: {source}")]
    InvalidDescriptor {
        /// Position of the offending record in the input.
        index: usize,
        /// What was wrong with it.
        source: DescriptorError,
    },
}

/// A thumbnail or media resource failed to load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load {url}: {reason}")]
pub struct LoadError {
    /// The resource address that failed.
    pub url: String,
    /// Human-readable failure description.
    pub reason: String,
}

impl LoadError {
    /// Create a load error for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GalleryConfig::default();
        assert!(config.show_navigation_bullets);
        assert!(!config.enable_gesture_navigation);
        assert!(config.cell_chrome.abs() < f64::EPSILON);
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let config: GalleryConfig =
            serde_json::from_str(r#"{"enable_gesture_navigation": true}"#).unwrap();
        assert!(config.show_navigation_bullets);
        assert!(config.enable_gesture_navigation);
    }

    #[test]
    fn invalid_descriptor_message_names_index() {
        let err = GalleryError::InvalidDescriptor {
            index: 3,
            source: DescriptorError::NoPayload,
        };
        let msg = err.to_string();
        assert!(msg.contains("index 3"), "unexpected message: {msg}");
    }
}
