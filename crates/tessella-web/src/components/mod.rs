//! Dioxus UI components for tessella.
//!
//! Provides the thumbnail grid, the lightbox overlay and frame, and the
//! per-item media view mounted inside the frame.

mod gallery;
mod lightbox;
mod media;

pub use gallery::MediaGallery;
pub use lightbox::Lightbox;
pub use media::MediaView;
