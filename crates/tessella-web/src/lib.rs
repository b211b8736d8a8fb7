//! tessella-web: Browser I/O and Dioxus components for tessella.
//!
//! Loads thumbnails through `<img>` elements, reads stacking order and
//! viewport geometry from the live document, drives lightbox animation
//! steps on browser timers, and provides the gallery grid and lightbox
//! components.

pub mod components;
pub mod dom;
pub mod handle;
pub mod surface;
pub mod thumbnail;
pub mod timing;

pub use components::{Lightbox, MediaGallery, MediaView};
pub use handle::{LightboxHandle, use_lightbox};
pub use surface::DomSurface;
pub use thumbnail::ImageSource;
pub use timing::{FrameTween, TimerRunner};
