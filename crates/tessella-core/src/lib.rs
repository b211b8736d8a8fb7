//! tessella-core: Pure gallery logic (sans-IO).
//!
//! Covers the two stateful halves of a media gallery:
//!
//! - sequential thumbnail loading feeding an adaptive grid packer, and
//! - the lightbox state machine with its chained transition animations
//!   and input routing.
//!
//! This crate has **no browser dependencies**. Loading, timing and
//! geometry queries go through small traits ([`ThumbnailSource`],
//! [`StepRunner`], [`Surface`]); all DOM interaction lives in
//! `tessella-web`.

pub mod animation;
pub mod catalog;
pub mod events;
pub mod gallery;
pub mod input;
pub mod layout;
pub mod lightbox;
pub mod loader;
pub mod render;
pub mod surface;
pub mod types;

pub use animation::{AnimatedProperty, Step, StepRunner, StepTicket, TransitionAnimator};
pub use catalog::{MediaCatalog, MediaDescriptor, MediaPayload, MediaRecord, VideoProvider};
pub use events::{EventEmitter, GalleryEvent};
pub use gallery::Gallery;
pub use input::{ArrowHint, InputRouter, NavCommand, SwipeDirection, SwipeTracker};
pub use layout::{GridLayoutEngine, Placement};
pub use lightbox::{Bullet, Frame, LightboxCommand, LightboxController, LightboxPhase, NavTarget};
pub use loader::{ThumbnailEntry, ThumbnailSource};
pub use render::{Caption, MediaContent, RenderMedia};
pub use surface::{StackLayers, Surface, Viewport};
pub use types::{DescriptorError, GalleryConfig, GalleryError, LoadError, Size};
