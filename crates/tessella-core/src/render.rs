//! Media rendering: turn a descriptor into the content the lightbox shows.
//!
//! # Strategy pattern
//!
//! Each payload kind implements [`RenderMedia`]; [`MediaPayload`]
//! dispatches to the right one. The result is a plain [`MediaContent`]
//! value that the view layer turns into markup, so rendering has no side
//! effects here.

use crate::catalog::{MediaDescriptor, MediaMetadata, MediaPayload, VideoProvider};

impl VideoProvider {
    /// Base address of the provider's embeddable player.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::YouTube => "https://www.youtube.com/embed/",
            Self::Vimeo => "https://player.vimeo.com/video/",
        }
    }

    /// Embed address for a video code.
    #[must_use]
    pub fn embed_url(self, code: &str) -> String {
        format!("{}{code}", self.base_url())
    }
}

/// One `<source>` of an audio player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub url: String,
    /// MIME type, `audio/<format>`.
    pub mime: String,
}

/// Viewable content for one catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaContent {
    Image {
        src: String,
    },
    Video {
        provider: VideoProvider,
        embed_url: String,
        width: u32,
        height: u32,
    },
    Audio {
        sources: Vec<AudioSource>,
    },
}

impl MediaContent {
    /// Whether clicks on this content must not reach the lightbox frame
    /// (so playback controls don't trigger navigation).
    #[must_use]
    pub const fn stops_click_propagation(&self) -> bool {
        matches!(self, Self::Audio { .. })
    }

    /// Address worth warming in the browser cache once the thumbnail is
    /// shown. Only full-size images benefit.
    #[must_use]
    pub fn preload_url(&self) -> Option<&str> {
        match self {
            Self::Image { src } => Some(src),
            Self::Video { .. } | Self::Audio { .. } => None,
        }
    }
}

/// Caption text below the media; absent fields render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    pub description: String,
    pub credits: String,
}

impl From<&MediaMetadata> for Caption {
    fn from(meta: &MediaMetadata) -> Self {
        Self {
            title: meta.title.clone().unwrap_or_default(),
            description: meta.description.clone().unwrap_or_default(),
            credits: meta.credits.clone().unwrap_or_default(),
        }
    }
}

/// Produces viewable content for a payload kind.
pub trait RenderMedia {
    fn render(&self) -> MediaContent;
}

impl RenderMedia for MediaPayload {
    fn render(&self) -> MediaContent {
        match self {
            Self::Image { full } => MediaContent::Image { src: full.clone() },
            Self::Video {
                provider,
                code,
                width,
                height,
            } => MediaContent::Video {
                provider: *provider,
                embed_url: provider.embed_url(code),
                width: *width,
                height: *height,
            },
            Self::Audio { sources } => MediaContent::Audio {
                sources: sources
                    .iter()
                    .map(|(format, url)| AudioSource {
                        url: url.clone(),
                        mime: format!("audio/{format}"),
                    })
                    .collect(),
            },
        }
    }
}

/// Render a descriptor's media and caption.
#[must_use]
pub fn render(descriptor: &MediaDescriptor) -> (MediaContent, Caption) {
    (
        descriptor.payload.render(),
        Caption::from(&descriptor.metadata),
    )
}
