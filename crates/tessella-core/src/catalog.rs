//! Media catalog: the ordered, validated list of gallery items.
//!
//! Callers hand the gallery loose [`MediaRecord`]s (typically parsed from
//! JSON). Each record is validated into a [`MediaDescriptor`] carrying
//! exactly one [`MediaPayload`]. The catalog index is the only identity
//! shared by the grid and the lightbox.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::types::{DescriptorError, GalleryError};

/// A single audio source as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSourceRecord {
    /// Container/codec name, used as the `audio/<format>` MIME subtype.
    pub format: String,
    /// Address of the audio file.
    pub url: String,
}

/// Loose, unvalidated media record.
///
/// Field names follow the shape embedding pages already use. `mpeg` and
/// `ogg` are shorthands for entries of `audio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaRecord {
    pub thumb: Option<String>,
    pub img: Option<String>,
    pub youtube: Option<String>,
    pub vimeo: Option<String>,
    pub video_width: Option<u32>,
    pub video_height: Option<u32>,
    pub mpeg: Option<String>,
    pub ogg: Option<String>,
    pub audio: Vec<AudioSourceRecord>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<String>,
}

/// Video hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    YouTube,
    Vimeo,
}

impl VideoProvider {
    /// Lowercase provider name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Vimeo => "vimeo",
        }
    }
}

/// The media-kind specific part of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaPayload {
    /// A still image shown at full size in the lightbox.
    Image {
        /// Address of the full-size image.
        full: String,
    },
    /// An embedded, provider-hosted video.
    Video {
        provider: VideoProvider,
        /// Provider-specific video code.
        code: String,
        width: u32,
        height: u32,
    },
    /// An HTML audio player with one source per format.
    Audio {
        /// `(format, url)` pairs in caller order.
        sources: Vec<(String, String)>,
    },
}

/// Optional descriptive text shared by every media kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<String>,
}

/// One validated catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Address of the grid thumbnail image.
    pub thumb: String,
    pub payload: MediaPayload,
    pub metadata: MediaMetadata,
}

/// Treat empty strings the same as absent fields.
fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl MediaDescriptor {
    /// Validate a loose record into a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::MissingThumbnail`] when `thumb` is absent,
    /// [`DescriptorError::NoPayload`] when no payload kind is populated,
    /// [`DescriptorError::AmbiguousPayload`] when several are, and
    /// [`DescriptorError::MissingVideoDimensions`] for a video without a
    /// positive size.
    pub fn try_from_record(record: &MediaRecord) -> Result<Self, DescriptorError> {
        let thumb = present(record.thumb.as_ref())
            .ok_or(DescriptorError::MissingThumbnail)?
            .to_owned();

        let image = present(record.img.as_ref());
        let youtube = present(record.youtube.as_ref());
        let vimeo = present(record.vimeo.as_ref());

        let mut sources: Vec<(String, String)> = Vec::new();
        if let Some(url) = present(record.mpeg.as_ref()) {
            sources.push(("mpeg".to_owned(), url.to_owned()));
        }
        if let Some(url) = present(record.ogg.as_ref()) {
            sources.push(("ogg".to_owned(), url.to_owned()));
        }
        sources.extend(
            record
                .audio
                .iter()
                .filter(|s| !s.url.trim().is_empty())
                .map(|s| (s.format.clone(), s.url.clone())),
        );

        let mut kinds = Vec::new();
        if image.is_some() {
            kinds.push("image");
        }
        if youtube.is_some() {
            kinds.push("youtube");
        }
        if vimeo.is_some() {
            kinds.push("vimeo");
        }
        if !sources.is_empty() {
            kinds.push("audio");
        }

        let payload = match kinds.as_slice() {
            [] => return Err(DescriptorError::NoPayload),
            ["image"] => MediaPayload::Image {
                full: image.unwrap_or_default().to_owned(),
            },
            ["youtube" | "vimeo"] => {
                let (provider, code) = match (youtube, vimeo) {
                    (Some(code), _) => (VideoProvider::YouTube, code),
                    (_, Some(code)) => (VideoProvider::Vimeo, code),
                    (None, None) => return Err(DescriptorError::NoPayload),
                };
                let width = record.video_width.filter(|w| *w > 0);
                let height = record.video_height.filter(|h| *h > 0);
                let (Some(width), Some(height)) = (width, height) else {
                    return Err(DescriptorError::MissingVideoDimensions);
                };
                MediaPayload::Video {
                    provider,
                    code: code.to_owned(),
                    width,
                    height,
                }
            }
            ["audio"] => MediaPayload::Audio { sources },
            many => return Err(DescriptorError::AmbiguousPayload(many.join(" + "))),
        };

        Ok(Self {
            thumb,
            payload,
            metadata: MediaMetadata {
                title: record.title.clone(),
                description: record.description.clone(),
                credits: record.credits.clone(),
            },
        })
    }
}

/// Ordered, fixed-length sequence of validated descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCatalog(Vec<MediaDescriptor>);

impl MediaCatalog {
    /// Validate every record, rejecting the whole catalog on the first
    /// invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::InvalidDescriptor`] naming the index of the
    /// first record that fails [`MediaDescriptor::try_from_record`].
    pub fn from_records(records: &[MediaRecord]) -> Result<Self, GalleryError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                MediaDescriptor::try_from_record(record)
                    .map_err(|source| GalleryError::InvalidDescriptor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaDescriptor> {
        self.0.get(index)
    }
}

impl Index<usize> for MediaCatalog {
    type Output = MediaDescriptor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn image_record(thumb: &str, img: &str) -> MediaRecord {
        MediaRecord {
            thumb: Some(thumb.into()),
            img: Some(img.into()),
            title: Some("title".into()),
            ..MediaRecord::default()
        }
    }

    #[test]
    fn image_record_becomes_image_payload() {
        let d = MediaDescriptor::try_from_record(&image_record("t.jpg", "i.jpg")).unwrap();
        assert_eq!(d.thumb, "t.jpg");
        assert_eq!(
            d.payload,
            MediaPayload::Image {
                full: "i.jpg".into()
            }
        );
        assert_eq!(d.metadata.title.as_deref(), Some("title"));
    }

    #[test]
    fn vimeo_record_requires_dimensions() {
        let record = MediaRecord {
            thumb: Some("t.jpg".into()),
            vimeo: Some("123".into()),
            ..MediaRecord::default()
        };
        assert_eq!(
            MediaDescriptor::try_from_record(&record),
            Err(DescriptorError::MissingVideoDimensions)
        );

        let record = MediaRecord {
            video_width: Some(640),
            video_height: Some(360),
            ..record
        };
        let d = MediaDescriptor::try_from_record(&record).unwrap();
        assert!(matches!(
            d.payload,
            MediaPayload::Video {
                provider: VideoProvider::Vimeo,
                width: 640,
                height: 360,
                ..
            }
        ));
    }

    #[test]
    fn audio_sources_keep_caller_order() {
        let record = MediaRecord {
            thumb: Some("t.jpg".into()),
            mpeg: Some("a.mp3".into()),
            ogg: Some("a.ogg".into()),
            audio: vec![AudioSourceRecord {
                format: "wav".into(),
                url: "a.wav".into(),
            }],
            ..MediaRecord::default()
        };
        let d = MediaDescriptor::try_from_record(&record).unwrap();
        let MediaPayload::Audio { sources } = d.payload else {
            unreachable!("expected audio payload");
        };
        let formats: Vec<&str> = sources.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(formats, ["mpeg", "ogg", "wav"]);
    }

    #[test]
    fn record_without_payload_is_rejected() {
        let record = MediaRecord {
            thumb: Some("t.jpg".into()),
            title: Some("lonely".into()),
            ..MediaRecord::default()
        };
        assert_eq!(
            MediaDescriptor::try_from_record(&record),
            Err(DescriptorError::NoPayload)
        );
    }

    #[test]
    fn blank_fields_count_as_absent() {
        let record = MediaRecord {
            thumb: Some("t.jpg".into()),
            img: Some("   ".into()),
            ..MediaRecord::default()
        };
        assert_eq!(
            MediaDescriptor::try_from_record(&record),
            Err(DescriptorError::NoPayload)
        );
    }

    #[test]
    fn record_with_two_payloads_is_rejected() {
        let record = MediaRecord {
            youtube: Some("abc".into()),
            video_width: Some(1),
            video_height: Some(1),
            ..image_record("t.jpg", "i.jpg")
        };
        assert!(matches!(
            MediaDescriptor::try_from_record(&record),
            Err(DescriptorError::AmbiguousPayload(_))
        ));
    }

    #[test]
    fn missing_thumbnail_is_rejected() {
        let record = MediaRecord {
            img: Some("i.jpg".into()),
            ..MediaRecord::default()
        };
        assert_eq!(
            MediaDescriptor::try_from_record(&record),
            Err(DescriptorError::MissingThumbnail)
        );
    }

    #[test]
    fn catalog_rejects_whole_list_with_index() {
        let records = vec![
            image_record("a.jpg", "A.jpg"),
            MediaRecord {
                thumb: Some("b.jpg".into()),
                ..MediaRecord::default()
            },
            image_record("c.jpg", "C.jpg"),
        ];
        assert_eq!(
            MediaCatalog::from_records(&records),
            Err(GalleryError::InvalidDescriptor {
                index: 1,
                source: DescriptorError::NoPayload,
            })
        );
    }

    #[test]
    fn catalog_from_json_records() {
        let json = r#"[
            {"thumb": "a.jpg", "img": "A.jpg", "title": "A"},
            {"thumb": "b.jpg", "youtube": "xyz", "video_width": 560, "video_height": 315},
            {"thumb": "c.jpg", "ogg": "c.ogg"}
        ]"#;
        let records: Vec<MediaRecord> = serde_json::from_str(json).unwrap();
        let catalog = MediaCatalog::from_records(&records).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(matches!(catalog[1].payload, MediaPayload::Video { .. }));
        assert!(matches!(catalog[2].payload, MediaPayload::Audio { .. }));
    }
}
