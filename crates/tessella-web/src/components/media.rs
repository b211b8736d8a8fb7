//! One catalog item rendered inside the lightbox frame.
//!
//! The view lays out at its natural size inside the frame (the frame
//! clips it while it is still small), then reports that size so the
//! frame can grow to fit.

use std::rc::Rc;

use dioxus::prelude::*;
use tessella_core::{MediaCatalog, MediaContent, Size, render};

use crate::handle::LightboxHandle;

/// Props for the [`MediaView`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MediaViewProps {
    handle: LightboxHandle,
    catalog: Rc<MediaCatalog>,
    index: usize,
    opacity: f64,
    /// Rendered below the caption (navigation controls).
    children: Element,
}

#[component]
pub fn MediaView(props: MediaViewProps) -> Element {
    let handle = props.handle;
    let index = props.index;
    let mut container = use_signal(|| Option::<Rc<MountedData>>::None);
    // An image served from cache can finish before the container mounts.
    let mut loaded = use_signal(|| false);

    let Some((content, caption)) = props.catalog.get(index).map(render::render) else {
        return rsx! {};
    };
    // Images report once their pixels are in; everything else has its
    // size as soon as it is in the document.
    let waits_for_load = matches!(content, MediaContent::Image { .. });
    let stops_clicks = content.stops_click_propagation();

    let on_ready = move |_: ImageEvent| {
        loaded.set(true);
        if let Some(mounted) = container.peek().clone() {
            spawn(measure(mounted, handle, index));
        }
    };

    let body = match &content {
        MediaContent::Image { src } => rsx! {
            img {
                class: "tessella-image",
                src: "{src}",
                alt: "{caption.title}",
                onload: on_ready,
                onerror: on_ready,
            }
        },
        MediaContent::Video {
            provider,
            embed_url,
            width,
            height,
        } => rsx! {
            iframe {
                class: "tessella-video",
                title: "{provider.name()} video",
                src: "{embed_url}",
                width: "{width}",
                height: "{height}",
                "frameborder": "0",
                allowfullscreen: true,
            }
        },
        MediaContent::Audio { sources } => rsx! {
            audio { class: "tessella-audio", controls: true,
                for source in sources {
                    source { src: "{source.url}", r#type: "{source.mime}" }
                }
            }
        },
    };

    rsx! {
        div {
            class: "tessella-content",
            style: "opacity: {props.opacity};",
            onmounted: move |evt: MountedEvent| {
                let mounted = evt.data();
                container.set(Some(Rc::clone(&mounted)));
                if !waits_for_load || *loaded.peek() {
                    spawn(measure(mounted, handle, index));
                }
            },

            div {
                class: "tessella-media",
                onclick: move |evt: MouseEvent| {
                    if stops_clicks {
                        evt.stop_propagation();
                    }
                },
                {body}
            }

            div { class: "tessella-caption",
                if !caption.title.is_empty() {
                    h3 { class: "tessella-title", "{caption.title}" }
                }
                if !caption.description.is_empty() {
                    div { class: "tessella-description", dangerous_inner_html: "{caption.description}" }
                }
                if !caption.credits.is_empty() {
                    div { class: "tessella-credits", dangerous_inner_html: "{caption.credits}" }
                }
            }

            {props.children}
        }
    }
}

/// Report the laid-out size of the content container, or that it has
/// none, so the reveal always runs.
async fn measure(mounted: Rc<MountedData>, handle: LightboxHandle, index: usize) {
    match mounted.get_client_rect().await {
        Ok(rect) => handle.content_measured(index, Size::new(rect.width(), rect.height())),
        Err(err) => {
            tracing::warn!(index, ?err, "content not measurable");
            handle.content_measure_failed(index);
        }
    }
}
