//! Thumbnail grid.
//!
//! Measures its container once mounted, then loads thumbnails one at a
//! time and places each as soon as it has loaded. Clicking a thumbnail
//! opens the lightbox on that item.

use std::rc::Rc;

use dioxus::prelude::*;
use tessella_core::loader::run_loader;
use tessella_core::render;
use tessella_core::{Gallery, GalleryConfig, GalleryEvent, MediaCatalog};

use crate::components::Lightbox;
use crate::handle::{LightboxHandle, use_lightbox};
use crate::thumbnail::{self, ImageSource};

/// Props for the [`MediaGallery`] component.
#[derive(Props, Clone)]
pub struct MediaGalleryProps {
    /// Validated items, in display order.
    catalog: Rc<MediaCatalog>,
    #[props(default)]
    config: GalleryConfig,
    /// Every grid and lightbox event.
    on_event: Option<EventHandler<GalleryEvent>>,
    /// Fired once after the last thumbnail was processed.
    on_complete: Option<EventHandler<()>>,
}

impl PartialEq for MediaGalleryProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog) && self.config == other.config
    }
}

/// Adaptive thumbnail grid plus its lightbox.
#[component]
pub fn MediaGallery(props: MediaGalleryProps) -> Element {
    let mut grid = use_signal(|| Option::<Gallery>::None);
    let lightbox = use_lightbox(props.catalog.len(), &props.config, props.on_event);

    let onmounted = {
        let catalog = Rc::clone(&props.catalog);
        let config = props.config.clone();
        let on_event = props.on_event;
        let on_complete = props.on_complete;
        move |event: MountedEvent| {
            let catalog = Rc::clone(&catalog);
            let config = config.clone();
            async move {
                let width = match event.get_client_rect().await {
                    Ok(rect) => rect.width(),
                    Err(err) => {
                        tracing::warn!(?err, "container not measurable, packing one per row");
                        0.0
                    }
                };

                let mut gallery = Gallery::from_catalog(Rc::clone(&catalog), &config, width);
                if let Some(handler) = on_event {
                    gallery.subscribe(move |event| handler.call(*event));
                }
                if let Some(handler) = on_complete {
                    gallery.on_complete(move || handler.call(()));
                }
                grid.set(Some(gallery));

                run_loader(&catalog, &ImageSource, |index, outcome| {
                    if outcome.is_ok()
                        && let Some((content, _)) = catalog.get(index).map(render::render)
                        && let Some(url) = content.preload_url()
                    {
                        thumbnail::preload(url);
                    }
                    if let Some(gallery) = grid.write().as_mut() {
                        gallery.accept(index, outcome);
                    }
                })
                .await;

                if let Some(gallery) = grid.write().as_mut() {
                    gallery.finish_loading();
                }
            }
        }
    };

    let gallery = grid.read();
    rsx! {
        div {
            class: "tessella-gallery",
            onmounted: onmounted,

            if let Some(gallery) = gallery.as_ref() {
                table { class: "tessella-grid",
                    tbody {
                        for (row_index, row) in gallery.layout().rows().iter().enumerate() {
                            tr { key: "{row_index}",
                                for &index in row {
                                    {render_cell(gallery, index, lightbox)}
                                }
                            }
                        }
                    }
                }
            }
        }

        Lightbox { handle: lightbox, catalog: Rc::clone(&props.catalog) }
    }
}

/// Render one placed thumbnail.
fn render_cell(gallery: &Gallery, index: usize, lightbox: LightboxHandle) -> Element {
    let Some(entry) = gallery.entry(index) else {
        return rsx! {};
    };
    let title = gallery
        .catalog()
        .get(index)
        .and_then(|item| item.metadata.title.clone())
        .unwrap_or_default();

    rsx! {
        td { class: "tessella-cell",
            img {
                class: "tessella-thumb",
                src: "{entry.source}",
                alt: "{title}",
                title: "{title}",
                width: "{entry.width}",
                height: "{entry.height}",
                onclick: move |_| lightbox.open(index),
            }
        }
    }
}
