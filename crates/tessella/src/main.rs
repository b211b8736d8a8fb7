use std::rc::Rc;

use dioxus::prelude::*;
use tessella_core::{GalleryConfig, GalleryEvent, MediaCatalog, MediaRecord};
use tessella_web::MediaGallery;

/// Demo catalog, in the loose record format embedding pages supply.
const CATALOG_JSON: &str = include_str!("../assets/catalog.json");

const STYLESHEET: &str = include_str!("../assets/tessella.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(app);
}

/// Parse and validate the bundled catalog.
fn load_catalog() -> Result<MediaCatalog, String> {
    let records: Vec<MediaRecord> =
        serde_json::from_str(CATALOG_JSON).map_err(|e| format!("catalog is not valid JSON: {e}"))?;
    MediaCatalog::from_records(&records).map_err(|e| e.to_string())
}

/// Root application component.
fn app() -> Element {
    let catalog = use_hook(|| load_catalog().map(Rc::new));
    let mut placed = use_signal(|| 0usize);
    let mut skipped = use_signal(|| 0usize);
    let mut complete = use_signal(|| false);

    let config = GalleryConfig {
        enable_gesture_navigation: true,
        cell_chrome: 12.0,
        ..GalleryConfig::default()
    };

    let on_event = move |event: GalleryEvent| {
        tracing::debug!(?event, "gallery event");
        match event {
            GalleryEvent::ItemRendered(_) => placed += 1,
            GalleryEvent::ItemSkipped(_) => skipped += 1,
            _ => {}
        }
    };

    let status = if complete() {
        format!("{placed} items ({skipped} skipped)")
    } else {
        format!("Loading... {placed} placed")
    };

    rsx! {
        style { dangerous_inner_html: STYLESHEET }

        header { class: "tessella-header",
            h1 { "tessella" }
            p { class: "tessella-status", "{status}" }
        }

        main { class: "tessella-page",
            match catalog {
                Ok(catalog) => rsx! {
                    MediaGallery {
                        catalog: catalog,
                        config: config,
                        on_event: on_event,
                        on_complete: move |()| complete.set(true),
                    }
                },
                Err(err) => rsx! {
                    p { class: "tessella-error", "{err}" }
                },
            }
        }
    }
}
