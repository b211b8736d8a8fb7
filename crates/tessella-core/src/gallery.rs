//! Gallery composition root.
//!
//! A [`Gallery`] owns the validated catalog, the grid layout engine and the
//! event emitter. Loading outcomes are fed in through
//! [`accept`](Gallery::accept) (or all at once with
//! [`populate`](Gallery::populate)). The lightbox is driven separately by
//! a [`LightboxController`](crate::lightbox::LightboxController).

use std::rc::Rc;

use crate::catalog::{MediaCatalog, MediaRecord};
use crate::events::{EventEmitter, GalleryEvent};
use crate::layout::{GridLayoutEngine, Placement};
use crate::loader::{ThumbnailEntry, ThumbnailSource, run_loader};
use crate::types::{GalleryConfig, GalleryError, LoadError};

/// Grid state plus catalog.
#[derive(Debug)]
pub struct Gallery {
    catalog: Rc<MediaCatalog>,
    layout: GridLayoutEngine,
    entries: Vec<Option<ThumbnailEntry>>,
    events: EventEmitter,
    complete: bool,
}

impl Gallery {
    /// Validate `records` and build a gallery for a container of
    /// `container_width` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::InvalidDescriptor`] if any record is
    /// invalid; nothing is rendered in that case.
    pub fn new(
        records: &[MediaRecord],
        config: &GalleryConfig,
        container_width: f64,
    ) -> Result<Self, GalleryError> {
        let catalog = MediaCatalog::from_records(records)?;
        Ok(Self::from_catalog(Rc::new(catalog), config, container_width))
    }

    /// Build a gallery around an already validated catalog.
    #[must_use]
    pub fn from_catalog(
        catalog: Rc<MediaCatalog>,
        config: &GalleryConfig,
        container_width: f64,
    ) -> Self {
        tracing::info!(items = catalog.len(), container_width, "gallery created");
        Self {
            layout: GridLayoutEngine::new(container_width, config.cell_chrome),
            entries: vec![None; catalog.len()],
            catalog,
            events: EventEmitter::new(),
            complete: false,
        }
    }

    /// Shared handle to the catalog, usable while the gallery is borrowed
    /// mutably.
    #[must_use]
    pub fn catalog(&self) -> Rc<MediaCatalog> {
        Rc::clone(&self.catalog)
    }

    #[must_use]
    pub const fn layout(&self) -> &GridLayoutEngine {
        &self.layout
    }

    /// The loaded thumbnail for `index`, if it was placed.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ThumbnailEntry> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Subscribe to every gallery event.
    pub fn subscribe(&mut self, listener: impl FnMut(&GalleryEvent) + 'static) {
        self.events.subscribe(listener);
    }

    /// Register a callback run once after the last item is processed.
    pub fn on_complete(&mut self, mut callback: impl FnMut() + 'static) {
        self.events.subscribe(move |event| {
            if *event == GalleryEvent::Complete {
                callback();
            }
        });
    }

    /// Handle one loading outcome. Successful loads are placed in the grid;
    /// failures are skipped. Returns the placement when there was one.
    pub fn accept(
        &mut self,
        index: usize,
        outcome: Result<ThumbnailEntry, LoadError>,
    ) -> Option<Placement> {
        match outcome {
            Ok(entry) => {
                let placement = self.layout.place(&entry);
                if let Some(slot) = self.entries.get_mut(index) {
                    *slot = Some(entry);
                }
                self.events.emit(GalleryEvent::ItemRendered(index));
                Some(placement)
            }
            Err(err) => {
                tracing::warn!(index, %err, "thumbnail skipped");
                self.events.emit(GalleryEvent::ItemSkipped(index));
                None
            }
        }
    }

    /// Mark loading as finished and emit [`GalleryEvent::Complete`] once.
    pub fn finish_loading(&mut self) {
        if self.complete {
            return;
        }
        self.complete = true;
        tracing::info!(placed = self.layout.placed(), "gallery complete");
        self.events.emit(GalleryEvent::Complete);
    }

    /// Load every thumbnail through `source`, in catalog order.
    pub async fn populate<S: ThumbnailSource>(&mut self, source: &S) {
        let catalog = self.catalog();
        run_loader(&catalog, source, |index, outcome| {
            self.accept(index, outcome);
        })
        .await;
        self.finish_loading();
    }
}
