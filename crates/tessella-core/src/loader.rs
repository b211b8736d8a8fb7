//! Sequential thumbnail acquisition.
//!
//! Thumbnails are fetched strictly one at a time in catalog order: index
//! `i + 1` is not requested until the outcome for index `i` has been
//! handed to the caller. That ordering is what makes grid placement
//! deterministic regardless of network timing.
//!
//! There is no timeout: a load that never settles stalls the rest of the
//! grid.

use std::future::Future;

use crate::catalog::MediaCatalog;
use crate::types::{LoadError, Size};

/// A loaded thumbnail paired with its catalog index and natural size.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailEntry {
    pub index: usize,
    /// Address the thumbnail was loaded from.
    pub source: String,
    pub width: f64,
    pub height: f64,
}

impl ThumbnailEntry {
    #[must_use]
    pub fn new(index: usize, source: impl Into<String>, size: Size) -> Self {
        Self {
            index,
            source: source.into(),
            width: size.width,
            height: size.height,
        }
    }
}

/// Something that can fetch a thumbnail and report its natural size.
///
/// The browser implementation decodes an `<img>`; tests use scripted
/// futures.
pub trait ThumbnailSource {
    /// Fetch and decode the resource at `url`.
    fn load(&self, url: &str) -> impl Future<Output = Result<Size, LoadError>>;
}

/// What the loader wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderStep {
    /// Fetch the thumbnail for this index.
    Fetch(usize),
    /// A fetch is still outstanding; wait for it.
    Waiting(usize),
    /// Every index has been processed.
    Complete,
}

/// Cursor over the catalog that hands out one index at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailLoader {
    len: usize,
    next: usize,
    in_flight: Option<usize>,
}

impl ThumbnailLoader {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            next: 0,
            in_flight: None,
        }
    }

    /// Claim the next index to fetch.
    ///
    /// Returns [`LoaderStep::Waiting`] while the previous index has not
    /// been [`finish`](Self::finish)ed.
    pub const fn begin(&mut self) -> LoaderStep {
        if let Some(index) = self.in_flight {
            return LoaderStep::Waiting(index);
        }
        if self.next >= self.len {
            return LoaderStep::Complete;
        }
        let index = self.next;
        self.in_flight = Some(index);
        LoaderStep::Fetch(index)
    }

    /// Mark `index` as fully processed. Returns `false` (and changes
    /// nothing) if `index` is not the one in flight.
    pub fn finish(&mut self, index: usize) -> bool {
        if self.in_flight != Some(index) {
            tracing::warn!(index, in_flight = ?self.in_flight, "ignoring out-of-order load outcome");
            return false;
        }
        self.in_flight = None;
        self.next = index + 1;
        true
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.in_flight.is_none() && self.next >= self.len
    }
}

/// Load every thumbnail in `catalog` in order, handing each outcome to
/// `on_outcome` before requesting the next one.
///
/// Failed loads are reported as `Err` and loading continues.
pub async fn run_loader<S, F>(catalog: &MediaCatalog, source: &S, mut on_outcome: F)
where
    S: ThumbnailSource,
    F: FnMut(usize, Result<ThumbnailEntry, LoadError>),
{
    let mut loader = ThumbnailLoader::new(catalog.len());
    while let LoaderStep::Fetch(index) = loader.begin() {
        let url = catalog[index].thumb.as_str();
        tracing::debug!(index, url, "loading thumbnail");
        let outcome = source
            .load(url)
            .await
            .map(|size| ThumbnailEntry::new(index, url, size));
        on_outcome(index, outcome);
        loader.finish(index);
    }
    tracing::debug!(count = catalog.len(), "thumbnail loading complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_hands_out_one_index_at_a_time() {
        let mut loader = ThumbnailLoader::new(2);
        assert_eq!(loader.begin(), LoaderStep::Fetch(0));
        assert_eq!(loader.begin(), LoaderStep::Waiting(0));
        assert!(loader.finish(0));
        assert_eq!(loader.begin(), LoaderStep::Fetch(1));
        assert!(loader.finish(1));
        assert_eq!(loader.begin(), LoaderStep::Complete);
        assert!(loader.is_complete());
    }

    #[test]
    fn finish_rejects_index_not_in_flight() {
        let mut loader = ThumbnailLoader::new(3);
        assert_eq!(loader.begin(), LoaderStep::Fetch(0));
        assert!(!loader.finish(1));
        assert_eq!(loader.begin(), LoaderStep::Waiting(0));
    }

    #[test]
    fn empty_catalog_completes_immediately() {
        let mut loader = ThumbnailLoader::new(0);
        assert_eq!(loader.begin(), LoaderStep::Complete);
    }
}
