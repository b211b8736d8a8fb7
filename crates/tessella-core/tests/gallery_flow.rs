//! Integration test: catalog -> sequential loading -> grid -> lightbox.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::executor::block_on;
use tessella_core::render::render;
use tessella_core::surface::StaticSurface;
use tessella_core::{
    DescriptorError, Gallery, GalleryConfig, GalleryError, GalleryEvent, LightboxCommand,
    LightboxController, LightboxPhase, LoadError, MediaRecord, Size, ThumbnailSource, Viewport,
};

/// Future that stays pending for a fixed number of polls.
struct Delayed {
    polls_left: usize,
    outcome: Option<Result<Size, LoadError>>,
}

impl Future for Delayed {
    type Output = Result<Size, LoadError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.polls_left > 0 {
            self.polls_left -= 1;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        Poll::Ready(
            self.outcome
                .take()
                .expect("Delayed polled after completion"),
        )
    }
}

/// Scripted thumbnail source: per-URL size, delay and failure.
struct ScriptedSource {
    sizes: HashMap<String, (Size, usize)>,
    failing: Vec<String>,
    in_flight: Rc<Cell<usize>>,
    max_in_flight: Rc<Cell<usize>>,
    requested: RefCell<Vec<String>>,
}

impl ScriptedSource {
    fn new(items: &[(&str, f64, usize)]) -> Self {
        Self {
            sizes: items
                .iter()
                .map(|(url, width, delay)| ((*url).to_owned(), (Size::new(*width, 100.0), *delay)))
                .collect(),
            failing: Vec::new(),
            in_flight: Rc::new(Cell::new(0)),
            max_in_flight: Rc::new(Cell::new(0)),
            requested: RefCell::new(Vec::new()),
        }
    }
}

/// Wraps a load so the source can count concurrent requests.
struct Tracked {
    inner: Delayed,
    in_flight: Rc<Cell<usize>>,
}

impl Future for Tracked {
    type Output = Result<Size, LoadError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = Pin::new(&mut self.inner).poll(cx);
        if result.is_ready() {
            self.in_flight.set(self.in_flight.get() - 1);
        }
        result
    }
}

impl ThumbnailSource for ScriptedSource {
    fn load(&self, url: &str) -> impl Future<Output = Result<Size, LoadError>> {
        self.requested.borrow_mut().push(url.to_owned());
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));

        let (size, delay) = self.sizes.get(url).copied().unwrap_or_default();
        let outcome = if self.failing.iter().any(|f| f == url) {
            Err(LoadError::new(url, "404"))
        } else {
            Ok(size)
        };
        Tracked {
            inner: Delayed {
                polls_left: delay,
                outcome: Some(outcome),
            },
            in_flight: Rc::clone(&self.in_flight),
        }
    }
}

fn image(thumb: &str) -> MediaRecord {
    MediaRecord {
        thumb: Some(thumb.into()),
        img: Some(format!("full-{thumb}")),
        ..MediaRecord::default()
    }
}

fn record_events(gallery: &mut Gallery) -> Rc<RefCell<Vec<GalleryEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    gallery.subscribe(move |e| sink.borrow_mut().push(*e));
    log
}

#[test]
fn wide_second_thumbnail_forces_single_column() {
    let records = [image("a"), image("b"), image("c")];
    let mut gallery = Gallery::new(&records, &GalleryConfig::default(), 450.0).unwrap();
    let source = ScriptedSource::new(&[("a", 200.0, 0), ("b", 300.0, 0), ("c", 180.0, 0)]);

    block_on(gallery.populate(&source));

    assert_eq!(gallery.layout().state().columns_in_first_row, 1);
    assert_eq!(gallery.layout().rows(), [vec![0], vec![1], vec![2]]);
}

#[test]
fn placement_order_ignores_load_timing() {
    // The first thumbnails are the slowest to load; placement must still
    // follow catalog order and only one load may be outstanding.
    let names: Vec<String> = (0..8).map(|i| format!("t{i}")).collect();
    let records: Vec<MediaRecord> = names.iter().map(|n| image(n)).collect();
    let items: Vec<(&str, f64, usize)> = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.as_str(), 100.0, 20 - 2 * i))
        .collect();
    let source = ScriptedSource::new(&items);
    let mut gallery = Gallery::new(&records, &GalleryConfig::default(), 350.0).unwrap();
    let log = record_events(&mut gallery);

    block_on(gallery.populate(&source));

    let rendered: Vec<usize> = log
        .borrow()
        .iter()
        .filter_map(|e| match e {
            GalleryEvent::ItemRendered(i) => Some(*i),
            _ => None,
        })
        .collect();
    assert_eq!(rendered, (0..8).collect::<Vec<_>>());
    assert_eq!(*source.requested.borrow(), names);
    assert_eq!(source.max_in_flight.get(), 1);
    assert_eq!(
        gallery.layout().rows(),
        [vec![0, 1, 2], vec![3, 4, 5], vec![6, 7]]
    );
    assert_eq!(log.borrow().last(), Some(&GalleryEvent::Complete));
}

#[test]
fn every_row_after_first_matches_column_count() {
    let widths = [120.0, 80.0, 150.0, 90.0, 300.0, 10.0, 60.0, 500.0, 70.0, 20.0, 40.0];
    let names: Vec<String> = (0..widths.len()).map(|i| format!("w{i}")).collect();
    let records: Vec<MediaRecord> = names.iter().map(|n| image(n)).collect();
    let items: Vec<(&str, f64, usize)> = names
        .iter()
        .zip(widths)
        .map(|(n, w)| (n.as_str(), w, 1))
        .collect();
    let source = ScriptedSource::new(&items);
    let mut gallery = Gallery::new(&records, &GalleryConfig::default(), 400.0).unwrap();

    block_on(gallery.populate(&source));

    // 120 + 80 + 150 = 350 < 400; + 90 = 440 breaks.
    let layout = gallery.layout();
    let columns = layout.state().columns_in_first_row;
    assert_eq!(columns, 3);
    assert_eq!(layout.placed(), widths.len());
    let rows = layout.rows();
    for row in &rows[1..rows.len() - 1] {
        assert_eq!(row.len(), columns);
    }
    assert!(rows[rows.len() - 1].len() <= columns);
}

#[test]
fn failed_thumbnail_is_skipped_and_loading_continues() {
    let records = [image("a"), image("b"), image("c")];
    let mut source = ScriptedSource::new(&[("a", 100.0, 0), ("b", 100.0, 3), ("c", 100.0, 0)]);
    source.failing.push("b".into());
    let mut gallery = Gallery::new(&records, &GalleryConfig::default(), 1000.0).unwrap();
    let log = record_events(&mut gallery);
    let completed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&completed);
    gallery.on_complete(move || counter.set(counter.get() + 1));

    block_on(gallery.populate(&source));

    assert_eq!(
        *log.borrow(),
        [
            GalleryEvent::ItemRendered(0),
            GalleryEvent::ItemSkipped(1),
            GalleryEvent::ItemRendered(2),
            GalleryEvent::Complete,
        ]
    );
    assert_eq!(gallery.layout().rows(), [vec![0, 2]]);
    assert!(gallery.entry(1).is_none());
    assert_eq!(completed.get(), 1);

    gallery.finish_loading();
    assert_eq!(completed.get(), 1, "complete fires once");
}

#[test]
fn empty_catalog_completes() {
    let mut gallery = Gallery::new(&[], &GalleryConfig::default(), 300.0).unwrap();
    let log = record_events(&mut gallery);
    block_on(gallery.populate(&ScriptedSource::new(&[])));
    assert_eq!(*log.borrow(), [GalleryEvent::Complete]);
}

#[test]
fn invalid_record_fails_before_rendering() {
    let records = [
        image("a"),
        MediaRecord {
            thumb: Some("b".into()),
            title: Some("nothing to show".into()),
            ..MediaRecord::default()
        },
    ];
    let err = Gallery::new(&records, &GalleryConfig::default(), 300.0).unwrap_err();
    assert_eq!(
        err,
        GalleryError::InvalidDescriptor {
            index: 1,
            source: DescriptorError::NoPayload,
        }
    );
}

#[test]
fn thumbnail_activation_opens_lightbox_on_that_index() {
    let records = [image("a"), image("b"), image("c")];
    let config = GalleryConfig::default();
    let gallery = Gallery::new(&records, &config, 300.0).unwrap();
    let catalog = gallery.catalog();
    let mut lightbox = LightboxController::new(catalog.len(), &config);
    let mut surface = StaticSurface::new(
        Viewport {
            width: 800.0,
            height: 600.0,
            left: 0.0,
            top: 0.0,
        },
        0.0,
    );

    let mut commands = lightbox.open(0, &mut surface);
    while !commands.is_empty() {
        let mut next = Vec::new();
        for command in commands {
            match command {
                LightboxCommand::RunStep(ticket) => {
                    next.extend(lightbox.step_complete(ticket, &mut surface));
                }
                LightboxCommand::MountContent { index } => {
                    let (content, _) = render(catalog.get(index).unwrap());
                    assert!(content.preload_url().is_some());
                    next.extend(lightbox.content_measured(index, Size::new(640.0, 480.0)));
                }
                _ => {}
            }
        }
        commands = next;
    }

    assert_eq!(lightbox.phase(), LightboxPhase::Open);
    assert_eq!(lightbox.navigation().unwrap().current_index, 0);
}
