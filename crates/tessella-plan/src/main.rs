//! tessella-plan: preview the thumbnail grid a catalog produces.
//!
//! Reads a catalog JSON whose records carry their thumbnail size
//! (`thumb_width`, `thumb_height`) next to the usual media fields, runs
//! the same sequential loader and two-phase row packing the browser
//! gallery uses, and prints one line per grid row. Records without a
//! thumbnail size are treated as failed loads and skipped.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin tessella-plan -- [OPTIONS] --width <PX> <CATALOG_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::{Future, ready};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tessella_core::{
    Gallery, GalleryConfig, GalleryError, LoadError, MediaRecord, Size, ThumbnailSource,
};
use tracing_subscriber::EnvFilter;

/// Preview the thumbnail grid for a catalog and container width.
#[derive(Parser)]
#[command(name = "tessella-plan", version)]
struct Cli {
    /// Catalog JSON: an array of media records with `thumb_width` and
    /// `thumb_height`.
    catalog_path: PathBuf,

    /// Container width in pixels.
    #[arg(long)]
    width: f64,

    /// Horizontal space each cell adds around its thumbnail, in pixels.
    #[arg(long, default_value_t = GalleryConfig::default().cell_chrome)]
    cell_chrome: f64,

    /// Print the plan as JSON instead of one line per row.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum PlanError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] GalleryError),
}

/// A media record annotated with the size its thumbnail would load at.
#[derive(Debug, Deserialize)]
struct SizedRecord {
    #[serde(flatten)]
    record: MediaRecord,
    thumb_width: Option<f64>,
    #[serde(default)]
    thumb_height: f64,
}

/// Thumbnail "loads" answered from the sizes recorded in the catalog.
///
/// The loader requests thumbnails one at a time in catalog order, so each
/// load takes the next record's size. Records sharing a thumbnail URL keep
/// their own sizes.
struct SizeTable(RefCell<VecDeque<Option<Size>>>);

impl ThumbnailSource for SizeTable {
    fn load(&self, url: &str) -> impl Future<Output = Result<Size, LoadError>> {
        let size = self.0.borrow_mut().pop_front().flatten();
        ready(size.ok_or_else(|| LoadError::new(url, "no thumbnail size in catalog")))
    }
}

/// Result of packing a catalog.
#[derive(Debug, Serialize)]
struct Plan {
    container_width: f64,
    columns_in_first_row: usize,
    rows: Vec<PlannedRow>,
    skipped: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct PlannedRow {
    items: Vec<usize>,
    /// Thumbnail widths plus cell chrome.
    width: f64,
}

fn plan(json: &str, config: &GalleryConfig, container_width: f64) -> Result<Plan, PlanError> {
    let sized: Vec<SizedRecord> = serde_json::from_str(json)?;
    let records: Vec<MediaRecord> = sized.iter().map(|s| s.record.clone()).collect();

    let table = SizeTable(RefCell::new(
        sized
            .iter()
            .map(|s| s.thumb_width.map(|width| Size::new(width, s.thumb_height)))
            .collect(),
    ));

    let chrome = config.cell_chrome;
    let mut gallery = Gallery::new(&records, config, container_width)?;
    futures::executor::block_on(gallery.populate(&table));

    let rows = gallery
        .layout()
        .rows()
        .iter()
        .map(|items| PlannedRow {
            width: items
                .iter()
                .filter_map(|&i| gallery.entry(i))
                .map(|entry| entry.width + chrome)
                .sum(),
            items: items.clone(),
        })
        .collect();
    let skipped = (0..gallery.catalog().len())
        .filter(|&i| gallery.entry(i).is_none())
        .collect();

    Ok(Plan {
        container_width,
        columns_in_first_row: gallery.layout().state().columns_in_first_row,
        rows,
        skipped,
    })
}

fn format_rows(plan: &Plan) -> Vec<String> {
    plan.rows
        .iter()
        .enumerate()
        .map(|(row, planned)| {
            let items: Vec<String> = planned.items.iter().map(ToString::to_string).collect();
            format!(
                "row {row}: [{}] {:.0}/{:.0}px",
                items.join(", "),
                planned.width,
                plan.container_width
            )
        })
        .collect()
}

fn read_catalog(path: &Path) -> Result<String, PlanError> {
    std::fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.to_owned(),
        source,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GalleryConfig {
        cell_chrome: cli.cell_chrome,
        ..GalleryConfig::default()
    };

    let outcome =
        read_catalog(&cli.catalog_path).and_then(|json| plan(&json, &config, cli.width));
    let plan = match outcome {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing plan: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for line in format_rows(&plan) {
            println!("{line}");
        }
        if !plan.skipped.is_empty() {
            eprintln!("skipped: {:?}", plan.skipped);
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn default_plan(json: &str, width: f64) -> Plan {
        plan(json, &GalleryConfig::default(), width).unwrap()
    }

    const THREE: &str = r#"[
        {"thumb": "a.jpg", "img": "a-full.jpg", "thumb_width": 200, "thumb_height": 100},
        {"thumb": "b.jpg", "img": "b-full.jpg", "thumb_width": 300, "thumb_height": 100},
        {"thumb": "c.jpg", "img": "c-full.jpg", "thumb_width": 180, "thumb_height": 100}
    ]"#;

    #[test]
    fn prints_one_line_per_row() {
        let plan = default_plan(THREE, 450.0);
        assert_eq!(plan.columns_in_first_row, 1);
        assert_eq!(
            format_rows(&plan),
            [
                "row 0: [0] 200/450px",
                "row 1: [1] 300/450px",
                "row 2: [2] 180/450px",
            ]
        );
    }

    #[test]
    fn cell_chrome_counts_towards_row_width() {
        let json = r#"[
            {"thumb": "a", "img": "A", "thumb_width": 100},
            {"thumb": "b", "img": "B", "thumb_width": 100},
            {"thumb": "c", "img": "C", "thumb_width": 100}
        ]"#;
        let roomy = default_plan(json, 350.0);
        assert_eq!(roomy.rows.len(), 1);

        let config = GalleryConfig {
            cell_chrome: 20.0,
            ..GalleryConfig::default()
        };
        let tight = plan(json, &config, 350.0).unwrap();
        assert_eq!(tight.columns_in_first_row, 2);
        assert_eq!(tight.rows[0].items, [0, 1]);
        assert!((tight.rows[0].width - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_size_is_skipped() {
        let json = r#"[
            {"thumb": "a", "img": "A", "thumb_width": 100},
            {"thumb": "b", "img": "B"},
            {"thumb": "c", "img": "C", "thumb_width": 100}
        ]"#;
        let plan = default_plan(json, 1000.0);
        assert_eq!(plan.skipped, [1]);
        assert_eq!(plan.rows[0].items, [0, 2]);
    }

    #[test]
    fn shared_thumbnail_keeps_per_record_size() {
        let json = r#"[
            {"thumb": "same.jpg", "img": "A", "thumb_width": 100},
            {"thumb": "same.jpg", "img": "B", "thumb_width": 400},
            {"thumb": "same.jpg", "img": "C"}
        ]"#;
        let plan = default_plan(json, 450.0);
        assert_eq!(plan.skipped, [2]);
        assert_eq!(plan.rows.len(), 2);
        assert!((plan.rows[0].width - 100.0).abs() < f64::EPSILON);
        assert!((plan.rows[1].width - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_record_is_reported() {
        let json = r#"[{"thumb": "a", "thumb_width": 100}]"#;
        let err = plan(json, &GalleryConfig::default(), 300.0).unwrap_err();
        assert!(matches!(err, PlanError::Catalog(_)));
        assert!(err.to_string().contains("index 0"), "{err}");
    }
}
