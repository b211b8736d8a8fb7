//! Adaptive grid packing.
//!
//! Thumbnails arrive one at a time in catalog order. The first row is
//! sized by measurement: thumbnails are appended until the row's rendered
//! width reaches the container width, at which point the thumbnail that
//! caused the overflow moves to a new row and the column count freezes.
//! Every later row wraps purely on that column count, without
//! re-measuring width.

use crate::loader::ThumbnailEntry;

/// Mutable packing state, owned by a single [`GridLayoutEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    /// Container width captured once at construction.
    pub container_width: f64,
    /// Columns in the first row; frozen once `first_row_finalized` is set.
    pub columns_in_first_row: usize,
    /// Items placed in the active row.
    pub current_row_filled: usize,
    pub first_row_finalized: bool,
}

/// Where a thumbnail ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
}

/// Two-phase row packer (measure the first row, then count columns).
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayoutEngine {
    state: LayoutState,
    cell_chrome: f64,
    first_row_width: f64,
    rows: Vec<Vec<usize>>,
}

impl GridLayoutEngine {
    /// Create an engine for a container of `container_width` pixels.
    ///
    /// `cell_chrome` is the horizontal space each cell adds around its
    /// thumbnail (padding and borders).
    #[must_use]
    pub fn new(container_width: f64, cell_chrome: f64) -> Self {
        Self {
            state: LayoutState {
                container_width,
                columns_in_first_row: 0,
                current_row_filled: 0,
                first_row_finalized: false,
            },
            cell_chrome: cell_chrome.max(0.0),
            first_row_width: 0.0,
            rows: vec![Vec::new()],
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Catalog indices per row, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        if self.rows.len() == 1 && self.rows[0].is_empty() {
            &[]
        } else {
            &self.rows
        }
    }

    /// Number of thumbnails placed so far.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Place one loaded thumbnail. Must be called in catalog order.
    pub fn place(&mut self, entry: &ThumbnailEntry) -> Placement {
        let index = entry.index;

        if self.state.first_row_finalized {
            if self.state.current_row_filled >= self.state.columns_in_first_row {
                self.rows.push(Vec::new());
                self.state.current_row_filled = 1;
            } else {
                self.state.current_row_filled += 1;
            }
            return self.append(index);
        }

        // Append first, then measure: the width is only known once the
        // thumbnail sits in the row.
        self.first_row_width += entry.width + self.cell_chrome;
        let placement = self.append(index);

        if self.first_row_width < self.state.container_width {
            self.state.columns_in_first_row += 1;
            return placement;
        }

        self.state.first_row_finalized = true;
        if self.state.columns_in_first_row == 0 {
            // A lone thumbnail wider than the container keeps its row.
            self.state.columns_in_first_row = 1;
            self.state.current_row_filled = 1;
            tracing::debug!(index, "first thumbnail overflows container; single column");
            return placement;
        }

        self.rows[0].pop();
        self.rows.push(vec![index]);
        self.state.current_row_filled = 1;
        tracing::debug!(
            columns = self.state.columns_in_first_row,
            "first row finalized"
        );
        Placement {
            row: self.rows.len() - 1,
            column: 0,
        }
    }

    fn append(&mut self, index: usize) -> Placement {
        let row = self.rows.len() - 1;
        let cells = &mut self.rows[row];
        cells.push(index);
        Placement {
            row,
            column: cells.len() - 1,
        }
    }
}
