//! Wide, column-oriented view of the event store.
//!
//! Rows are anonymous and ordered by insertion slot. Every column is padded
//! with empty cells up to `row_count`, so `cells[i]` of any column is row `i`.

use crate::utils::time::anchor_naive_cell;
use chrono::FixedOffset;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideColumn {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub columns: Vec<WideColumn>,
}

impl WideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&WideColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Add a column; cells are given top-down and empty strings count as empty.
    pub fn push_column<S: Into<String>>(&mut self, name: S, cells: Vec<Option<String>>) {
        let cells = cells
            .into_iter()
            .map(|c| c.filter(|v| !v.trim().is_empty()))
            .collect();
        self.columns.push(WideColumn {
            name: name.into(),
            cells,
        });
        self.pad();
    }

    /// Grow every column to the longest one.
    pub fn pad(&mut self) {
        let rows = self.row_count();
        for col in &mut self.columns {
            col.cells.resize(rows, None);
        }
    }

    /// Row-major view used by the CSV and XLSX writers.
    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.row_count())
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| c.cells.get(r).cloned().flatten().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Rewrite cells without an offset (`10.06.2025 08:00:00`) into the
    /// storage format, read in `offset`. Returns how many were rewritten.
    pub fn anchor_naive(&mut self, offset: FixedOffset) -> usize {
        let mut rewritten = 0;
        for cell in self.columns.iter_mut().flat_map(|c| c.cells.iter_mut()) {
            if let Some(v) = cell
                && let Some(anchored) = anchor_naive_cell(v, offset)
            {
                *v = anchored;
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Number of non-empty cells.
    pub fn filled_cells(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.cells.iter().filter(|v| v.is_some()).count())
            .sum()
    }
}
