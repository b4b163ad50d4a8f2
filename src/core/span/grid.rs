//! Table grid and logical column bookkeeping
//!
//! Rows lose cells while spans are merged, so a raw cell index says nothing
//! about which column a cell sits in. [`Layout`] recomputes the logical
//! position of every cell from colspans and from rowspans reaching down
//! from earlier rows.

use super::cell::{Cell, MAX_SPAN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row {
    /// Cells in this row
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Row { cells: Vec::new() }
    }

    /// Sum of the colspans of the cells in this row
    pub fn span_width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan).sum()
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row { cells }
    }
}

/// A table body: an ordered list of rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    /// Build a table from rows of cell text, one default cell per string
    pub fn from_text<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            rows: rows
                .into_iter()
                .map(|row| Row::from(row.into_iter().map(Cell::new).collect::<Vec<_>>()))
                .collect(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    /// Widest logical row, counting columns covered from above
    pub fn column_count(&self) -> usize {
        Layout::of(self).column_count()
    }

    /// Logical width of every row
    pub fn row_widths(&self) -> Vec<usize> {
        Layout::of(self).widths
    }
}

/// What occupies one logical grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// No cell reaches this position
    Vacant,
    /// The leftmost column of the cell at this raw index in the row
    Start(usize),
    /// Covered by a cell starting further left or in a row above
    Spanned,
}

/// Logical column positions for every cell of a table
#[derive(Debug, Clone)]
pub struct Layout {
    grid: Vec<Vec<Occupant>>,
    widths: Vec<usize>,
}

impl Layout {
    /// Lay out a table, honouring rowspans carried by earlier rows
    pub fn of(table: &Table) -> Self {
        // Remaining rows each column is covered by a rowspan, this row included
        let mut coverage: Vec<usize> = Vec::new();
        let mut grid = Vec::with_capacity(table.rows.len());
        let mut widths = Vec::with_capacity(table.rows.len());

        for row in &table.rows {
            let mut occupants: Vec<Occupant> = coverage
                .iter()
                .map(|&n| if n > 0 { Occupant::Spanned } else { Occupant::Vacant })
                .collect();
            let mut width = coverage.iter().filter(|&&n| n > 0).count();
            let mut col = 0;

            for (index, cell) in row.cells.iter().enumerate() {
                while col < coverage.len() && coverage[col] > 0 {
                    col += 1;
                }

                // Past MAX_SPAN every cell takes a single column
                let span = cell.colspan.clamp(1, MAX_SPAN.saturating_sub(col).max(1));
                if col + span > occupants.len() {
                    occupants.resize(col + span, Occupant::Vacant);
                    coverage.resize(col + span, 0);
                }

                occupants[col] = Occupant::Start(index);
                for slot in occupants.iter_mut().skip(col + 1).take(span - 1) {
                    *slot = Occupant::Spanned;
                }
                for remaining in coverage.iter_mut().skip(col).take(span) {
                    *remaining = cell.rowspan.max(1);
                }

                width += span;
                col += span;
            }

            for remaining in coverage.iter_mut() {
                *remaining = remaining.saturating_sub(1);
            }

            grid.push(occupants);
            widths.push(width);
        }

        Layout { grid, widths }
    }

    /// Number of logical columns
    pub fn column_count(&self) -> usize {
        self.widths.iter().copied().max().unwrap_or(0)
    }

    /// Occupant of a grid position
    pub fn at(&self, row: usize, column: usize) -> Occupant {
        self.grid
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(Occupant::Vacant)
    }

    /// Logical start column of the cell at a raw index
    pub fn column_of(&self, row: usize, index: usize) -> Option<usize> {
        self.grid
            .get(row)?
            .iter()
            .position(|o| *o == Occupant::Start(index))
    }

    /// Logical width of a row
    pub fn width(&self, row: usize) -> usize {
        self.widths.get(row).copied().unwrap_or(0)
    }

    pub fn row_count(&self) -> usize {
        self.grid.len()
    }
}
