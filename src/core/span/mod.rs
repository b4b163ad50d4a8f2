//! Cell and Row Span System
//!
//! Rewrites an already tokenized table into a span-aware table.
//!
//! This module provides:
//! - Column spans: empty cells fold into the content cell on their left
//! - Row spans: empty cells above a marker such as `_^_` fold into the
//!   first content cell above them
//! - Vertical alignment taken from the marker (`^` top, `=` bottom)
//!
//! # Architecture
//!
//! Two passes run over the same table, columns first so that every row
//! already reflects its final column membership when rows are merged:
//!
//! ```text
//! Tokenized rows -> Column merge -> Logical layout -> Row merge -> Serializer
//! ```
//!
//! # Example
//!
//! ```
//! use cellspan::span::{span_table, Table, VAlign};
//!
//! let mut table = Table::from_text([["A", "B"], ["", "x"], ["_^_", "y"]]);
//! span_table(&mut table).unwrap();
//!
//! let anchor = &table.rows[0].cells[0];
//! assert_eq!(anchor.rowspan, 3);
//! assert_eq!(anchor.valign, VAlign::Top);
//! ```

mod cell;
mod columns;
mod grid;
mod marker;
mod options;
mod rows;


// Re-export public API
pub use cell::{Cell, VAlign, MAX_SPAN};
pub use columns::merge_columns;
pub use grid::{Layout, Occupant, Row, Table};
pub use marker::{classify, classify_cell, looks_like_marker, CellKind};
pub use options::{SpanOptions, DEFAULT_EMPTY_TOKEN};
pub use rows::{apply_rows, merge_rows, plan_rows, CellRef, RowMerge, RowPlan};

use crate::utils::error::{SpanError, SpanReport, SpanResult, SpanWarning};

/// Span a table with default options
pub fn span_table(table: &mut Table) -> SpanResult<SpanReport> {
    span_table_with_options(table, &SpanOptions::default())
}

/// Run the column-merge pass, then the row-merge pass.
///
/// A conflicting marker aborts the row-merge pass and is returned as an
/// error; the column spans already applied stay in place. Rows whose width
/// differs from the table width are reported as warnings, or returned as
/// [`SpanError::IrregularRow`] when `options.strict` is set.
pub fn span_table_with_options(
    table: &mut Table,
    options: &SpanOptions,
) -> SpanResult<SpanReport> {
    let absorbed_columns = merge_columns(table, options);

    let plan = plan_rows(table, options)?;
    let absorbed_rows = apply_rows(table, &plan);

    let mut report = SpanReport {
        absorbed_columns,
        absorbed_rows,
        column_count: 0,
        warnings: plan.orphans,
    };

    let widths = table.row_widths();
    let expected = widths.iter().copied().max().unwrap_or(0);
    report.column_count = expected;

    for (row, &actual) in widths.iter().enumerate() {
        if actual == expected {
            continue;
        }
        if options.strict {
            return Err(SpanError::IrregularRow {
                row,
                expected,
                actual,
            });
        }
        tracing::warn!(row, expected, actual, "row width differs from table width");
        report
            .warnings
            .push(SpanWarning::irregular_row(row, expected, actual));
    }

    Ok(report)
}
