//! # cellspan
//!
//! Column and row spans for pipe tables.
//!
//! ## Features
//!
//! - **Column spans**: `||` (or `|~~|`) after a cell widens it by one column
//! - **Row spans**: a marker cell such as `_  _` closes a run of empty cells
//!   and folds it into the first content cell above
//! - **Vertical alignment**: `^` in the marker aligns top, `=` bottom
//! - **Diagnostics**: conflicting markers, orphan markers and ragged rows
//! - **Output**: span attributes for any serializer, plus a small HTML writer
//!
//! ## Usage Examples
//!
//! ### Spanning a tokenized table
//!
//! ```rust
//! use cellspan::{span_table, Table, VAlign};
//!
//! let mut table = Table::from_text([
//!     ["r1_c1", "", "big"],
//!     ["r2_c1", "r2_c2", "x"],
//!     ["_^_", "r3_c2", "y"],
//! ]);
//! let report = span_table(&mut table).unwrap();
//!
//! assert_eq!(table.rows[0].cells[0].colspan, 2);
//! assert_eq!(table.rows[1].cells[0].rowspan, 2);
//! assert_eq!(table.rows[1].cells[0].valign, VAlign::Top);
//! assert!(report.is_regular());
//! ```
//!
//! ### Markdown to HTML
//!
//! ```rust
//! use cellspan::markdown_to_html;
//!
//! let html = markdown_to_html("| a | b |\n|---|---|\n| wide ||").unwrap();
//! assert!(html.contains("<td colspan=\"2\">wide</td>"));
//! ```

/// Core span modules
pub mod core;

/// Utility modules
pub mod utils;

// Re-export core modules
pub use core::pipe;
pub use core::span;

pub use core::pipe::{
    parse_pipe_table, render_html, span_markdown, split_tables, ColumnAlign, PipeTable,
    SpannedTable,
};
pub use core::span::{
    merge_columns, merge_rows, span_table, span_table_with_options, Cell, CellKind, Row,
    SpanOptions, Table, VAlign, DEFAULT_EMPTY_TOKEN, MAX_SPAN,
};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{SpanError, SpanReport, SpanResult, SpanWarning, SpanWarningKind};

/// Span every pipe table in a document and render them as HTML
pub fn markdown_to_html(document: &str) -> SpanResult<String> {
    markdown_to_html_with_options(document, &SpanOptions::default())
}

/// Span every pipe table in a document with custom options and render them as HTML
pub fn markdown_to_html_with_options(document: &str, options: &SpanOptions) -> SpanResult<String> {
    let tables = span_markdown(document, options)?;
    Ok(tables
        .iter()
        .map(|t| render_html(&t.table))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Read a table body from JSON: an array of rows, each an array of cells
#[cfg(feature = "serde")]
pub fn table_from_json(input: &str) -> SpanResult<Table> {
    let mut table: Table =
        serde_json::from_str(input).map_err(|e| SpanError::parse_at(e.to_string(), e.line()))?;

    // Tokenizers hand over untrimmed text and may omit spans
    for cell in table.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
        cell.content = cell.content.trim().to_string();
        cell.colspan = cell.colspan.max(1);
        cell.rowspan = cell.rowspan.max(1);
    }

    Ok(table)
}

/// Write a spanned table body as pretty-printed JSON
#[cfg(feature = "serde")]
pub fn table_to_json(table: &Table) -> String {
    serde_json::to_string_pretty(table).unwrap_or_else(|_| "[]".to_string())
}
