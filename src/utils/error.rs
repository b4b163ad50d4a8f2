//! Error handling for span transforms
//!
//! This module provides a unified error type and result type for the
//! column/row merge passes, the pipe-table front end and option parsing.

use std::fmt;
use thiserror::Error;

/// Span transform error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// A row span marker carries both `^` (top) and `=` (bottom)
    #[error(
        "Cannot use both ^ (top) and = (bottom) in a row span marker '{marker}' \
         (row {}, column {})",
        .row + 1,
        .column + 1
    )]
    MarkerConflict {
        row: usize,
        column: usize,
        marker: String,
    },
    /// A row does not add up to the table width (only raised in strict mode)
    #[error("Row {} spans {actual} column(s), expected {expected}", .row + 1)]
    IrregularRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Rejected configuration value
    #[error("Invalid option: {message}")]
    InvalidOption { message: String },
    /// Input could not be tokenized into a table
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    /// Error raised while processing one table of a multi-table document
    #[error("Table {index}: {source}")]
    Table {
        index: usize,
        #[source]
        source: Box<SpanError>,
    },
}

/// Result type for span operations
pub type SpanResult<T> = Result<T, SpanError>;

// Convenience constructors for errors
impl SpanError {
    pub fn conflict(row: usize, column: usize, marker: impl Into<String>) -> Self {
        SpanError::MarkerConflict {
            row,
            column,
            marker: marker.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        SpanError::InvalidOption {
            message: message.into(),
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize) -> Self {
        SpanError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Attach the 1-based table number to an error
    pub fn in_table(self, index: usize) -> Self {
        SpanError::Table {
            index,
            source: Box::new(self),
        }
    }
}

/// Kind of non-fatal condition found while spanning a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanWarningKind {
    /// Row width differs from the table's column count
    IrregularRow,
    /// Marker with no anchor above it, left as literal content
    OrphanMarker,
}

impl fmt::Display for SpanWarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanWarningKind::IrregularRow => write!(f, "irregular-row"),
            SpanWarningKind::OrphanMarker => write!(f, "orphan-marker"),
        }
    }
}

/// Span warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanWarning {
    pub kind: SpanWarningKind,
    pub message: String,
    /// 0-based row index
    pub row: usize,
    /// 0-based logical column, when the warning concerns one cell
    pub column: Option<usize>,
}

impl SpanWarning {
    pub fn irregular_row(row: usize, expected: usize, actual: usize) -> Self {
        Self {
            kind: SpanWarningKind::IrregularRow,
            message: format!("row spans {} column(s), expected {}", actual, expected),
            row,
            column: None,
        }
    }

    pub fn orphan_marker(row: usize, column: usize, marker: &str) -> Self {
        Self {
            kind: SpanWarningKind::OrphanMarker,
            message: format!("marker '{}' has no cell above it to span", marker),
            row,
            column: Some(column),
        }
    }
}

impl fmt::Display for SpanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(c) => write!(
                f,
                "Warning at row {}, column {}: {}",
                self.row + 1,
                c + 1,
                self.message
            ),
            None => write!(f, "Warning at row {}: {}", self.row + 1, self.message),
        }
    }
}

/// Outcome of spanning one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanReport {
    /// Cells folded into a neighbour on the left
    pub absorbed_columns: usize,
    /// Cells (empties and markers) folded into an anchor above
    pub absorbed_rows: usize,
    /// Logical column count after both passes
    pub column_count: usize,
    /// Any warnings generated during the transform
    pub warnings: Vec<SpanWarning>,
}

impl SpanReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True when every row adds up to the table width
    pub fn is_regular(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| w.kind == SpanWarningKind::IrregularRow)
    }
}
