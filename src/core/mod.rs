//! Core span modules
//!
//! This module contains the table rewriting engine and its front end:
//! - `span`: column-merge and row-merge passes over a cell grid
//! - `pipe`: pipe table tokenizer and HTML output

pub mod pipe;
pub mod span;

// Re-export main types and functions from span
pub use span::{
    merge_columns, merge_rows, span_table, span_table_with_options, Cell, Row, SpanOptions,
    Table, VAlign, DEFAULT_EMPTY_TOKEN,
};

// Re-export main types and functions from pipe
pub use pipe::{parse_pipe_table, render_html, span_markdown, ColumnAlign, PipeTable, SpannedTable};
