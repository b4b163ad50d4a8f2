//! Pipe table front end
//!
//! A minimal tokenizer for pipe tables written the way the span syntax
//! expects them:
//!
//! ```text
//! | Column 1 | Col 2 | Big row span   |
//! |:--------:|-------| -------------- |
//! | spans two cols  || One large cell |
//! | r2_c1    | r2_c2 |                |
//! |_^       _| r3_c2 |_              _|
//! ```
//!
//! A doubled delimiter (`||`) yields an empty cell that folds into its left
//! neighbour. A whitespace-only cell (`|   |`) is kept as a blank cell and
//! only takes part in row spans.

mod html;

pub use html::render_html;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::span::{span_table_with_options, Cell, Row, SpanOptions, Table};
use crate::utils::error::{SpanError, SpanReport, SpanResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

lazy_static! {
    /// One cell of the header/body delimiter row
    static ref DELIMITER_CELL: Regex = Regex::new(r"^:?-+:?$").unwrap();
}

/// Column alignment from the delimiter row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
    #[default]
    Auto,
}

impl ColumnAlign {
    /// Parse a delimiter cell such as `:---:`
    pub fn from_delimiter(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if !DELIMITER_CELL.is_match(cell) {
            return None;
        }
        Some(match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => ColumnAlign::Center,
            (false, true) => ColumnAlign::Right,
            (true, false) => ColumnAlign::Left,
            (false, false) => ColumnAlign::Auto,
        })
    }

    /// CSS `text-align` keyword, `None` for the default
    pub fn as_css(&self) -> Option<&'static str> {
        match self {
            ColumnAlign::Left => Some("left"),
            ColumnAlign::Center => Some("center"),
            ColumnAlign::Right => Some("right"),
            ColumnAlign::Auto => None,
        }
    }
}

/// A tokenized pipe table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipeTable {
    pub header: Row,
    pub alignments: Vec<ColumnAlign>,
    /// Body rows, the part the span passes rewrite
    pub body: Table,
}

/// A pipe table after spanning, with what the transform reported
#[derive(Debug, Clone)]
pub struct SpannedTable {
    pub table: PipeTable,
    pub report: SpanReport,
}

/// Split one table line into cells
pub fn split_cells(line: &str) -> Vec<Cell> {
    let line = line.trim();
    let mut body = line.strip_prefix('|').unwrap_or(line);
    if body.ends_with('|') && !body.ends_with("\\|") {
        body = &body[..body.len() - 1];
    }

    let mut segments: Vec<String> = vec![String::new()];
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                if let Some(s) = segments.last_mut() {
                    s.push('|');
                }
            }
            '|' => segments.push(String::new()),
            _ => {
                if let Some(s) = segments.last_mut() {
                    s.push(ch);
                }
            }
        }
    }

    segments
        .into_iter()
        .map(|segment| {
            if segment.is_empty() {
                Cell::empty()
            } else if segment.trim().is_empty() {
                Cell::blank()
            } else {
                Cell::new(segment)
            }
        })
        .collect()
}

/// True if the line is a header/body delimiter row
pub fn is_delimiter_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty()
        && cells
            .iter()
            .all(|c| ColumnAlign::from_delimiter(&c.content).is_some())
}

/// Tokenize a single pipe table
pub fn parse_pipe_table(text: &str) -> SpanResult<PipeTable> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    if lines.len() < 2 {
        return Err(SpanError::parse_at(
            "a table needs a header row and a delimiter row",
            lines.len() + 1,
        ));
    }

    let header = Row::from(split_cells(lines[0]));

    let mut alignments = Vec::new();
    for cell in split_cells(lines[1]) {
        match ColumnAlign::from_delimiter(&cell.content) {
            Some(align) => alignments.push(align),
            None => {
                return Err(SpanError::parse_at(
                    format!("'{}' is not a delimiter cell", cell.content),
                    2,
                ))
            }
        }
    }

    if alignments.len() != header.cells.len() {
        return Err(SpanError::parse_at(
            format!(
                "delimiter row has {} cell(s), header has {}",
                alignments.len(),
                header.cells.len()
            ),
            2,
        ));
    }

    let body = Table::new(
        lines[2..]
            .iter()
            .map(|line| Row::from(split_cells(line)))
            .collect(),
    );

    Ok(PipeTable {
        header,
        alignments,
        body,
    })
}

/// Split a document into blank-line separated blocks that look like tables.
///
/// Returns the 1-based line number each block starts on with its text.
pub fn split_tables(document: &str) -> Vec<(usize, String)> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut start = 0;

    for (number, line) in document.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push((start, current.join("\n")));
                current.clear();
            }
            continue;
        }
        if current.is_empty() {
            start = number + 1;
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push((start, current.join("\n")));
    }

    blocks
        .into_iter()
        .filter(|(line, block)| {
            let is_table = block.lines().nth(1).is_some_and(is_delimiter_row);
            if !is_table {
                tracing::trace!(line, "skipping block without a delimiter row");
            }
            is_table
        })
        .collect()
}

/// Tokenize and span every table in a document.
///
/// Tables are independent: each body is spanned on its own and the first
/// failing table aborts with its 1-based number attached.
pub fn span_markdown(document: &str, options: &SpanOptions) -> SpanResult<Vec<SpannedTable>> {
    let mut spanned = Vec::new();

    for (index, (line, block)) in split_tables(document).into_iter().enumerate() {
        let number = index + 1;
        let mut table = parse_pipe_table(&block).map_err(|e| e.in_table(number))?;
        let report = span_table_with_options(&mut table.body, options)
            .map_err(|e| e.in_table(number))?;

        tracing::debug!(
            table = number,
            line,
            columns = report.absorbed_columns,
            rows = report.absorbed_rows,
            "spanned table"
        );

        spanned.push(SpannedTable { table, report });
    }

    Ok(spanned)
}
