//! Table diagnostics
//!
//! Dry-runs the span passes on a copy of a table and reports what the
//! transform would trip over:
//!
//! - Markers carrying both `^` and `=` (errors)
//! - Rows that do not add up to the table width (warnings)
//! - Markers with nothing above them to span (notes)
//!
//! ## Example
//!
//! ```rust
//! use cellspan::diagnostics::check_table;
//! use cellspan::span::{SpanOptions, Table};
//!
//! let table = Table::from_text([["A"], ["_^=_"]]);
//! let result = check_table(&table, &SpanOptions::default());
//! assert!(result.has_errors());
//! ```

use std::fmt::{self, Write};

use crate::core::pipe::{parse_pipe_table, split_tables};
use crate::core::span::{apply_rows, merge_columns, plan_rows, SpanOptions, Table};
use crate::utils::error::{SpanError, SpanWarning, SpanWarningKind};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output is produced but probably not what was meant
    Warning,
    /// Error - the table cannot be spanned
    Error,
}

impl DiagnosticLevel {
    /// ANSI colour for this level's label
    fn ansi(self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "\x1b[34m",
            DiagnosticLevel::Warning => "\x1b[33m",
            DiagnosticLevel::Error => "\x1b[31m",
        }
    }
}

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Table number in the document (1-indexed)
    pub table: Option<usize>,
    /// Body row (1-indexed)
    pub row: Option<usize>,
    /// Logical column (1-indexed)
    pub column: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            table: None,
            row: None,
            column: None,
            suggestion: None,
        }
    }

    /// Add location information from 0-based row/column indices
    pub fn at(mut self, row: usize, column: Option<usize>) -> Self {
        self.row = Some(row + 1);
        self.column = column.map(|c| c + 1);
        self
    }

    pub fn in_table(mut self, table: usize) -> Self {
        self.table = Some(table);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&SpanWarning> for Diagnostic {
    fn from(warning: &SpanWarning) -> Self {
        let diag = match warning.kind {
            SpanWarningKind::IrregularRow => {
                Diagnostic::new(DiagnosticLevel::Warning, warning.message.clone())
                    .with_suggestion("check for one '|' too many or too few in this row")
            }
            SpanWarningKind::OrphanMarker => {
                Diagnostic::new(DiagnosticLevel::Info, warning.message.clone()).with_suggestion(
                    "add text such as '&#20;' if the underscores are meant as content",
                )
            }
        };
        diag.at(warning.row, warning.column)
    }
}

impl Diagnostic {
    /// `table 1, row 3, column 2`, or `None` when nothing is known
    pub fn location(&self) -> Option<String> {
        let fields = [("table", self.table), ("row", self.row), ("column", self.column)];
        let parts: Vec<String> = fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{} {}", name, v)))
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Location and help lines that follow the headline
    fn write_detail(&self, out: &mut impl Write) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(out, "\n  --> {}", location)?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(out, "\n  = help: {}", suggestion)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // error: message
        //   --> table 1, row 3, column 2
        //   = help: suggestion
        write!(f, "{}: {}", self.level, self.message)?;
        self.write_detail(f)
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn merge_from(&mut self, other: CheckResult, table: usize) {
        for diag in other.diagnostics {
            self.add(diag.in_table(table));
        }
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a table body without modifying it
pub fn check_table(table: &Table, options: &SpanOptions) -> CheckResult {
    let mut result = CheckResult::new();
    let mut scratch = table.clone();
    merge_columns(&mut scratch, options);

    match plan_rows(&scratch, options) {
        Ok(plan) => {
            for orphan in &plan.orphans {
                result.add(Diagnostic::from(orphan));
            }
            apply_rows(&mut scratch, &plan);
        }
        Err(SpanError::MarkerConflict {
            row,
            column,
            marker,
        }) => {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("row span marker '{}' asks for both top and bottom", marker),
                )
                .at(row, Some(column))
                .with_suggestion("keep either '^' (top) or '=' (bottom)"),
            );
        }
        Err(other) => {
            result.add(Diagnostic::new(DiagnosticLevel::Error, other.to_string()));
        }
    }

    let widths = scratch.row_widths();
    let expected = widths.iter().copied().max().unwrap_or(0);
    for (row, &actual) in widths.iter().enumerate() {
        if actual != expected {
            result.add(Diagnostic::from(&SpanWarning::irregular_row(
                row, expected, actual,
            )));
        }
    }

    result
}

/// Check every pipe table in a document
pub fn check_markdown(document: &str, options: &SpanOptions) -> CheckResult {
    let mut result = CheckResult::new();

    for (index, (line, block)) in split_tables(document).into_iter().enumerate() {
        let number = index + 1;
        match parse_pipe_table(&block) {
            Ok(table) => result.merge_from(check_table(&table.body, options), number),
            Err(err) => {
                let message = match err {
                    SpanError::Parse { line: offset, message } => {
                        format!("line {}: {}", line + offset - 1, message)
                    }
                    other => other.to_string(),
                };
                result.add(Diagnostic::new(DiagnosticLevel::Error, message).in_table(number));
            }
        }
    }

    result
}

/// Format check results for terminal output.
///
/// With colour on, only the level label and the summary line are painted.
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let paint = |text: &str, code: &str| {
        if use_color {
            format!("{}{}{}", code, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    };
    let mut output = String::new();

    for diag in &result.diagnostics {
        let label = paint(&diag.level.to_string(), diag.level.ansi());
        let _ = write!(output, "{}: {}", label, diag.message);
        let _ = diag.write_detail(&mut output);
        output.push_str("\n\n");
    }

    let summary_color = match result.diagnostics.iter().map(|d| d.level).max() {
        Some(level) if level > DiagnosticLevel::Info => level.ansi(),
        _ => ANSI_GREEN,
    };
    let summary = format!("Summary: {}", result.summary());
    output.push_str(&paint(&summary, summary_color));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_table() {
        let table = Table::from_text([["A", "B"], ["", "x"], ["__", "y"]]);
        let result = check_table(&table, &SpanOptions::default());
        assert!(result.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_conflict_is_error() {
        let table = Table::from_text([["A"], [""], ["_^=_"]]);
        let result = check_table(&table, &SpanOptions::default());
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].row, Some(3));
        assert_eq!(result.diagnostics[0].column, Some(1));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let table = Table::from_text([["A", ""], ["", "x"], ["_^_", "y"]]);
        let before = table.clone();
        check_table(&table, &SpanOptions::default());
        assert_eq!(table, before);
    }

    #[test]
    fn test_irregular_and_orphan() {
        let table = Table::from_text(vec![vec!["__", "b", "c"], vec!["d", "e"]]);
        let result = check_table(&table, &SpanOptions::default());
        assert_eq!(result.errors, 0);
        assert_eq!(result.warnings, 1);
        assert_eq!(result.infos, 1);
        assert_eq!(result.summary(), "1 warning, 1 note");
    }

    #[test]
    fn test_check_markdown_numbers_tables() {
        let doc = "| a |\n|---|\n| x |\n\n| b | c |\n|---|\n| y | z |";
        let result = check_markdown(doc, &SpanOptions::default());
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].table, Some(2));
        assert!(result.diagnostics[0].message.contains("line 6"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(DiagnosticLevel::Warning, "row spans 2 column(s), expected 3")
            .at(1, None)
            .in_table(1)
            .with_suggestion("check the row");
        let text = diag.to_string();
        assert!(text.starts_with("warning: row spans"));
        assert!(text.contains("--> table 1, row 2"));
        assert!(text.contains("= help: check the row"));
    }

    #[test]
    fn test_format_without_color() {
        let table = Table::from_text([["A"], ["_=^_"]]);
        let result = check_table(&table, &SpanOptions::default());
        let output = format_diagnostics(&result, false);
        assert!(output.contains("error: row span marker '_=^_'"));
        assert!(output.ends_with("Summary: 1 error"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_format_with_color_paints_labels() {
        let table = Table::from_text(vec![vec!["__", "b"], vec!["c"]]);
        let result = check_table(&table, &SpanOptions::default());
        let output = format_diagnostics(&result, true);

        assert!(output.contains("\x1b[33mwarning\x1b[0m: row spans 1 column(s), expected 2"));
        assert!(output.contains("\x1b[34minfo\x1b[0m: "));
        assert!(output.ends_with("\x1b[33mSummary: 1 warning, 1 note\x1b[0m"));
    }

    #[test]
    fn test_location() {
        let diag = Diagnostic::new(DiagnosticLevel::Info, "x");
        assert_eq!(diag.location(), None);
        assert_eq!(
            diag.at(0, Some(4)).location().as_deref(),
            Some("row 1, column 5")
        );
    }
}
