//! Span transform options

use super::marker::looks_like_marker;
use crate::utils::error::{SpanError, SpanResult};

/// Cell text treated exactly like an empty cell.
///
/// Some tokenizers drop the empty cell of a doubled delimiter (`||`);
/// writing `|~~|` instead produces a cell this crate folds the same way.
pub const DEFAULT_EMPTY_TOKEN: &str = "~~";

/// Options for the column and row merge passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanOptions {
    /// Escape token equivalent to an empty cell
    /// Default: `~~`
    pub empty_token: String,

    /// Fail when a row does not add up to the table width after merging
    /// Default: false (irregular rows are only reported as warnings)
    pub strict: bool,
}

impl Default for SpanOptions {
    fn default() -> Self {
        Self {
            empty_token: DEFAULT_EMPTY_TOKEN.to_string(),
            strict: false,
        }
    }
}

impl SpanOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict mode options (errors on irregular rows)
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Replace the escape token.
    ///
    /// The token must be non-blank, must not contain a column delimiter and
    /// must not read as a row span marker.
    pub fn with_empty_token(mut self, token: impl Into<String>) -> SpanResult<Self> {
        let token = token.into().trim().to_string();

        if token.is_empty() {
            return Err(SpanError::invalid("empty-cell token cannot be blank"));
        }
        if token.contains('|') {
            return Err(SpanError::invalid(format!(
                "empty-cell token '{}' cannot contain '|'",
                token
            )));
        }
        if looks_like_marker(&token) {
            return Err(SpanError::invalid(format!(
                "empty-cell token '{}' would be read as a row span marker",
                token
            )));
        }

        self.empty_token = token;
        Ok(self)
    }
}
