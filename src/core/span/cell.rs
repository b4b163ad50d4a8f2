//! Cell types and alignment for span processing

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Widest span the layout honours. Wider column spans are clamped when a
/// table is laid out, and rejected when read from JSON.
pub const MAX_SPAN: usize = 1 << 16;

/// Vertical alignment hint carried by a row-spanning cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    /// CSS `vertical-align` keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        }
    }
}

impl fmt::Display for VAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Represents a single table cell with span and alignment info
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// Trimmed cell text
    pub content: String,
    /// Number of columns this cell spans
    #[cfg_attr(feature = "serde", serde(default = "one", deserialize_with = "span"))]
    pub colspan: usize,
    /// Number of rows this cell spans
    #[cfg_attr(feature = "serde", serde(default = "one", deserialize_with = "span"))]
    pub rowspan: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub valign: VAlign,
    /// Whitespace-only in the source (`|   |`). Blank cells keep their
    /// column: they are never folded into a cell on their left, but they
    /// still join a vertical run above a row span marker.
    #[cfg_attr(feature = "serde", serde(default))]
    pub blank: bool,
}

#[cfg(feature = "serde")]
fn one() -> usize {
    1
}

#[cfg(feature = "serde")]
fn span<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = usize::deserialize(deserializer)?;
    if value > MAX_SPAN {
        return Err(serde::de::Error::custom(format!(
            "span {} exceeds the limit of {}",
            value, MAX_SPAN
        )));
    }
    Ok(value.max(1))
}

impl Cell {
    /// Create a new cell with content
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Cell {
            content: content.trim().to_string(),
            colspan: 1,
            rowspan: 1,
            valign: VAlign::Middle,
            blank: false,
        }
    }

    /// Create an empty cell, as produced by a doubled delimiter (`||`)
    pub fn empty() -> Self {
        Cell::new(String::new())
    }

    /// Create a whitespace-only cell that holds its column
    pub fn blank() -> Self {
        Cell {
            blank: true,
            ..Cell::empty()
        }
    }

    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = rowspan.max(1);
        self
    }

    pub fn with_valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Empty text or the configured escape token
    pub fn is_empty(&self, empty_token: &str) -> bool {
        let text = self.content.trim();
        text.is_empty() || text == empty_token
    }

    /// Whether the column-merge pass may fold this cell into its left neighbour
    pub fn is_absorbable(&self, empty_token: &str) -> bool {
        !self.blank && self.is_empty(empty_token)
    }

    /// Attributes an HTML serializer should emit for this cell.
    ///
    /// Spans are only listed when greater than one, and the alignment only
    /// when it is not the default `middle`.
    pub fn html_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();

        if self.colspan > 1 {
            attrs.push(("colspan", self.colspan.to_string()));
        }
        if self.rowspan > 1 {
            attrs.push(("rowspan", self.rowspan.to_string()));
        }
        if self.valign != VAlign::Middle {
            attrs.push(("style", format!("vertical-align: {}", self.valign)));
        }

        attrs
    }
}
