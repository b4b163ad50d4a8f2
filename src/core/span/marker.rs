//! Row span marker recognition
//!
//! A marker is a cell such as `_^  _`: it starts and ends with an
//! underscore and holds nothing but spaces, underscores, `^` (align top)
//! and `=` (align bottom). Classification is a single character scan.

use super::cell::{Cell, VAlign};
use crate::utils::error::{SpanError, SpanResult};

/// Classification of a cell's trimmed content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Content-bearing cell
    Ordinary,
    /// Empty text or the escape token
    Empty,
    /// Row span marker with the alignment it requests
    Marker(VAlign),
    /// Marker holding both `^` and `=`
    InvalidMarker,
}

/// Classify trimmed cell text
pub fn classify(text: &str, empty_token: &str) -> CellKind {
    let text = text.trim();
    if text.is_empty() || text == empty_token {
        return CellKind::Empty;
    }
    if !text.starts_with('_') || !text.ends_with('_') || text.len() < 2 {
        return CellKind::Ordinary;
    }

    let mut top = false;
    let mut bottom = false;
    for ch in text.chars() {
        match ch {
            '_' | ' ' => {}
            '^' => top = true,
            '=' => bottom = true,
            _ => return CellKind::Ordinary,
        }
    }

    match (top, bottom) {
        (true, true) => CellKind::InvalidMarker,
        (true, false) => CellKind::Marker(VAlign::Top),
        (false, true) => CellKind::Marker(VAlign::Bottom),
        (false, false) => CellKind::Marker(VAlign::Middle),
    }
}

/// Classify a cell at a grid position, turning a conflicting marker into an error
pub fn classify_cell(
    cell: &Cell,
    row: usize,
    column: usize,
    empty_token: &str,
) -> SpanResult<CellKind> {
    match classify(&cell.content, empty_token) {
        CellKind::InvalidMarker => Err(SpanError::conflict(row, column, cell.content.clone())),
        kind => Ok(kind),
    }
}

/// True if the text would be taken as a row span marker (valid or not)
pub fn looks_like_marker(text: &str) -> bool {
    matches!(
        classify(text, ""),
        CellKind::Marker(_) | CellKind::InvalidMarker
    )
}
