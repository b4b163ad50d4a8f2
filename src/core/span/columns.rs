//! Column-merge pass

use super::cell::Cell;
use super::grid::Table;
use super::options::SpanOptions;

/// Fold empty cells into the nearest content cell on their left.
///
/// Each absorbed cell widens its anchor by its own colspan and is dropped
/// from the row. An empty cell with nothing to its left stays where it is.
/// Returns the number of cells absorbed.
pub fn merge_columns(table: &mut Table, options: &SpanOptions) -> usize {
    let token = options.empty_token.as_str();
    let mut absorbed = 0;

    for (row_index, row) in table.rows.iter_mut().enumerate() {
        let mut kept: Vec<Cell> = Vec::with_capacity(row.cells.len());
        let mut anchored = false;

        for cell in row.cells.drain(..) {
            if anchored && cell.is_absorbable(token) {
                if let Some(anchor) = kept.last_mut() {
                    anchor.colspan = anchor.colspan.saturating_add(cell.colspan.max(1));
                    absorbed += 1;
                    tracing::debug!(
                        row = row_index,
                        anchor = %anchor.content,
                        colspan = anchor.colspan,
                        "absorbed empty cell into left neighbour"
                    );
                    continue;
                }
            }

            if !cell.is_absorbable(token) {
                anchored = true;
            }
            kept.push(cell);
        }

        row.cells = kept;
    }

    absorbed
}
