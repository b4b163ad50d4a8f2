//! Row-merge pass
//!
//! Each logical column is scanned top to bottom. The last content cell seen
//! is the candidate anchor; empty cells below it are buffered. A marker
//! closes the run: the anchor grows downwards over the buffered cells and
//! the marker row, and takes the marker's alignment.
//!
//! The whole table is classified before anything is touched, so a
//! conflicting marker leaves the rows exactly as they were.

use fxhash::FxHashSet;

use super::cell::VAlign;
use super::grid::{Layout, Occupant, Table};
use super::marker::{classify_cell, CellKind};
use super::options::SpanOptions;
use crate::utils::error::{SpanError, SpanResult, SpanWarning};

/// Position of a cell as (row, raw index)
pub type CellRef = (usize, usize);

/// One planned row span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMerge {
    pub anchor: CellRef,
    /// Logical column of the anchor
    pub column: usize,
    pub valign: VAlign,
    /// Empty cells followed by the marker, top to bottom
    pub absorbed: Vec<CellRef>,
}

/// Row spans found in a table, not yet applied
#[derive(Debug, Clone, Default)]
pub struct RowPlan {
    pub merges: Vec<RowMerge>,
    /// Markers left in place because nothing above them can be spanned
    pub orphans: Vec<SpanWarning>,
}

impl RowPlan {
    pub fn absorbed_count(&self) -> usize {
        self.merges.iter().map(|m| m.absorbed.len()).sum()
    }
}

/// Per-column scan state
#[derive(Default)]
struct ColumnRun {
    anchor: Option<CellRef>,
    empties: Vec<CellRef>,
}

impl ColumnRun {
    fn reset(&mut self) {
        self.anchor = None;
        self.empties.clear();
    }
}

/// Find every row span in a table without modifying it
pub fn plan_rows(table: &Table, options: &SpanOptions) -> SpanResult<RowPlan> {
    let layout = Layout::of(table);
    let columns = layout.column_count();
    let kinds = classify_all(table, &layout, columns, options)?;
    let mut plan = RowPlan::default();

    for column in 0..columns {
        let mut run = ColumnRun::default();

        for row in 0..layout.row_count() {
            let index = match layout.at(row, column) {
                Occupant::Start(index) => index,
                Occupant::Spanned | Occupant::Vacant => {
                    // Content never flows through a covered or missing position
                    run.reset();
                    continue;
                }
            };

            match kinds[row][index] {
                CellKind::Ordinary => {
                    run.anchor = Some((row, index));
                    run.empties.clear();
                }
                CellKind::Empty => {
                    if run.anchor.is_some() {
                        run.empties.push((row, index));
                    }
                }
                CellKind::Marker(valign) => {
                    match run.anchor {
                        Some(anchor) => {
                            let mut absorbed = std::mem::take(&mut run.empties);
                            absorbed.push((row, index));
                            plan.merges.push(RowMerge {
                                anchor,
                                column,
                                valign,
                                absorbed,
                            });
                        }
                        None => {
                            let marker = &table.rows[row].cells[index].content;
                            tracing::debug!(row, column, %marker, "marker has no anchor above");
                            plan.orphans
                                .push(SpanWarning::orphan_marker(row, column, marker));
                        }
                    }
                    run.reset();
                }
                CellKind::InvalidMarker => {
                    let marker = table.rows[row].cells[index].content.clone();
                    return Err(SpanError::conflict(row, column, marker));
                }
            }
        }
    }

    Ok(plan)
}

/// Apply a plan: grow anchors, then splice absorbed cells out of their rows
pub fn apply_rows(table: &mut Table, plan: &RowPlan) -> usize {
    let mut removed: FxHashSet<CellRef> = FxHashSet::default();

    for merge in &plan.merges {
        let (row, index) = merge.anchor;
        let Some(anchor) = table
            .rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(index))
        else {
            continue;
        };

        anchor.rowspan = anchor.rowspan.saturating_add(merge.absorbed.len());
        if merge.valign != VAlign::Middle {
            anchor.valign = merge.valign;
        }
        tracing::debug!(
            row,
            column = merge.column,
            rowspan = anchor.rowspan,
            valign = %anchor.valign,
            "spanned cell downwards"
        );

        removed.extend(merge.absorbed.iter().copied());
    }

    for (row_index, row) in table.rows.iter_mut().enumerate() {
        let mut index = 0;
        row.cells.retain(|_| {
            let keep = !removed.contains(&(row_index, index));
            index += 1;
            keep
        });
    }

    removed.len()
}

/// Merge vertical runs of empty cells ending in a marker into the cell above.
///
/// Returns the number of cells removed (empties plus markers).
pub fn merge_rows(table: &mut Table, options: &SpanOptions) -> SpanResult<usize> {
    let plan = plan_rows(table, options)?;
    Ok(apply_rows(table, &plan))
}

/// Classify every cell by raw index, failing on the first conflicting marker
fn classify_all(
    table: &Table,
    layout: &Layout,
    columns: usize,
    options: &SpanOptions,
) -> SpanResult<Vec<Vec<CellKind>>> {
    let token = options.empty_token.as_str();
    let mut kinds: Vec<Vec<CellKind>> = table
        .rows
        .iter()
        .map(|r| vec![CellKind::Ordinary; r.cells.len()])
        .collect();

    for (row_index, row) in table.rows.iter().enumerate() {
        for column in 0..columns {
            if let Occupant::Start(index) = layout.at(row_index, column) {
                let kind = classify_cell(&row.cells[index], row_index, column, token)?;
                tracing::trace!(row = row_index, column, ?kind, "classified cell");
                kinds[row_index][index] = kind;
            }
        }
    }

    Ok(kinds)
}
