//! HTML output for spanned pipe tables

use std::fmt::Write;

use super::{ColumnAlign, PipeTable};
use crate::core::span::{Cell, Layout};

/// Opening tag with span, alignment and vertical alignment attributes
fn open_tag(tag: &str, cell: &Cell, align: ColumnAlign) -> String {
    let mut attrs = Vec::new();
    let mut style = Vec::new();

    if let Some(text_align) = align.as_css() {
        style.push(format!("text-align: {}", text_align));
    }
    for (name, value) in cell.html_attributes() {
        if name == "style" {
            style.push(value);
        } else {
            attrs.push(format!("{}=\"{}\"", name, value));
        }
    }
    if !style.is_empty() {
        attrs.push(format!("style=\"{}\"", style.join("; ")));
    }

    if attrs.is_empty() {
        format!("<{}>", tag)
    } else {
        format!("<{} {}>", tag, attrs.join(" "))
    }
}

/// Render a pipe table as an HTML `<table>`.
///
/// Cell text is written verbatim; inline markup is left to the host
/// renderer. A table without header cells gets no `<thead>`. Rows emptied
/// by row spans are kept as `<tr></tr>` so that rowspan counts stay valid.
pub fn render_html(table: &PipeTable) -> String {
    let mut output = String::new();
    let align_at = |column: Option<usize>| {
        column
            .and_then(|c| table.alignments.get(c).copied())
            .unwrap_or_default()
    };

    let _ = writeln!(output, "<table>");
    if !table.header.cells.is_empty() {
        let _ = writeln!(output, "<thead>");
        let _ = writeln!(output, "<tr>");
        let mut column: usize = 0;
        for cell in &table.header.cells {
            let _ = writeln!(
                output,
                "{}{}</th>",
                open_tag("th", cell, align_at(Some(column))),
                cell.content
            );
            column = column.saturating_add(cell.colspan);
        }
        let _ = writeln!(output, "</tr>");
        let _ = writeln!(output, "</thead>");
    }

    let layout = Layout::of(&table.body);
    let _ = writeln!(output, "<tbody>");
    for (row_index, row) in table.body.rows.iter().enumerate() {
        let _ = writeln!(output, "<tr>");
        for (index, cell) in row.cells.iter().enumerate() {
            let align = align_at(layout.column_of(row_index, index));
            let _ = writeln!(output, "{}{}</td>", open_tag("td", cell, align), cell.content);
        }
        let _ = writeln!(output, "</tr>");
    }
    let _ = writeln!(output, "</tbody>");
    output.push_str("</table>\n");

    output
}
