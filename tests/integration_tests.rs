//! Integration tests for cellspan table spanning

use cellspan::{
    diagnostics::check_markdown, markdown_to_html, span_markdown, span_table,
    span_table_with_options, Cell, SpanError, SpanOptions, SpanWarningKind, Table, VAlign,
};
use pretty_assertions::assert_eq;

const README_TABLE: &str = "\
| Column 1                | Col 2 | Big row span   |
|:-----------------------:|-------| -------------- |
| r1_c1 spans two cols           || One large cell |
| r2_c1 spans two rows    | r2_c2 |                |
|_^                      _| r3_c2 |                |
|    ______ &#20;         | r4_c2 |_              _|
";

// ============================================================================
// Documents
// ============================================================================

mod documents {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_readme_table_html() {
        let html = markdown_to_html(README_TABLE).unwrap();

        assert!(html.contains(
            "<td colspan=\"2\" style=\"text-align: center\">r1_c1 spans two cols</td>"
        ));
        assert!(html.contains("<td rowspan=\"4\">One large cell</td>"));
        assert!(html.contains(
            "<td rowspan=\"2\" style=\"text-align: center; vertical-align: top\">r2_c1 spans two rows</td>"
        ));
        assert!(html.contains("______ &#20;</td>"));
        // Markers never reach the output
        assert!(!html.contains("_^"));
        assert_eq!(html.matches("<td").count(), 7);
    }

    #[test]
    fn test_readme_table_report() {
        let spanned = span_markdown(README_TABLE, &SpanOptions::default()).unwrap();
        let report = &spanned[0].report;
        assert_eq!(report.absorbed_columns, 1);
        assert_eq!(report.absorbed_rows, 4);
        assert_eq!(report.column_count, 3);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_escape_token_matches_doubled_delimiter() {
        let doubled = "| a | b | c |\n|---|---|---|\n| x || y |";
        let escaped = "| a | b | c |\n|---|---|---|\n| x |~~| y |";
        assert_eq!(
            markdown_to_html(doubled).unwrap(),
            markdown_to_html(escaped).unwrap()
        );
    }

    #[test]
    fn test_plain_document_is_untouched() {
        let doc = "| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |";
        let spanned = span_markdown(doc, &SpanOptions::default()).unwrap();
        assert_eq!(
            spanned[0].table.body,
            Table::from_text([["1", "2"], ["3", "4"]])
        );
        assert_eq!(spanned[0].report.absorbed_columns, 0);
        assert_eq!(spanned[0].report.absorbed_rows, 0);
    }

    #[test]
    fn test_document_without_tables() {
        let spanned = span_markdown("just | some prose\n\nand more", &SpanOptions::default());
        assert!(spanned.unwrap().is_empty());
        assert_eq!(markdown_to_html("").unwrap(), "");
    }

    #[test]
    fn test_check_reports_conflict_location() {
        let doc = "| a | b |\n|---|---|\n| x | y |\n|   | z |\n| _=^_ | w |";
        let result = check_markdown(doc, &SpanOptions::default());
        assert!(result.has_errors());
        let diag = &result.diagnostics[0];
        assert_eq!((diag.table, diag.row, diag.column), (Some(1), Some(3), Some(1)));
    }
}

// ============================================================================
// Tokenized tables
// ============================================================================

mod tables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spanning_is_idempotent() {
        let mut table = Table::from_text([
            ["A", "", "B"],
            ["C", "D", ""],
            ["", "E", "__"],
            ["_=_", "F", "G"],
        ]);
        span_table(&mut table).unwrap();
        let once = table.clone();

        let report = span_table(&mut table).unwrap();
        assert_eq!(table, once);
        assert_eq!(report.absorbed_columns, 0);
        assert_eq!(report.absorbed_rows, 0);
    }

    #[test]
    fn test_bottom_aligned_span() {
        let mut table = Table::from_text([["A", "x"], ["", "y"], ["_=_", "z"]]);
        span_table(&mut table).unwrap();
        assert_eq!(
            table.rows[0].cells[0],
            Cell::new("A").with_rowspan(3).with_valign(VAlign::Bottom)
        );
        assert_eq!(table.rows[2].cells, vec![Cell::new("z")]);
    }

    #[test]
    fn test_conflict_leaves_rows_alone() {
        let mut table = Table::from_text([["A", ""], ["", "x"], ["_^=_", "y"]]);
        let err = span_table(&mut table).unwrap_err();
        assert!(matches!(err, SpanError::MarkerConflict { row: 2, column: 0, .. }));
        // The column pass already ran, the row pass did not
        assert_eq!(table.rows[0].cells, vec![Cell::new("A").with_colspan(2)]);
        assert_eq!(table.rows[2].cells[0].content, "_^=_");
    }

    #[test]
    fn test_orphan_marker_is_kept_as_text() {
        let mut table = Table::from_text([["_^_", "b"], ["c", "d"]]);
        let report = span_table(&mut table).unwrap();
        assert_eq!(table.rows[0].cells[0], Cell::new("_^_"));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, SpanWarningKind::OrphanMarker);
    }

    #[test]
    fn test_strict_rejects_ragged_rows() {
        let mut table = Table::from_text(vec![vec!["a", "b"], vec!["c"]]);
        let err = span_table_with_options(&mut table, &SpanOptions::strict()).unwrap_err();
        assert!(matches!(err, SpanError::IrregularRow { row: 1, .. }));
    }

    #[test]
    fn test_custom_token() {
        let options = SpanOptions::new().with_empty_token("--").unwrap();
        let mut table = Table::from_text([["A", "--", "B"], ["C", "D", "E"]]);
        span_table_with_options(&mut table, &options).unwrap();
        assert_eq!(
            table.rows[0].cells,
            vec![Cell::new("A").with_colspan(2), Cell::new("B")]
        );
    }
}

// ============================================================================
// JSON grids
// ============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use cellspan::{table_from_json, table_to_json};

    #[test]
    fn test_json_grid_spans() {
        let mut table = table_from_json(
            r#"[
                [{"content": "A"}, {"content": "B"}],
                [{"content": ""},  {"content": "C"}],
                [{"content": "_^_"}, {"content": "D"}]
            ]"#,
        )
        .unwrap();
        span_table(&mut table).unwrap();

        let json = table_to_json(&table);
        assert!(json.contains("\"rowspan\": 3"));
        assert!(json.contains("\"valign\": \"top\""));
        assert!(!json.contains("_^_"));
    }
}
