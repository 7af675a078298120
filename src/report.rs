// src/report.rs

//! Static HTML report rendering.
//!
//! The document is a single self-contained page: one table row per submitter
//! with client-side sorting provided by DataTables. Count cells use the literal
//! format `"{accepted} of {submitted}"`, which the embedded sort type parses.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Submission, Submitter, SubmitterStats};
use crate::services::SubmissionIndex;

const BOOTSTRAP_CSS: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css";
const DATATABLES_CSS: &str = "https://cdn.datatables.net/2.2.1/css/dataTables.dataTables.min.css";
const JQUERY_JS: &str = "https://code.jquery.com/jquery-1.12.4.min.js";
const JQUERY_INTEGRITY: &str = "sha256-ZosEbRLbNQzLpnKIkEdrPv7lOy9C27hHQ+Xp8a4MxAQ=";
const DATATABLES_JS: &str = "https://cdn.datatables.net/2.2.1/js/dataTables.min.js";
const DATATABLES_RESPONSIVE_JS: &str =
    "https://cdn.datatables.net/responsive/3.0.3/js/dataTables.responsive.min.js";

/// Column headers, in display order.
pub const COLUMNS: [&str; 5] = [
    "Last Name",
    "First Name",
    "Country",
    "Accepted Problems",
    "Accepted Solutions",
];

/// Sorts "A of S" cells by submitted count, then accepted count.
const TABLE_SCRIPT: &str = r#"
DataTable.type('submissions', {
    order: {
        pre: function (data) {
            return data.split(" of ").map(num => Number(num));
        },
        desc: function (a, b) {
            if (a[1] == b[1]) {
                return a[0] - b[0];
            }
            return a[1] - b[1];
        },
        asc: function (a, b) {
            if (a[1] == b[1]) {
                return b[0] - a[0];
            }
            return b[1] - a[1];
        }
    },
    className: 'dt-data-submissions'
});

$(document).ready(function() {
    $('#submitters-table').DataTable({
        "paging": false,
        "responsive": true,
        "columns": [
            null,
            null,
            null,
            {'type': 'submissions'},
            {'type': 'submissions'},
        ]
    });
});
"#;

/// One submitter's row in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub submitter: Submitter,
    pub stats: SubmitterStats,
    pub solution_numbers: Vec<u64>,
}

/// Everything the renderer needs for one snapshot.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub submission_count: usize,
    pub rows: Vec<ReportRow>,
}

impl ReportData {
    /// Aggregate statistics for every submitter, keeping submitter order.
    pub fn build(
        title: impl Into<String>,
        generated_at: DateTime<Utc>,
        submissions: &[Submission],
        submitters: &[Submitter],
    ) -> Self {
        let index = SubmissionIndex::new(submissions);
        let rows = submitters
            .iter()
            .map(|submitter| ReportRow {
                submitter: submitter.clone(),
                stats: index.stats_for(&submitter.id),
                solution_numbers: index.solution_numbers(&submitter.id),
            })
            .collect();

        Self {
            title: title.into(),
            generated_at,
            submission_count: submissions.len(),
            rows,
        }
    }
}

/// Render the report as a complete HTML document.
pub fn render_report(data: &ReportData) -> Result<String> {
    let mut html = String::with_capacity(4096 + data.rows.len() * 256);
    write_document(&mut html, data)?;
    Ok(html)
}

fn write_document<W: Write>(out: &mut W, data: &ReportData) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(
        out,
        r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8">"#
    )?;
    writeln!(out, "<title>{}</title>", escape_html(&data.title))?;
    writeln!(out, r#"<link rel="stylesheet" href="{BOOTSTRAP_CSS}">"#)?;
    writeln!(out, r#"<link rel="stylesheet" href="{DATATABLES_CSS}">"#)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, r#"<div style="padding: 20px 30px 0px 30px;">"#)?;
    writeln!(
        out,
        r#"<table id="submitters-table" class="table table-striped table-bordered" cellspacing="0" width="100%">"#
    )?;

    writeln!(out, "<thead>")?;
    write!(out, "<tr>")?;
    for column in COLUMNS {
        write!(out, "<td>{column}</td>")?;
    }
    writeln!(out, "</tr>")?;
    writeln!(out, "</thead>")?;

    writeln!(out, "<tbody>")?;
    for row in &data.rows {
        write_row(out, row)?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;

    writeln!(
        out,
        r#"<p class="text-muted">Generated {} from {} submissions by {} submitters.</p>"#,
        data.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        data.submission_count,
        data.rows.len()
    )?;
    writeln!(out, "</div>")?;

    writeln!(
        out,
        r#"<script src="{JQUERY_JS}" integrity="{JQUERY_INTEGRITY}" crossorigin="anonymous"></script>"#
    )?;
    writeln!(
        out,
        r#"<script type="text/javascript" src="{DATATABLES_JS}"></script>"#
    )?;
    writeln!(
        out,
        r#"<script type="text/javascript" src="{DATATABLES_RESPONSIVE_JS}"></script>"#
    )?;
    writeln!(out, "<script>{TABLE_SCRIPT}</script>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_row<W: Write>(out: &mut W, row: &ReportRow) -> std::fmt::Result {
    let numbers = row
        .solution_numbers
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");

    writeln!(
        out,
        r#"<tr data-submitter-id="{}" data-solution-numbers="{}">"#,
        escape_html(&row.submitter.id),
        numbers
    )?;
    writeln!(out, "<td>{}</td>", escape_html(&row.submitter.last_name))?;
    writeln!(out, "<td>{}</td>", escape_html(&row.submitter.first_name))?;
    writeln!(
        out,
        "<td>{}</td>",
        escape_html(&row.submitter.country_with_code())
    )?;
    writeln!(out, "<td>{}</td>", row.stats.problems_label())?;
    writeln!(out, "<td>{}</td>", row.stats.solutions_label())?;
    writeln!(out, "</tr>")
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use scraper::{Html, Selector};

    use super::*;

    fn submitter(id: &str, first: &str, last: &str, country: Option<(&str, &str)>) -> Submitter {
        let mut submitter = Submitter::unknown(id);
        submitter.first_name = first.to_string();
        submitter.last_name = last.to_string();
        if let Some((name, code)) = country {
            submitter.country_name = name.to_string();
            submitter.country_code = code.to_string();
        }
        submitter
    }

    fn submission(id: &str, submitter: &str, project: &str, status: &str) -> Submission {
        Submission {
            id: id.to_string(),
            status: status.to_string(),
            submitter_id: submitter.to_string(),
            project_name: project.to_string(),
        }
    }

    fn sample_data() -> ReportData {
        let submissions = vec![
            submission("a", "u1", "Open Problem", "accepted"),
            submission("b", "u1", "Problem 12", "accepted"),
            submission("c", "u1", "Problem 13", "rejected"),
            submission("d", "u2", "Another Problem", "rejected"),
        ];
        let submitters = vec![
            submitter("u1", "Emmy", "Noether", Some(("Germany", "DE"))),
            submitter("u2", "Bob", "<script>", None),
        ];
        let generated_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        ReportData::build("Viewer", generated_at, &submissions, &submitters)
    }

    fn cells(document: &Html) -> Vec<Vec<String>> {
        let row_sel = Selector::parse("#submitters-table tbody tr").unwrap();
        let cell_sel = Selector::parse("td").unwrap();
        document
            .select(&row_sel)
            .map(|row| row.select(&cell_sel).map(|c| c.text().collect()).collect())
            .collect()
    }

    #[test]
    fn test_build_keeps_submitter_order() {
        let data = sample_data();
        assert_eq!(data.submission_count, 4);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].submitter.id, "u1");
        assert_eq!(data.rows[0].solution_numbers, vec![12, 13]);
        assert_eq!(data.rows[1].stats.submitted_problems_count, 1);
    }

    #[test]
    fn test_write_failure_surfaces_as_render_error() {
        struct Full;

        impl Write for Full {
            fn write_str(&mut self, _s: &str) -> std::fmt::Result {
                Err(std::fmt::Error)
            }
        }

        let err = write_document(&mut Full, &sample_data()).unwrap_err();
        assert!(matches!(
            crate::error::AppError::from(err),
            crate::error::AppError::Render(_)
        ));
    }

    #[test]
    fn test_render_rows() {
        let html = render_report(&sample_data()).unwrap();
        let document = Html::parse_document(&html);

        let rows = cells(&document);
        assert_eq!(
            rows,
            vec![
                vec!["Noether", "Emmy", "Germany (DE)", "1 of 1", "1 of 2"],
                vec!["<script>", "Bob", "--", "0 of 1", "0 of 0"],
            ]
        );
    }

    #[test]
    fn test_render_header_and_title() {
        let html = render_report(&sample_data()).unwrap();
        let document = Html::parse_document(&html);

        let header_sel = Selector::parse("#submitters-table thead td").unwrap();
        let headers: Vec<String> = document
            .select(&header_sel)
            .map(|c| c.text().collect())
            .collect();
        assert_eq!(headers, COLUMNS);

        let title_sel = Selector::parse("title").unwrap();
        let title: String = document.select(&title_sel).next().unwrap().text().collect();
        assert_eq!(title, "Viewer");
        assert!(html.contains("Generated 2026-01-02 03:04:05 UTC from 4 submissions by 2 submitters."));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let html = render_report(&sample_data()).unwrap();
        assert!(html.contains("<td>&lt;script&gt;</td>"));
        assert!(!html.contains("<td><script></td>"));
    }

    #[test]
    fn test_render_row_attributes() {
        let html = render_report(&sample_data()).unwrap();
        assert!(html.contains(r#"<tr data-submitter-id="u1" data-solution-numbers="12,13">"#));
        assert!(html.contains(r#"<tr data-submitter-id="u2" data-solution-numbers="">"#));
    }

    #[test]
    fn test_render_empty_report() {
        let data = ReportData::build("Empty", Utc::now(), &[], &[]);
        let document = Html::parse_document(&render_report(&data).unwrap());
        assert!(cells(&document).is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = sample_data();
        assert_eq!(render_report(&data).unwrap(), render_report(&data).unwrap());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&#39;e&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
