//! Turn rows into what the board shows.

use std::fmt::Write;

use crate::format::{escape_text, format_chadan, format_date, format_phone, PLACEHOLDER};
use crate::process::Row;

/// Column headings, in display order.
pub const COLUMN_TITLES: [&str; 15] = [
    "입력일",
    "차단일",
    "공사명",
    "방향",
    "이정",
    "차단시간",
    "차단구간",
    "작업인원",
    "신호차",
    "작업차",
    "담당자",
    "연락처",
    "시공사",
    "현장대리인",
    "휴대폰",
];

/// Cell class per column in the HTML table.
const CELL_CLASSES: [Option<&str>; 15] = [
    None,
    None,
    Some("construction-name"),
    None,
    None,
    None,
    None,
    Some("workers-count"),
    Some("vehicle-count"),
    Some("vehicle-count"),
    None,
    Some("phone"),
    None,
    None,
    Some("phone"),
];

/// Target of the rendered cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Cells are escaped for embedding in HTML.
    Html,
    /// Cells are raw text.
    Plain,
}

/// One row's formatted cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub cells: [String; 15],
}

impl DisplayRow {
    pub fn new(row: &Row, markup: Markup) -> Self {
        let text = |s: &str| match markup {
            Markup::Html => escape_text(s),
            Markup::Plain if s.is_empty() => PLACEHOLDER.to_string(),
            Markup::Plain => s.to_string(),
        };
        // formatters echo raw input on fallback, so their output is escaped too
        let formatted = |s: String| match markup {
            Markup::Html => escape_text(&s),
            Markup::Plain => s,
        };

        Self {
            cells: [
                formatted(format_date(&row.inputdate)),
                formatted(format_date(&row.blockdate)),
                text(&row.const_name),
                text(&row.direction),
                text(&row.ieejung),
                text(&row.chadantime),
                formatted(format_chadan(&row.chadan)),
                row.workers.to_string(),
                row.signcar.to_string(),
                row.workcar.to_string(),
                text(&row.employee),
                formatted(format_phone(&row.employeephone)),
                text(&row.contractee),
                text(&row.sitemanager),
                formatted(format_phone(&row.smcellphone)),
            ],
        }
    }
}

/// `<tr>` elements for the table body, one per row.
pub fn render_html(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        let display = DisplayRow::new(row, Markup::Html);
        out.push_str("<tr>");
        for (cell, class) in display.cells.iter().zip(CELL_CLASSES) {
            match class {
                Some(c) => {
                    let _ = write!(out, "<td class=\"{}\">{}</td>", c, cell);
                }
                None => {
                    let _ = write!(out, "<td>{}</td>", cell);
                }
            }
        }
        out.push_str("</tr>\n");
    }
    out
}

/// Tab-separated table with a heading line.
pub fn render_table(rows: &[Row]) -> String {
    let mut out = COLUMN_TITLES.join("\t");
    out.push('\n');
    for row in rows {
        let display = DisplayRow::new(row, Markup::Plain);
        out.push_str(&display.cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Result count line shown above the table.
pub fn summary(count: usize) -> String {
    if count == 0 {
        "검색 결과가 없습니다.".to_string()
    } else {
        format!("{}개의 공사 정보", count)
    }
}
