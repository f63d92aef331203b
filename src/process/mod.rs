// src/process/mod.rs
pub mod row;
pub mod utils;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use row::Row;
use utils::{clean_str, tokenize_line};

/// What to do with a data line that has fewer tokens than the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Drop the line and keep going.
    #[default]
    Lenient,
    /// Fail the whole parse.
    Strict,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Rows kept from one parse, plus how many data lines were dropped as short.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub rows: Vec<Row>,
    pub dropped: usize,
}

/// Parse an exported sheet into rows, dropping short lines.
pub fn parse(raw: &str) -> Vec<Row> {
    // lenient parsing never fails
    parse_report(raw, ParsePolicy::Lenient)
        .map(|report| report.rows)
        .unwrap_or_default()
}

/// Parse an exported sheet under `policy`.
///
/// The first line names the fields. Every following non-blank line is
/// tokenized with [`tokenize_line`]; tokens beyond the header count are
/// ignored and rows come back in source order.
#[tracing::instrument(level = "debug", skip(raw), fields(bytes = raw.len()))]
pub fn parse_report(raw: &str, policy: ParsePolicy) -> Result<ParseReport, ParseError> {
    let mut lines = raw.split('\n');
    let headers: Vec<String> = match lines.next() {
        Some(h) if !h.trim().is_empty() => h.split(',').map(clean_str).collect(),
        _ => {
            warn!("no header line; nothing to parse");
            return Ok(ParseReport::default());
        }
    };

    let mut report = ParseReport::default();
    for (idx, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        // header is line 1
        let line_no = idx + 2;

        let tokens = tokenize_line(line);
        if tokens.len() < headers.len() {
            match policy {
                ParsePolicy::Strict => {
                    return Err(ParseError::ShortRow {
                        line: line_no,
                        expected: headers.len(),
                        found: tokens.len(),
                    })
                }
                ParsePolicy::Lenient => {
                    debug!(
                        line = line_no,
                        expected = headers.len(),
                        found = tokens.len(),
                        "dropping short row"
                    );
                    report.dropped += 1;
                    continue;
                }
            }
        }

        let mut row = Row::default();
        for (header, value) in headers.iter().zip(tokens) {
            row.set(header, value);
        }
        report.rows.push(row);
    }

    if report.dropped > 0 {
        warn!(
            dropped = report.dropped,
            kept = report.rows.len(),
            "short rows dropped"
        );
    }
    Ok(report)
}
