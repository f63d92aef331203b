use serde::Deserialize;
use thiserror::Error;

use crate::process::Row;

/// Which date column a date filter compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    /// The day the closure happens.
    #[default]
    Block,
    /// The day the record was entered.
    Input,
}

impl DateField {
    fn value<'a>(&self, row: &'a Row) -> &'a str {
        match self {
            DateField::Block => &row.blockdate,
            DateField::Input => &row.inputdate,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("select a date or enter an employee name to search")]
    NoCriteria,
}

/// A validated search: at least one criterion is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    date: Option<String>,
    employee: Option<String>,
    date_field: DateField,
}

impl Query {
    /// Blank criteria count as absent; a query with none left is rejected.
    pub fn new(date: Option<&str>, employee: Option<&str>) -> Result<Self, QueryError> {
        let date = non_blank(date);
        let employee = non_blank(employee);
        if date.is_none() && employee.is_none() {
            return Err(QueryError::NoCriteria);
        }
        Ok(Self {
            date,
            employee,
            date_field: DateField::default(),
        })
    }

    pub fn with_date_field(mut self, field: DateField) -> Self {
        self.date_field = field;
        self
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn employee(&self) -> Option<&str> {
        self.employee.as_deref()
    }

    pub fn date_field(&self) -> DateField {
        self.date_field
    }

    /// Rows matching every set criterion, in input order.
    pub fn apply(&self, rows: &[Row]) -> Vec<Row> {
        select(rows, self.date(), self.employee(), self.date_field)
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Filter on `blockdate` equality and/or case-insensitive `employee` substring.
///
/// Date comparison is plain string equality. An absent criterion matches
/// everything, so callers must not pass two `None`s; [`Query::new`] enforces that.
pub fn filter(rows: &[Row], date: Option<&str>, employee: Option<&str>) -> Vec<Row> {
    select(rows, date, employee, DateField::Block)
}

/// Legacy date-only search on `inputdate`.
pub fn filter_by_input_date(rows: &[Row], date: &str) -> Vec<Row> {
    select(rows, Some(date), None, DateField::Input)
}

fn select(
    rows: &[Row],
    date: Option<&str>,
    employee: Option<&str>,
    field: DateField,
) -> Vec<Row> {
    let needle = employee.map(str::to_lowercase);
    rows.iter()
        .filter(|row| date.map_or(true, |d| field.value(row) == d))
        .filter(|row| {
            needle.as_deref().map_or(true, |n| {
                !row.employee.is_empty() && row.employee.to_lowercase().contains(n)
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(inputdate: &str, blockdate: &str, employee: &str) -> Row {
        Row {
            inputdate: inputdate.into(),
            blockdate: blockdate.into(),
            employee: employee.into(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row("2023-12-28", "2024-01-01", "Kim"),
            row("2024-01-01", "2024-01-02", "Lee"),
        ]
    }

    #[test]
    fn test_filter_by_blockdate() {
        let out = filter(&sample(), Some("2024-01-01"), None);
        assert_eq!(out, vec![sample()[0].clone()]);
    }

    #[test]
    fn test_filter_employee_case_insensitive() {
        let out = filter(&sample(), None, Some("kim"));
        assert_eq!(out, vec![sample()[0].clone()]);
        let out = filter(&sample(), None, Some("E"));
        assert_eq!(out, vec![sample()[1].clone()]);
    }

    #[test]
    fn test_filter_korean_substring() {
        let rows = vec![row("", "2024-01-01", "김철수"), row("", "2024-01-01", "")];
        assert_eq!(filter(&rows, None, Some("철")).len(), 1);
    }

    #[test]
    fn test_both_criteria_must_hold() {
        let rows = sample();
        assert!(filter(&rows, Some("2024-01-02"), Some("kim")).is_empty());
        assert_eq!(filter(&rows, Some("2024-01-02"), Some("lee")).len(), 1);
    }

    #[test]
    fn test_date_is_string_equality() {
        assert!(filter(&sample(), Some("2024-1-1"), None).is_empty());
        assert!(filter(&sample(), Some("2024.01.01"), None).is_empty());
    }

    #[test]
    fn test_legacy_input_date_variant() {
        let out = filter_by_input_date(&sample(), "2024-01-01");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee, "Lee");
    }

    #[test]
    fn test_filter_preserves_order_and_input() {
        let rows = vec![
            row("", "d", "Kim A"),
            row("", "d", "Lee"),
            row("", "d", "kim B"),
        ];
        let before = rows.clone();
        let first = filter(&rows, Some("d"), Some("KIM"));
        let second = filter(&rows, Some("d"), Some("KIM"));
        assert_eq!(first, second);
        assert_eq!(rows, before);
        let names: Vec<_> = first.iter().map(|r| r.employee.as_str()).collect();
        assert_eq!(names, vec!["Kim A", "kim B"]);
    }

    #[test]
    fn test_query_rejects_missing_criteria() {
        assert_eq!(Query::new(None, None), Err(QueryError::NoCriteria));
        assert_eq!(Query::new(Some("  "), Some("")), Err(QueryError::NoCriteria));
    }

    #[test]
    fn test_query_apply_with_date_field() {
        let q = Query::new(Some(" 2024-01-01 "), None).unwrap();
        assert_eq!(q.date(), Some("2024-01-01"));
        assert_eq!(q.apply(&sample())[0].employee, "Kim");

        let q = q.with_date_field(DateField::Input);
        assert_eq!(q.apply(&sample())[0].employee, "Lee");
    }
}
