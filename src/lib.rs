//! Expressway traffic-closure board: ingest the shared sheet export, search
//! it by closure date and/or employee, and format rows for display.

pub mod config;
pub mod fetch;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod process;
pub mod query;
pub mod render;
pub mod store;

pub use fetch::IngestionError;
pub use format::{escape_text, format_chadan, format_date, format_phone};
pub use ingest::Ingestor;
pub use process::{parse, parse_report, ParsePolicy, Row};
pub use query::{filter, filter_by_input_date, DateField, Query, QueryError};
pub use store::{FetchTicket, RowStore};
