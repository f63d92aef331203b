use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use closures::{
    config::Config,
    logging::init_logging,
    render::{render_html, render_table, summary},
    DateField, Ingestor, ParsePolicy, Query, RowStore,
};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Html,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateColumn {
    /// Closure day (`blockdate`).
    Block,
    /// Entry day (`inputdate`).
    Input,
}

impl From<DateColumn> for DateField {
    fn from(c: DateColumn) -> Self {
        match c {
            DateColumn::Block => DateField::Block,
            DateColumn::Input => DateField::Input,
        }
    }
}

/// Search expressway traffic closures.
#[derive(Debug, Parser)]
#[command(name = "closures")]
#[command(about = "Search expressway traffic-closure records", long_about = None)]
struct Cli {
    /// YAML config file (default: ./closures.yaml if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Closure date to match exactly, e.g. 2024-01-05.
    #[arg(long, conflicts_with = "today")]
    date: Option<String>,

    /// Search today's date.
    #[arg(long)]
    today: bool,

    /// Employee name substring (case-insensitive).
    #[arg(long)]
    employee: Option<String>,

    /// Date column to compare (overrides config).
    #[arg(long, value_enum)]
    date_field: Option<DateColumn>,

    /// Parse a local CSV export instead of fetching.
    #[arg(long, value_name = "PATH")]
    csv_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Reject the sheet if any line is short instead of dropping it.
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if cli.strict {
        cfg.parse_policy = ParsePolicy::Strict;
    }
    if let Some(col) = cli.date_field {
        cfg.date_field = col.into();
    }
    debug!(?cfg, "effective config");

    // reject an empty search before touching the network
    let date = if cli.today {
        Some(Local::now().date_naive().format("%Y-%m-%d").to_string())
    } else {
        cli.date.clone()
    };
    let query = Query::new(date.as_deref(), cli.employee.as_deref())?
        .with_date_field(cfg.date_field);

    let store = RowStore::new();
    let ingestor = Ingestor::from_config(&cfg)?;
    let rows = match &cli.csv_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ingestor.ingest_text(&store, &text)?
        }
        None => ingestor
            .ingest(&store)
            .await
            .with_context(|| format!("loading closures from {}", ingestor.url()))?,
    };

    let results = query.apply(&rows);
    info!(
        total = rows.len(),
        matched = results.len(),
        date = query.date(),
        employee = query.employee(),
        "search complete"
    );

    match cli.format {
        OutputFormat::Table => {
            println!("{}", summary(results.len()));
            if !results.is_empty() {
                print!("{}", render_table(&results));
            }
        }
        OutputFormat::Html => print!("{}", render_html(&results)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }
    Ok(())
}
