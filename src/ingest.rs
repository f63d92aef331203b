use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info, instrument};
use url::Url;

use crate::{
    config::Config,
    fetch::{build_client, fetch_csv_text, IngestionError},
    process::{parse_report, ParsePolicy, Row},
    store::{FetchTicket, RowStore},
};

/// Fetches the sheet export and refreshes a [`RowStore`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    client: Client,
    url: Url,
    policy: ParsePolicy,
}

impl Ingestor {
    pub fn new(client: Client, url: Url, policy: ParsePolicy) -> Self {
        Self {
            client,
            url,
            policy,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, IngestionError> {
        let client = build_client(cfg.request_timeout())?;
        Ok(Self::new(client, cfg.source_url.clone(), cfg.parse_policy))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch, parse and install the rows.
    ///
    /// On any failure the store is emptied (unless a newer ingestion has
    /// started since) and the error returned; no stale rows survive.
    #[instrument(level = "info", skip(self, store), fields(url = %self.url))]
    pub async fn ingest(&self, store: &RowStore) -> Result<Arc<Vec<Row>>, IngestionError> {
        let ticket = store.begin_fetch();
        match fetch_csv_text(&self.client, &self.url).await {
            Ok(text) => self.install(store, ticket, &text),
            Err(e) => {
                error!(ticket = ticket.id(), error = %e, "ingestion failed");
                store.reset(ticket);
                Err(e)
            }
        }
    }

    /// Same as [`ingest`](Self::ingest) for text already in hand.
    pub fn ingest_text(
        &self,
        store: &RowStore,
        text: &str,
    ) -> Result<Arc<Vec<Row>>, IngestionError> {
        let ticket = store.begin_fetch();
        self.install(store, ticket, text)
    }

    fn install(
        &self,
        store: &RowStore,
        ticket: FetchTicket,
        text: &str,
    ) -> Result<Arc<Vec<Row>>, IngestionError> {
        let report = match parse_report(text, self.policy) {
            Ok(r) => r,
            Err(e) => {
                error!(ticket = ticket.id(), error = %e, "sheet rejected");
                store.reset(ticket);
                return Err(e.into());
            }
        };

        let count = report.rows.len();
        if !store.commit(ticket, report.rows) {
            return Err(IngestionError::Superseded {
                ticket: ticket.id(),
                latest: store.latest_ticket(),
            });
        }
        info!(
            ticket = ticket.id(),
            records = count,
            dropped = report.dropped,
            "rows loaded"
        );
        Ok(store.snapshot())
    }
}
