// src/ingest.rs
use std::future::Future;

use chrono::Utc;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::record::SheetRecord;
use crate::sheet::{self, resolve::HeaderIndex};

/// Why a refresh cycle produced no new record set.
///
/// Every variant is recoverable: the caller logs it, keeps the previous
/// record set, and waits for the next tick. A single unreadable cell is
/// not an error at all; it collapses to the field default during mapping.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport failure or non-success status from the document host.
    #[error("fetch failed: {0}")]
    Fetch(String),
    /// Structurally malformed delimited text.
    #[error("malformed sheet: {0}")]
    Parse(#[from] csv::Error),
    /// The host answered with no rows at all.
    #[error("empty document")]
    Empty,
}

/// Boundary contract for "give me the current raw text of the sheet".
pub trait TextSource: Send + Sync + 'static {
    fn fetch_text(&self) -> impl Future<Output = Result<String, IngestError>> + Send;
}

/// Fetches the published sheet over HTTP, cache-busting every request so
/// intermediaries cannot serve a stale export.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    fn busted_url(&self) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("t", &Utc::now().timestamp_millis().to_string());
        url
    }
}

impl TextSource for HttpSource {
    fn fetch_text(&self) -> impl Future<Output = Result<String, IngestError>> + Send {
        let url = self.busted_url();
        let client = self.client.clone();
        async move {
            let resp = client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| IngestError::Fetch(e.to_string()))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(IngestError::Fetch(format!("HTTP {status} from {url}")));
            }
            resp.text()
                .await
                .map_err(|e| IngestError::Fetch(e.to_string()))
        }
    }
}

/// One full ingestion pass: fetch the raw text, parse it, resolve the
/// header index for this export, map every row, and drop rows with no
/// signal. Any failure means "no update this cycle" for the caller.
pub async fn ingest<R, S>(source: &S) -> Result<Vec<R>, IngestError>
where
    R: SheetRecord,
    S: TextSource,
{
    let text = source.fetch_text().await?;
    let table = sheet::parse(&text)?;
    // Header text drifts between exports; the index is rebuilt per pass.
    let index = HeaderIndex::resolve(&table.headers, R::field_specs());
    let records: Vec<R> = table
        .rows
        .iter()
        .map(|row| R::from_row(&index, row))
        .filter(|record| record.is_meaningful())
        .collect();
    debug!(rows = table.rows.len(), kept = records.len(), "mapped sheet rows");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InquiryRecord;

    struct StaticSource(Result<String, IngestError>);

    impl TextSource for StaticSource {
        fn fetch_text(&self) -> impl Future<Output = Result<String, IngestError>> + Send {
            let next = match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(err) => Err(IngestError::Fetch(err.to_string())),
            };
            async move { next }
        }
    }

    #[tokio::test]
    async fn maps_rows_and_drops_blank_tail() {
        let text = "SL,VESSEL,QTN VALUE,STATUS\n\
                    1,MV OCEAN PRIDE,\"$4,000\",WON\n\
                    2,MV KESTREL,0,PENDING\n\
                    ,,,\n";
        let source = StaticSource(Ok(text.to_string()));
        let records: Vec<InquiryRecord> = ingest(&source).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].qtn_value, 4000.0);
    }

    #[tokio::test]
    async fn structural_damage_is_a_parse_error() {
        let source = StaticSource(Ok("SL,VESSEL\n1,MV A,EXTRA\n".to_string()));
        let err = ingest::<InquiryRecord, _>(&source).await.unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
    }

    #[tokio::test]
    async fn fetch_failure_passes_through() {
        let source = StaticSource(Err(IngestError::Fetch("HTTP 503".into())));
        let err = ingest::<InquiryRecord, _>(&source).await.unwrap_err();
        assert!(matches!(err, IngestError::Fetch(_)));
    }

    #[test]
    fn cache_bust_parameter_changes_the_url() {
        let source = HttpSource::new(
            Client::new(),
            Url::parse("https://example.com/pub?output=csv").unwrap(),
        );
        let busted = source.busted_url();
        assert!(busted.query().unwrap().contains("t="));
        // the configured URL itself is left untouched
        assert_eq!(source.url.query(), Some("output=csv"));
    }
}
