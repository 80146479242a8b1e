//! Spreadsheet import: CSV parsing plus file and HTTP sources.

use std::path::PathBuf;

use async_trait::async_trait;
use carlot_inventory::RawRecord;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::fetch::FetchPolicy;
use crate::source::SheetSource;

/// Parse CSV text with a header row into one record per data row.
///
/// Cells are trimmed and blank lines skipped. A row whose column count
/// differs from the header is malformed and fails the whole sheet.
pub fn parse_sheet(text: &str) -> Result<Vec<RawRecord>, SyncError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) && !headers.is_empty() {
        return Err(SyncError::ParseMalformed("header row is blank".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "Parsed sheet");
    Ok(rows)
}

/// Sheet read from a local CSV file.
#[derive(Debug, Clone)]
pub struct FileSheetSource {
    path: PathBuf,
}

impl FileSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SheetSource for FileSheetSource {
    async fn fetch_text(&self) -> Result<String, SyncError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            SyncError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        decode_utf8(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Sheet published at a URL, fetched with timeout and retry.
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    url: String,
    client: reqwest::Client,
    policy: FetchPolicy,
}

impl HttpSheetSource {
    pub fn new(url: impl Into<String>, policy: FetchPolicy) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
            policy,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn attempt(&self) -> Result<Vec<u8>, Attempt> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Attempt::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Attempt::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Attempt::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, SyncError> {
    String::from_utf8(bytes).map_err(|e| SyncError::ParseMalformed(e.to_string()))
}

enum Attempt {
    Transport(String),
    Status(u16),
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_text(&self) -> Result<String, SyncError> {
        let retry = &self.policy.retry;
        let mut attempt = 0;

        loop {
            let failure = match self.attempt().await {
                Ok(bytes) => return decode_utf8(bytes),
                Err(failure) => failure,
            };

            let (retryable, reason) = match failure {
                Attempt::Transport(reason) => (retry.should_retry_transport(attempt), reason),
                Attempt::Status(status) => (
                    retry.should_retry_status(status, attempt),
                    format!("HTTP {}", status),
                ),
            };

            if !retryable {
                return Err(SyncError::SourceUnavailable(format!(
                    "{} ({})",
                    reason, self.url
                )));
            }

            let delay = retry.backoff.delay_for_attempt(attempt);
            warn!(url = %self.url, attempt, ?delay, %reason, "Sheet fetch failed, retrying");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_headers_become_keys() {
        let rows = parse_sheet("Brand,Model,Price\nHonda, Civic ,16800\nToyota,Vios,\n").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Brand"), Some(&json!("Honda")));
        assert_eq!(rows[0].get("Model"), Some(&json!("Civic")));
        assert_eq!(rows[1].get("Price"), Some(&json!("")));
    }

    #[test]
    fn test_parse_quoted_cells() {
        let rows = parse_sheet("brand,images\nBMW,\"a.jpg, b.jpg\"\n").unwrap();
        assert_eq!(rows[0].get("images"), Some(&json!("a.jpg, b.jpg")));
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_sheet("").unwrap().is_empty());
        assert!(parse_sheet("brand,model\n").unwrap().is_empty());
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse_sheet("brand,model\nHonda,Civic,extra\n").unwrap_err();
        assert!(matches!(err, SyncError::ParseMalformed(_)));
    }

    #[test]
    fn test_blank_header_columns_ignored() {
        let rows = parse_sheet("brand,,model\nHonda,x,Civic\n").unwrap();
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get("model"), Some(&json!("Civic")));
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let source = FileSheetSource::new("/definitely/not/here.csv");
        let err = source.fetch_text().await.unwrap_err();
        assert!(matches!(err, SyncError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.csv");
        std::fs::write(&path, "brand,model\nHonda,Civic\n").unwrap();

        let source = FileSheetSource::new(&path);
        assert_eq!(source.fetch_text().await.unwrap(), "brand,model\nHonda,Civic\n");
        assert!(source.describe().ends_with("cars.csv"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.csv");
        std::fs::write(&path, [0x62, 0x72, 0xff, 0xfe, 0x0a]).unwrap();

        let err = FileSheetSource::new(&path).fetch_text().await.unwrap_err();
        assert!(matches!(err, SyncError::ParseMalformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_url_is_unavailable() {
        let policy = FetchPolicy::from_settings(500, 0);
        let source = HttpSheetSource::new("http://127.0.0.1:9/sheet.csv", policy).unwrap();
        let err = source.fetch_text().await.unwrap_err();
        assert!(matches!(err, SyncError::SourceUnavailable(_)));
    }
}
