//! Remote worksheet backend - a thin client for a values-style REST API.
//!
//! The worksheet is addressed as `{base}/{spreadsheet}/values/{worksheet}`
//! and supports four calls: read all values, `:append` one row, `:clear`,
//! and a full overwrite via `PUT`. Authentication is a bearer token. The
//! client never interprets cells itself - encoding and decoding go through
//! the shared row codec.

use crate::{
    config::settings::SheetSettings,
    entities::LedgerEntry,
    errors::{Error, Result},
    store::{LedgerStore, row},
};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Remote worksheet store.
#[derive(Debug, Clone)]
pub struct SheetStore {
    http: reqwest::Client,
    base_url: Url,
    spreadsheet_id: String,
    worksheet: String,
    token: String,
}

/// Response shape of a values read.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Request body for append and overwrite calls.
#[derive(Debug, Serialize)]
struct ValuePayload {
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl SheetStore {
    /// Creates a client from the `[storage.sheet]` settings and an API token.
    ///
    /// # Errors
    /// Returns a configuration error when the base URL does not parse.
    pub fn new(settings: &SheetSettings, token: String) -> Result<Self> {
        // A trailing slash keeps Url::join from swallowing the last segment
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|err| Error::Config {
            message: format!("invalid sheet base_url: {err}"),
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            spreadsheet_id: settings.spreadsheet_id.clone(),
            worksheet: settings.worksheet.clone(),
            token,
        })
    }

    fn endpoint(&self, suffix: &str) -> Result<Url> {
        let path = format!(
            "{}/values/{}{}",
            self.spreadsheet_id, self.worksheet, suffix
        );
        self.base_url.join(&path).map_err(|err| Error::Config {
            message: format!("invalid sheet endpoint: {err}"),
        })
    }

    /// Maps a non-success response to a store error with the server message.
    async fn check(res: reqwest::Response) -> Result<reqwest::Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status().as_u16();
        let message = res
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(Error::Sheet { status, message })
    }
}

/// Decodes a raw values grid, treating the first row as the header.
fn decode_rows(values: &[Vec<String>]) -> Result<Vec<LedgerEntry>> {
    let Some((_header, data)) = values.split_first() else {
        return Ok(Vec::new());
    };

    data.iter()
        .enumerate()
        .map(|(index, cells)| row::from_record(index + 1, cells))
        .collect()
}

/// Encodes the full ledger as a values grid, header first.
fn encode_rows(entries: &[LedgerEntry]) -> Vec<Vec<String>> {
    let mut values = Vec::with_capacity(entries.len() + 1);
    values.push(row::HEADERS.iter().map(|h| (*h).to_string()).collect());
    values.extend(entries.iter().map(row::to_record));
    values
}

#[async_trait]
impl LedgerStore for SheetStore {
    async fn load(&self) -> Result<Vec<LedgerEntry>> {
        let res = self
            .http
            .get(self.endpoint("")?)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let range = Self::check(res).await?.json::<ValueRange>().await?;
        decode_rows(&range.values)
    }

    async fn append(&self, entry: &LedgerEntry) -> Result<()> {
        let payload = ValuePayload {
            values: vec![row::to_record(entry)],
        };
        let res = self
            .http
            .post(self.endpoint(":append")?)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    async fn replace_all(&self, entries: &[LedgerEntry]) -> Result<()> {
        let res = self
            .http
            .post(self.endpoint(":clear")?)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check(res).await?;

        let payload = ValuePayload {
            values: encode_rows(entries),
        };
        let res = self
            .http
            .put(self.endpoint("")?)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn settings() -> SheetSettings {
        SheetSettings {
            base_url: "https://sheets.example.com/v4/spreadsheets".to_string(),
            spreadsheet_id: "abc123".to_string(),
            worksheet: "Daily Data Analysis".to_string(),
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_worksheet() {
        let store = SheetStore::new(&settings(), "token".to_string()).unwrap();
        let url = store.endpoint(":append").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.example.com/v4/spreadsheets/abc123/values/Daily%20Data%20Analysis:append"
        );
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let bad = SheetSettings {
            base_url: "not a url".to_string(),
            ..settings()
        };
        let err = SheetStore::new(&bad, "token".to_string()).unwrap_err();
        assert!(matches!(err, crate::errors::Error::Config { .. }));
    }

    #[test]
    fn test_value_range_defaults_to_empty() {
        // An empty worksheet answers without a "values" key at all
        let range: ValueRange = serde_json::from_str("{}").unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn test_decode_rows_empty_grid() {
        assert!(decode_rows(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rows_header_only() {
        let values = encode_rows(&[]);
        assert!(decode_rows(&values).unwrap().is_empty());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let entries = vec![pkr_entry(2026, 7, 1, 1500.0), usd_entry(2026, 7, 2, 80.0)];
        let decoded = decode_rows(&encode_rows(&entries)).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_decode_rows_reports_data_row_number() {
        let mut values = encode_rows(&[pkr_entry(2026, 7, 1, 1500.0)]);
        values.push(vec!["garbage".to_string()]);

        let err = decode_rows(&values).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::Error::MalformedRow { row: 2, .. }
        ));
    }
}
