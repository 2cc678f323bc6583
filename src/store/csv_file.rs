//! Flat-file backend - a headered CSV at a configured path.
//!
//! Reading and writing are split into functions over generic `io` traits so
//! the codec paths are tested against in-memory buffers. A missing file reads
//! as an empty ledger; rewrites go through a temp file and a rename so a
//! failed write never truncates the ledger.

use crate::{
    entities::LedgerEntry,
    errors::Result,
    store::{LedgerStore, row},
};
use async_trait::async_trait;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// CSV file store.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store over the given file path. The file itself is created
    /// lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Reads all data rows from a headered CSV stream.
///
/// The reader is flexible about record width so that a short row reaches the
/// row codec, which reports the row number and the problem instead of a bare
/// CSV error.
pub(crate) fn read_entries<R: Read>(reader: R) -> Result<Vec<LedgerEntry>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut entries = Vec::new();

    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        entries.push(row::from_record(index + 1, &cells)?);
    }

    Ok(entries)
}

/// Writes the header line followed by every entry.
pub(crate) fn write_entries<W: Write>(writer: W, entries: &[LedgerEntry]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(row::HEADERS)?;
    for entry in entries {
        wtr.write_record(row::to_record(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

#[async_trait]
impl LedgerStore for CsvStore {
    async fn load(&self) -> Result<Vec<LedgerEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path)?;
        read_entries(BufReader::new(file))
    }

    async fn append(&self, entry: &LedgerEntry) -> Result<()> {
        self.ensure_parent_dir()?;
        let exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut wtr = WriterBuilder::new().from_writer(file);
        if !exists {
            wtr.write_record(row::HEADERS)?;
        }
        wtr.write_record(row::to_record(entry))?;
        wtr.flush()?;
        Ok(())
    }

    async fn replace_all(&self, entries: &[LedgerEntry]) -> Result<()> {
        self.ensure_parent_dir()?;
        let tmp = temp_path(&self.path);
        write_entries(fs::File::create(&tmp)?, entries)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    fn write_to_string(entries: &[LedgerEntry]) -> String {
        let mut buf = Vec::new();
        write_entries(&mut buf, entries).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_then_read_preserves_ledger() {
        let entries = vec![
            pkr_entry(2026, 7, 1, 1500.0),
            usd_entry(2026, 7, 2, 80.5),
            pkr_entry(2026, 8, 3, 250.0),
        ];

        let text = write_to_string(&entries);
        let decoded = read_entries(text.as_bytes()).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_write_emits_header_line() {
        let text = write_to_string(&[]);
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, row::HEADERS.join(","));
    }

    #[test]
    fn test_read_empty_input_is_empty_ledger() {
        let decoded = read_entries("".as_bytes()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_read_header_only_is_empty_ledger() {
        let text = write_to_string(&[]);
        let decoded = read_entries(text.as_bytes()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_read_reports_data_row_number() {
        let mut text = write_to_string(&[pkr_entry(2026, 7, 1, 1500.0)]);
        // Append a second data row with a broken amount
        text.push_str("2026-07-02,2026-07-02T09:30:00+00:00,oops,USD,A,FALSE,,0,2026-07-02,2026-07-02\n");

        let err = read_entries(text.as_bytes()).unwrap_err();
        match err {
            Error::MalformedRow { row, message } => {
                assert_eq!(row, 2);
                assert!(message.starts_with("amount:"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_short_row_is_malformed() {
        let mut text = write_to_string(&[]);
        text.push_str("2026-07-02,only-two\n");

        let err = read_entries(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { row: 1, .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let store = CsvStore::new("/nonexistent/clipledger-missing.csv");
        let entries = store.load().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_append_and_replace_cycle() {
        let path = std::env::temp_dir().join(format!(
            "clipledger-test-{}-{:?}.csv",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = fs::remove_file(&path);
        let store = CsvStore::new(&path);

        // First append creates the file with a header
        store.append(&pkr_entry(2026, 7, 1, 1500.0)).await.unwrap();
        // Second append must not duplicate the header
        store.append(&usd_entry(2026, 7, 2, 80.0)).await.unwrap();

        let entries = store.load().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, 1500.0);
        assert_eq!(entries[1].amount, 80.0);

        // Rewrite the whole store with a single surviving entry
        store.replace_all(&entries[1..]).await.unwrap();
        let entries = store.load().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 80.0);

        let _ = fs::remove_file(&path);
    }
}
