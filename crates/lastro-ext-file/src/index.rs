//! Daily price index values from CSV.
//!
//! Expected columns are `date,index`, one row per business day:
//!
//! ```text
//! date,index
//! 2024-05-29,1.000000000000
//! 2024-05-31,1.000311521984
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use lastro_core::Date;
use lastro_curves::{CurveResult, DailyPriceIndex, PriceIndexStore};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{error_line, FileError, FileResult};

#[derive(Debug, Deserialize)]
struct IndexRecord {
    date: Date,
    index: String,
}

/// CSV-based price index store.
#[derive(Debug, Clone)]
pub struct CsvIndexStore {
    file_path: PathBuf,
    values: DailyPriceIndex,
}

impl CsvIndexStore {
    /// Loads an index file. A missing file gives an empty store.
    pub fn new(file_path: impl AsRef<Path>) -> FileResult<Self> {
        let mut store = Self {
            file_path: file_path.as_ref().to_path_buf(),
            values: DailyPriceIndex::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the file, replacing every loaded value.
    pub fn reload(&mut self) -> FileResult<()> {
        let path = self.file_path.as_path();
        if !path.exists() {
            log::warn!("index file {} not found, store is empty", path.display());
            self.values = DailyPriceIndex::new();
            return Ok(());
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| FileError::io(path, &e))?;
        let mut values = DailyPriceIndex::new();

        let headers = reader
            .headers()
            .map_err(|e| FileError::parse(path, error_line(&e), e.to_string()))?
            .clone();

        for result in reader.records() {
            let row = result.map_err(|e| FileError::parse(path, error_line(&e), e.to_string()))?;
            let line = row.position().map_or(0, csv::Position::line);
            let record: IndexRecord = row
                .deserialize(Some(&headers))
                .map_err(|e| FileError::parse(path, line, e.to_string()))?;
            let value = Decimal::from_str(record.index.trim()).map_err(|e| {
                FileError::parse(path, line, format!("index '{}': {e}", record.index))
            })?;
            values
                .insert(record.date, value)
                .map_err(|e| FileError::data(path, e))?;
        }

        log::debug!("loaded {} index values from {}", values.len(), path.display());
        self.values = values;
        Ok(())
    }

    /// Path the store reads from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The loaded series.
    pub fn values(&self) -> &DailyPriceIndex {
        &self.values
    }
}

impl PriceIndexStore for CsvIndexStore {
    fn get_index(&self, date: Date) -> CurveResult<Decimal> {
        self.values.get_index(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastro_curves::CurveError;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_index() {
        let file = write_csv(
            "date,index\n\
             2024-05-29,1.000000000000\n\
             2024-05-31,1.000311521984\n",
        );
        let store = CsvIndexStore::new(file.path()).unwrap();

        assert_eq!(store.values().len(), 2);
        assert_eq!(
            store.get_index(Date::from_ymd(2024, 5, 31).unwrap()).unwrap(),
            dec!(1.000311521984)
        );
        assert!(matches!(
            store.get_index(Date::from_ymd(2024, 5, 30).unwrap()),
            Err(CurveError::IndexNotFound { .. })
        ));
    }

    #[test]
    fn test_bad_value_reports_line() {
        let file = write_csv(
            "date,index\n\
             2024-05-29,1.0\n\
             2024-05-31,n/a\n",
        );
        let err = CsvIndexStore::new(file.path()).unwrap_err();
        assert!(matches!(err, FileError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_line_follows_multiline_rows() {
        let file = write_csv(
            "date,index\n2024-05-29,1.0\n2024-05-30,\"1.0001\n\"\n2024-05-31,n/a\n",
        );
        let err = CsvIndexStore::new(file.path()).unwrap_err();
        assert!(matches!(err, FileError::Parse { line: 5, .. }), "{err}");

        let file = write_csv("date,index\n2024-05-29,1.0\n2024-05-30,1.0\n31/05/2024,1.0\n");
        let err = CsvIndexStore::new(file.path()).unwrap_err();
        assert!(matches!(err, FileError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let file = write_csv(
            "date,index\n\
             2024-05-29,1.0\n\
             2024-05-29,1.1\n",
        );
        let err = CsvIndexStore::new(file.path()).unwrap_err();
        assert!(matches!(
            err,
            FileError::Data {
                source: CurveError::DuplicateIndexDate { .. },
                ..
            }
        ));
    }
}
