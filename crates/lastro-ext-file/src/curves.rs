//! ANBIMA zero curve points from CSV.
//!
//! Expected columns:
//!
//! ```text
//! reference_date,business_days,real_rate,nominal_rate,implied_inflation
//! 2025-08-28,126,7.4512,14.5023,6.5621
//! ```
//!
//! Rates are in percent, as ANBIMA publishes them. A blank rate stays
//! unpublished and curve lookups skip that vertex for its series.

use std::path::{Path, PathBuf};

use lastro_core::Date;
use lastro_curves::{CurveResult, CurveStore, InMemoryCurveStore, YieldCurvePoint};
use serde::Deserialize;

use crate::error::{error_line, FileError, FileResult};

#[derive(Debug, Deserialize)]
struct CurveRecord {
    reference_date: Date,
    business_days: u32,
    real_rate: Option<f64>,
    nominal_rate: Option<f64>,
    implied_inflation: Option<f64>,
}

impl From<CurveRecord> for YieldCurvePoint {
    fn from(record: CurveRecord) -> Self {
        YieldCurvePoint::published(
            record.reference_date,
            record.business_days,
            record.real_rate,
            record.nominal_rate,
            record.implied_inflation,
        )
    }
}

/// CSV-based curve store for testing and end-of-day loads.
#[derive(Debug, Clone)]
pub struct CsvCurveStore {
    file_path: PathBuf,
    points: InMemoryCurveStore,
}

impl CsvCurveStore {
    /// Loads a curve file. A missing file gives an empty store.
    pub fn new(file_path: impl AsRef<Path>) -> FileResult<Self> {
        let mut store = Self {
            file_path: file_path.as_ref().to_path_buf(),
            points: InMemoryCurveStore::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the file, replacing every loaded point.
    pub fn reload(&mut self) -> FileResult<()> {
        let path = self.file_path.as_path();
        if !path.exists() {
            log::warn!("curve file {} not found, store is empty", path.display());
            self.points = InMemoryCurveStore::new();
            return Ok(());
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| FileError::io(path, &e))?;
        let mut points = InMemoryCurveStore::new();

        for result in reader.deserialize() {
            let record: CurveRecord = result
                .map_err(|e| FileError::parse(path, error_line(&e), e.to_string()))?;
            points
                .insert(record.into())
                .map_err(|e| FileError::data(path, e))?;
        }

        log::debug!(
            "loaded {} curve points for {} reference dates from {}",
            points.len(),
            points.reference_dates().count(),
            path.display()
        );
        self.points = points;
        Ok(())
    }

    /// Path the store reads from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Reference dates with at least one point.
    pub fn reference_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.reference_dates()
    }
}

impl CurveStore for CsvCurveStore {
    fn get_curve(&self, reference_date: Date) -> CurveResult<Vec<YieldCurvePoint>> {
        self.points.get_curve(reference_date)
    }
}
