//! # Lastro Ext File
//!
//! File-backed reference data for the Lastro valuation engine.
//!
//! - [`CsvCurveStore`]: ANBIMA zero curve points by reference date
//! - [`CsvIndexStore`]: daily IPCA index values
//!
//! Both load eagerly and implement the read-only store contracts of
//! `lastro-curves`, so they can be handed straight to the valuation engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod curves;
mod error;
mod index;

pub use curves::CsvCurveStore;
pub use error::{FileError, FileResult};
pub use index::CsvIndexStore;

use std::path::Path;

/// Loads the curve and index files of one data directory.
pub fn create_file_stores(
    curves_csv: impl AsRef<Path>,
    index_csv: impl AsRef<Path>,
) -> FileResult<(CsvCurveStore, CsvIndexStore)> {
    Ok((CsvCurveStore::new(curves_csv)?, CsvIndexStore::new(index_csv)?))
}
