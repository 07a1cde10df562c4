//! Persistence module split across logical submodules: `backing` owns the
//! CSV file format and the read/write plumbing, `records` owns the in-memory
//! mapping and its operations. The store keeps memory and disk in lockstep
//! by rewriting the whole file after every mutation; there is exactly one
//! caller (the sequential menu loop), so no locking is needed or provided.

mod backing;
mod records;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use backing::default_store_path;
pub use records::{AddOutcome, MutateOutcome, RecordStore};

/// The only genuine failure mode of the store: the backing file could not be
/// read or written. "Not found" and "duplicate id" are ordinary outcomes and
/// travel through [`AddOutcome`] / [`MutateOutcome`] instead; a malformed
/// age is a data condition absorbed by [`crate::models::Age`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or parsing the backing file failed. A missing file is not a
    /// `Read` error; the store simply starts empty.
    #[error("could not read patient records from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// Rewriting the backing file failed (disk full, permissions, ...).
    #[error("could not write patient records to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    pub(crate) fn read(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_io(path: &std::path::Path, source: io::Error) -> Self {
        Self::write(path, csv::Error::from(source))
    }
}
