//! Harvester engine: page fetch, driver downloads, archive extraction and the
//! history ledger.
mod archive;
mod decode;
mod download;
mod engine;
mod fetch;
mod history;
mod links;
mod persist;
mod types;

pub use archive::{extract_entry, extracted_filename, validate_archive};
pub use decode::decode_page;
pub use download::archive_destination;
pub use engine::{Harvester, ProgressSink};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use history::HistoryLedger;
pub use links::extract_driver_links;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    ArchiveError, DownloadError, FailureKind, FetchError, HarvestError, HarvestEvent, LedgerError,
};
