use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

/// Progress reported by a harvest run, one stdout line each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    FetchingPage { url: String },
    AlreadyDownloaded { link: String },
    Downloading { link: String },
    Downloaded { path: PathBuf },
    Extracted { path: PathBuf },
}

impl fmt::Display for HarvestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestEvent::FetchingPage { url } => write!(f, "Fetching driver list page: {url}"),
            HarvestEvent::AlreadyDownloaded { link } => write!(f, "already downloaded: {link}"),
            HarvestEvent::Downloading { link } => write!(f, "downloading: {link}"),
            HarvestEvent::Downloaded { path } => write!(f, "downloaded: {}", path.display()),
            HarvestEvent::Extracted { path } => write!(f, "extracted: {}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no file name in url {url}")]
    NoFileName { url: String },
    #[error("cannot create {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("cannot read history {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot append to history {}", path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive {} not found", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("archive {} is empty", path.display())]
    Empty { path: PathBuf },
    #[error("archive {} is not a valid zip", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("{entry} not found in {}", archive.display())]
    EntryNotFound { archive: PathBuf, entry: String },
    #[error("cannot write {entry}")]
    Write {
        entry: String,
        #[source]
        source: PersistError,
    },
}

/// Run-level failure. Every variant names the page or link it concerns.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to fetch driver page {url}")]
    PageFetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to prepare output directory")]
    OutputDir(#[source] PersistError),
    #[error("history lookup failed for {link}")]
    Ledger {
        link: String,
        #[source]
        source: LedgerError,
    },
    #[error("download failed for {link}")]
    Download {
        link: String,
        #[source]
        source: DownloadError,
    },
    #[error("downloaded archive from {link} is invalid")]
    Validate {
        link: String,
        #[source]
        source: ArchiveError,
    },
    #[error("extraction failed for {link}")]
    Extract {
        link: String,
        #[source]
        source: ArchiveError,
    },
    #[error("failed to record {link}")]
    Record {
        link: String,
        #[source]
        source: LedgerError,
    },
}
