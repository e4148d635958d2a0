use std::path::PathBuf;
use std::time::Duration;

/// Documentation page listing the driver downloads.
pub const DRIVER_PAGE_URL: &str =
    "https://cloud.google.com/bigquery/docs/reference/odbc-jdbc-drivers";

/// Origin prefixed to root-relative links.
pub const BASE_ORIGIN: &str = "https://cloud.google.com";

/// Case-insensitive fragment an `href` must contain to count as a driver link.
pub const LINK_MARKER: &str = "jdbc";

/// Entry copied out of every downloaded archive.
pub const TARGET_ENTRY: &str = "GoogleBigQueryJDBC42.jar";

/// Case-insensitive suffix a link must end with to be downloaded.
pub const ARCHIVE_SUFFIX: &str = ".zip";

pub const DOWNLOADS_DIR: &str = "downloads";
pub const HISTORY_FILE: &str = "download_history.txt";

/// Applied to the page fetch and every archive download alike.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Obsolete driver archives that are never downloaded even though the page
/// still links them. Matched exactly against a link's final path segment.
pub const EXCLUDED_DRIVERS: &[&str] = &[
    "SimbaJDBCDriverforGoogleBigQuery42_1.5.4.1008.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.5.0.1001.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.3.3.1004.zip",
    "SimbaBigQueryJDBC42-1.3.2.1003.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.3.0.1001.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.25.1029.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.23.1027.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.22.1026.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.21.1025.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.19.1023.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.18.1022.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.16.1020.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.14.1017.zip",
    "SimbaJDBCDriverforGoogleBigQuery42_1.2.1.1001.zip",
    "SimbaJDBCDriverforGoogleBigQuery41_1.2.1.1001.zip",
];

/// Everything a harvest run needs to know. `Default` gives the production
/// values; tests swap in a local server and temporary paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    pub page_url: String,
    pub base_origin: String,
    pub link_marker: &'static str,
    pub target_entry: &'static str,
    pub archive_suffix: &'static str,
    pub excluded: &'static [&'static str],
    pub downloads_dir: PathBuf,
    pub history_file: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            page_url: DRIVER_PAGE_URL.to_string(),
            base_origin: BASE_ORIGIN.to_string(),
            link_marker: LINK_MARKER,
            target_entry: TARGET_ENTRY,
            archive_suffix: ARCHIVE_SUFFIX,
            excluded: EXCLUDED_DRIVERS,
            downloads_dir: PathBuf::from(DOWNLOADS_DIR),
            history_file: PathBuf::from(HISTORY_FILE),
        }
    }
}
