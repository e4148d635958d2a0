//! Harvester core: fixed configuration and the pure link rules.
mod config;
mod filter;
mod normalize;
mod outcome;

pub use config::{
    HarvestConfig, ARCHIVE_SUFFIX, BASE_ORIGIN, DOWNLOADS_DIR, DRIVER_PAGE_URL, EXCLUDED_DRIVERS,
    HISTORY_FILE, LINK_MARKER, REQUEST_TIMEOUT, TARGET_ENTRY,
};
pub use filter::{exclude_denied, final_path_segment, is_archive_link};
pub use normalize::normalize_url;
pub use outcome::{LinkOutcome, RunSummary};

/// Normalize every scraped link, then drop the deny-listed ones.
///
/// Order and duplicates are preserved.
pub fn prepare_links(raw: Vec<String>, config: &HarvestConfig) -> Vec<String> {
    let normalized = raw
        .iter()
        .map(|href| normalize_url(href, &config.base_origin))
        .collect();
    exclude_denied(normalized, config.excluded)
}
