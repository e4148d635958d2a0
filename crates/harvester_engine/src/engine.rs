use std::sync::Arc;

use engine_logging::{engine_debug, engine_info};
use harvester_core::{is_archive_link, prepare_links, HarvestConfig, LinkOutcome, RunSummary};

use crate::archive::{extract_entry, validate_archive};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::history::HistoryLedger;
use crate::links::extract_driver_links;
use crate::persist::ensure_output_dir;
use crate::{HarvestError, HarvestEvent};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Drives one harvest run: fetch the listing page, pick the driver archives,
/// and download, extract and record each one not yet in the history ledger.
///
/// Links are handled strictly one after another. The first error of any kind
/// ends the run; links recorded before it stay recorded.
pub struct Harvester {
    config: HarvestConfig,
    fetcher: Arc<dyn Fetcher>,
    ledger: HistoryLedger,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Self {
        Self::with_fetcher(config, Arc::new(ReqwestFetcher::default()))
    }

    pub fn with_fetcher(config: HarvestConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let ledger = HistoryLedger::new(config.history_file.clone());
        Self {
            config,
            fetcher,
            ledger,
        }
    }

    pub async fn run(&self, sink: &dyn ProgressSink) -> Result<RunSummary, HarvestError> {
        let page_url = &self.config.page_url;
        sink.emit(HarvestEvent::FetchingPage {
            url: page_url.clone(),
        });
        let page = self
            .fetcher
            .fetch_page(page_url)
            .await
            .map_err(|source| HarvestError::PageFetch {
                url: page_url.clone(),
                source,
            })?;

        let raw = extract_driver_links(&page, self.config.link_marker);
        let raw_count = raw.len();
        let links = prepare_links(raw, &self.config);
        engine_info!(
            "Found {} driver links, {} after exclusions",
            raw_count,
            links.len()
        );

        ensure_output_dir(&self.config.downloads_dir).map_err(HarvestError::OutputDir)?;

        let mut summary = RunSummary::new();
        for link in links {
            if !is_archive_link(&link, self.config.archive_suffix) {
                engine_debug!("Not an archive, ignoring {}", link);
                continue;
            }
            let outcome = self.process_link(&link, sink).await?;
            summary.record(link, outcome);
        }

        engine_info!(
            "Run finished: {} processed, {} skipped",
            summary.processed.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn process_link(
        &self,
        link: &str,
        sink: &dyn ProgressSink,
    ) -> Result<LinkOutcome, HarvestError> {
        let recorded = self
            .ledger
            .is_recorded(link)
            .map_err(|source| HarvestError::Ledger {
                link: link.to_string(),
                source,
            })?;
        if recorded {
            sink.emit(HarvestEvent::AlreadyDownloaded {
                link: link.to_string(),
            });
            return Ok(LinkOutcome::Skipped);
        }

        sink.emit(HarvestEvent::Downloading {
            link: link.to_string(),
        });
        let archive = self
            .fetcher
            .download(link, &self.config.downloads_dir)
            .await
            .map_err(|source| HarvestError::Download {
                link: link.to_string(),
                source,
            })?;
        validate_archive(&archive).map_err(|source| HarvestError::Validate {
            link: link.to_string(),
            source,
        })?;
        sink.emit(HarvestEvent::Downloaded {
            path: archive.clone(),
        });

        let extracted = extract_entry(
            &archive,
            &self.config.downloads_dir,
            self.config.target_entry,
        )
        .map_err(|source| HarvestError::Extract {
            link: link.to_string(),
            source,
        })?;

        self.ledger
            .record(link)
            .map_err(|source| HarvestError::Record {
                link: link.to_string(),
                source,
            })?;
        sink.emit(HarvestEvent::Extracted { path: extracted });

        Ok(LinkOutcome::Processed)
    }
}
