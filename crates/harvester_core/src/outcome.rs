/// Terminal state of one candidate link in a successful run.
///
/// A failure has no variant: the first one aborts the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Already present in the history ledger.
    Skipped,
    /// Downloaded, extracted and recorded during this run.
    Processed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub skipped: Vec<String>,
    pub processed: Vec<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, link: String, outcome: LinkOutcome) {
        match outcome {
            LinkOutcome::Skipped => self.skipped.push(link),
            LinkOutcome::Processed => self.processed.push(link),
        }
    }

    pub fn considered(&self) -> usize {
        self.skipped.len() + self.processed.len()
    }
}
