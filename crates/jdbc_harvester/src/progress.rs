use std::io::{self, Write};
use std::sync::Mutex;

use engine_logging::engine_warn;
use harvester_engine::{HarvestEvent, ProgressSink};

/// Writes each progress event as one line.
///
/// Write failures never abort a run: a closed pipe (e.g. output piped into
/// `head`) is ignored and anything else is logged.
pub struct LineProgress<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> LineProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap()
    }
}

impl LineProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ProgressSink for LineProgress<W> {
    fn emit(&self, event: HarvestEvent) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        let result = writeln!(out, "{event}").and_then(|()| out.flush());
        match result {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
            Err(err) => engine_warn!("Failed to print progress: {}", err),
        }
    }
}
