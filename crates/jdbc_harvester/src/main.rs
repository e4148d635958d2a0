//! Downloads new BigQuery JDBC driver archives and pulls the driver jar out
//! of each. Takes no arguments; see `engine_logging` for the log variables.
mod progress;

use std::process::ExitCode;

use anyhow::Context;
use engine_logging::LogSettings;
use harvester_core::HarvestConfig;
use harvester_engine::Harvester;

use crate::progress::LineProgress;

fn main() -> ExitCode {
    engine_logging::initialize(&LogSettings::from_env());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    // One thread: links are fetched and processed strictly in sequence.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let harvester = Harvester::new(HarvestConfig::default());
    runtime.block_on(harvester.run(&LineProgress::stdout()))?;
    Ok(())
}
