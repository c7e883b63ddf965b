use std::process::ExitCode;

use clap::Parser;
use timbercrop::cli::Args;
use timbercrop::core::app::{self, RunOutcome};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match app::run(Args::parse())? {
        RunOutcome::Exhausted(_) => {
            log::info!("No more images to process");
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Interrupted { summary, remaining } => {
            log::info!(
                "Stopped with {} files left: {} archived, {} crops written",
                remaining,
                summary.images_archived,
                summary.crops_written
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
