use crate::commands::{Cli, Commands};
use crate::tasks::{dump_cues, resolve_files, show_info};
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod commands;
mod tasks;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump(cmd) => dump_cues(pb.clone(), cmd).await?,
        Commands::Info(cmd) => show_info(pb.clone(), cmd).await?,
        Commands::Resolve(cmd) => resolve_files(pb.clone(), cmd).await?,
    }

    Ok(())
}
