use crate::commands::cue::{DumpCommand, InfoCommand, ResolveCommand};
use clap::{Parser, Subcommand};

pub mod cue;

/// CLI for inspecting, normalizing and resolving CD cue sheets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Dump(DumpCommand),
    Info(InfoCommand),
    Resolve(ResolveCommand),
}
