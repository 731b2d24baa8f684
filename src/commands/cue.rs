use clap::Parser;
use std::path::PathBuf;

/// Rewrites cue sheets in canonical form (FILE, TRACK and INDEX lines only)
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Rewrites cue sheets in canonical form\n\nNote: titles, performers, remarks and track modes are dropped, every file is written as WAVE and every track as AUDIO"
)]
pub struct DumpCommand {
    /// Cue sheets to rewrite
    #[arg(value_name = "CUE", required = true)]
    pub input: Vec<PathBuf>,

    /// Directory to write the rewritten cue sheets to, prints to stdout when omitted
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Force overwrite of output files that already exist
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,
}

/// Shows the tracks, index points and track lengths of cue sheets
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct InfoCommand {
    /// Cue sheets to inspect
    #[arg(value_name = "CUE", required = true)]
    pub input: Vec<PathBuf>,

    /// Print the parsed cue sheets as JSON
    #[arg(long, short = 'j', default_value_t = false)]
    pub json: bool,
}

/// Finds the audio files referenced by cue sheets on disk
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct ResolveCommand {
    /// Cue sheets whose FILE entries should be resolved
    #[arg(value_name = "CUE", required = true)]
    pub input: Vec<PathBuf>,
}
