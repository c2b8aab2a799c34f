//! CLI command definitions and handlers.

pub mod check;

use clap::{Parser, Subcommand};

/// Posture Check - Geometric posture analysis for exercise frames
#[derive(Parser)]
#[command(name = "posture-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, activity, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze frames for posture defects
    Check(check::CheckArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every analyzed frame was clean.
    Success = 0,
    /// At least one frame showed a posture defect.
    IssuesFound = 1,
    /// The run itself failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
