use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_MAX_ERRORS;

#[derive(Parser)]
#[command(name = "tdv-processor")]
#[command(about = "Per-region summary statistics for tab-delimited climate observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate observation files into a per-region summary report
    Summarize {
        #[arg(required = true, help = "Input TDV observation files")]
        files: Vec<PathBuf>,

        #[arg(
            short,
            long,
            default_value = "text",
            help = "Report format: text or json"
        )]
        format: String,

        #[arg(long, help = "Stop at the first file that cannot be opened")]
        fail_fast: bool,

        #[arg(long, help = "Read files with memory mapping")]
        mmap: bool,
    },

    /// Check observation files for malformed records without aggregating
    Validate {
        #[arg(required = true, help = "Input TDV observation files")]
        files: Vec<PathBuf>,

        #[arg(
            long,
            default_value_t = DEFAULT_MAX_ERRORS,
            help = "Maximum parse issues to report per file"
        )]
        max_errors: usize,
    },
}
