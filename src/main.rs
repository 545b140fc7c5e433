use clap::Parser;
use tdv_processor::cli::{Cli, run};
use tdv_processor::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
