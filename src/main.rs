use anyhow::Context;
use clap::Parser;

use activity_compactor::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("compaction run failed")
}
