use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "activity-compactor")]
#[command(about = "Compacts fitness activity streams into JSONL for LLM analysis")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compact activity exports into a JSONL stream file
    Compact {
        #[arg(short, long, help = "Directory of activity export JSON files")]
        input_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Output JSONL path [default: streams/{label}_streams_{interval}s.jsonl]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Sampling interval in seconds [default: 5]")]
        interval: Option<f64>,

        #[arg(long, help = "Label used in default output file names")]
        label: Option<String>,

        #[arg(long, default_value = "false", help = "Abort on the first unclassifiable activity")]
        strict: bool,

        #[arg(long, help = "Also export per-activity raw stream CSVs to this directory")]
        csv_dir: Option<PathBuf>,
    },

    /// Classify and check activity exports without writing output
    Validate {
        #[arg(short, long, help = "Directory of activity export JSON files")]
        input_dir: PathBuf,

        #[arg(long, default_value = "false", help = "Abort on the first unclassifiable activity")]
        strict: bool,
    },

    /// Display information about an existing JSONL stream file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "5")]
        sample: usize,
    },
}
