use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::config::CompactorConfig;
use crate::error::Result;
use crate::processors::BatchCompactor;
use crate::readers::ExportReader;
use crate::utils::filename::generate_default_jsonl_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvStreamWriter, JsonlWriter};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compact {
            input_dir,
            output_file,
            interval,
            label,
            strict,
            csv_dir,
        } => {
            let mut config = CompactorConfig::load()?;
            if let Some(interval) = interval {
                config.sample_interval_secs = interval;
            }
            if let Some(label) = label {
                config.label = label;
            }
            config.strict = config.strict || strict;
            config.validate()?;

            println!("Compacting activity exports...");
            println!("Input directory: {}", input_dir.display());
            println!("Sampling interval: {}s", config.sample_interval_secs);

            let progress = ProgressReporter::new_spinner("Compacting activities...", false);

            let compactor = BatchCompactor::new()
                .with_interval(config.sample_interval_secs)
                .with_strict(config.strict);

            let (records, report) = compactor.compact_dir(&input_dir, Some(&progress))?;

            progress.finish_with_message(&format!("Compacted {} activities", records.len()));

            println!("\n{}", report.generate_summary());

            if let Some(csv_dir) = csv_dir {
                export_raw_csvs(&input_dir, &csv_dir, &config.label)?;
            }

            let output_file = output_file.unwrap_or_else(|| {
                generate_default_jsonl_filename(
                    &config.output_dir,
                    &config.label,
                    config.sample_interval_secs,
                )
            });

            // Create output directory if it doesn't exist
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let writer = JsonlWriter::new();
            let written = writer.write_records(records, &output_file)?;

            println!("Wrote {} records to {}", written, output_file.display());
            println!("Compaction complete!");
        }

        Commands::Validate { input_dir, strict } => {
            println!("Validating activity exports...");
            println!("Input directory: {}", input_dir.display());

            let progress = ProgressReporter::new_spinner("Validating exports...", false);

            let compactor = BatchCompactor::new().with_strict(strict);
            let (_records, report) = compactor.compact_dir(&input_dir, Some(&progress))?;

            progress.finish_with_message("Validation complete");

            println!("\n{}", report.generate_summary());

            if report.skipped.is_empty() && report.missing_required.is_empty() {
                println!("✅ All activities classified with complete channel sets");
            } else {
                println!(
                    "⚠️  Found {} unclassifiable activities and {} missing required channels",
                    report.skipped.len(),
                    report.missing_required.len()
                );
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing stream file: {}", file.display());

            let analyzer = crate::analyzers::ActivityAnalyzer::new();
            let summary = analyzer.analyze_jsonl(&file)?;

            println!("\n{}", summary.detailed_summary());

            if sample > 0 {
                let records = JsonlWriter::new().read_records(&file)?;
                println!("\nSample Records (showing {} records):", sample.min(records.len()));
                for (i, record) in records.iter().take(sample).enumerate() {
                    println!(
                        "{}. {} on {}: {:.2} km, {:.1} min, {} channels",
                        i + 1,
                        record.metadata.name,
                        record.metadata.start_date.format("%Y-%m-%d"),
                        record.metadata.distance_km(),
                        record.metadata.moving_time as f64 / 60.0,
                        record.channel_count()
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "activity_compactor=debug,info"
        } else {
            "info"
        })
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn export_raw_csvs(input_dir: &Path, csv_dir: &Path, label: &str) -> Result<()> {
    let reader = ExportReader::new();
    let writer = CsvStreamWriter::new();
    let mut count = 0;

    for export in reader.stream_exports(input_dir)? {
        let export = export?;
        writer.write_activity_streams(&export.metadata, &export.streams, label, csv_dir)?;
        count += 1;
    }

    println!("Exported {} raw stream CSVs to {}", count, csv_dir.display());
    Ok(())
}
