use std::path::Path;

use tracing::warn;

use crate::error::{CompactionError, Result};
use crate::models::{ActivityRecord, ActivityType, Intensity};
use crate::processors::channels::missing_required;
use crate::processors::record_builder::RecordBuilder;
use crate::readers::{ActivityExport, ExportReader};
use crate::utils::progress::ProgressReporter;

/// Drives the compaction pipeline over a set of activity exports, one
/// activity at a time. Unclassifiable activities are skipped and logged with
/// their identifier unless strict mode turns them into an abort; any other
/// error aborts the batch.
pub struct BatchCompactor {
    builder: RecordBuilder,
    strict: bool,
}

#[derive(Debug, Clone)]
pub struct SkippedActivity {
    pub id: u64,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct MissingRequiredChannel {
    pub activity_id: u64,
    pub channel: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct CompactionReport {
    pub total_activities: usize,
    pub compacted: usize,
    pub running_low: usize,
    pub running_high: usize,
    pub treppe: usize,
    pub rest: usize,
    pub skipped: Vec<SkippedActivity>,
    pub missing_required: Vec<MissingRequiredChannel>,
}

impl CompactionReport {
    fn tally(&mut self, activity_type: ActivityType) {
        match activity_type {
            ActivityType::Running {
                intensity: Intensity::Low,
            } => self.running_low += 1,
            ActivityType::Running {
                intensity: Intensity::High,
            } => self.running_high += 1,
            ActivityType::Treppe => self.treppe += 1,
            ActivityType::Rest => self.rest += 1,
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Compaction Report ===\n");
        summary.push_str(&format!("Total Activities: {}\n", self.total_activities));
        if self.total_activities > 0 {
            summary.push_str(&format!(
                "Compacted: {} ({:.1}%)\n",
                self.compacted,
                100.0 * self.compacted as f64 / self.total_activities as f64
            ));
        } else {
            summary.push_str("Compacted: 0\n");
        }
        summary.push_str(&format!("  Running (lower paced): {}\n", self.running_low));
        summary.push_str(&format!("  Running (higher paced): {}\n", self.running_high));
        summary.push_str(&format!("  Stair climbing: {}\n", self.treppe));
        summary.push_str(&format!("  Rest: {}\n", self.rest));

        summary.push_str(&format!("Skipped: {}\n", self.skipped.len()));
        for skipped in &self.skipped {
            summary.push_str(&format!(
                "  - {} '{}': {}\n",
                skipped.id, skipped.name, skipped.reason
            ));
        }

        if !self.missing_required.is_empty() {
            summary.push_str(&format!(
                "Activities missing required channels: {}\n",
                self.missing_required.len()
            ));
            for missing in &self.missing_required {
                summary.push_str(&format!(
                    "  - activity {}: {}\n",
                    missing.activity_id, missing.channel
                ));
            }
        }

        summary
    }
}

impl BatchCompactor {
    pub fn new() -> Self {
        Self {
            builder: RecordBuilder::new(),
            strict: false,
        }
    }

    pub fn with_interval(mut self, interval_secs: f64) -> Self {
        self.builder = RecordBuilder::with_interval(interval_secs);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Compact every export document in a directory, in file-name order.
    pub fn compact_dir(
        &self,
        input_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<ActivityRecord>, CompactionReport)> {
        let reader = ExportReader::new();
        let mut records = Vec::new();
        let mut report = CompactionReport::default();

        for export in reader.stream_exports(input_dir)? {
            let export = export?;
            if let Some(p) = progress {
                p.set_message(&format!("Compacting '{}'...", export.metadata.name));
            }
            self.process_export(export, &mut records, &mut report)?;
        }

        Ok((records, report))
    }

    /// Compact already-materialized exports, preserving input order.
    pub fn compact_activities(
        &self,
        exports: Vec<ActivityExport>,
    ) -> Result<(Vec<ActivityRecord>, CompactionReport)> {
        let mut records = Vec::new();
        let mut report = CompactionReport::default();

        for export in exports {
            self.process_export(export, &mut records, &mut report)?;
        }

        Ok((records, report))
    }

    fn process_export(
        &self,
        export: ActivityExport,
        records: &mut Vec<ActivityRecord>,
        report: &mut CompactionReport,
    ) -> Result<()> {
        report.total_activities += 1;

        match self.builder.build_record(&export.metadata, &export.streams) {
            Ok((record, activity_type)) => {
                report.tally(activity_type);
                for channel in missing_required(activity_type, &export.streams) {
                    report.missing_required.push(MissingRequiredChannel {
                        activity_id: export.metadata.id,
                        channel: channel.quantile_key(),
                    });
                }
                report.compacted += 1;
                records.push(record);
                Ok(())
            }
            Err(CompactionError::UnclassifiedActivity { id, name }) if !self.strict => {
                warn!(
                    activity_id = id,
                    activity_name = %name,
                    "skipping unclassifiable activity"
                );
                report.skipped.push(SkippedActivity {
                    id,
                    name,
                    reason: "no known activity type".to_string(),
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for BatchCompactor {
    fn default() -> Self {
        Self::new()
    }
}
