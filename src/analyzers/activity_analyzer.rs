use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{CompactionError, Result};
use crate::models::{ActivityRecord, ActivityType, Intensity};
use crate::processors::ActivityClassifier;
use crate::writers::JsonlWriter;

/// Aggregate statistics over a set of built activity records, rendered by
/// the `info` command.
#[derive(Debug)]
pub struct ActivitySummary {
    pub total_activities: usize,
    pub running_low: usize,
    pub running_high: usize,
    pub treppe: usize,
    pub rest: usize,
    pub unclassified: usize,
    pub total_distance_km: f64,
    pub average_distance_km: f64,
    pub total_moving_time_hours: f64,
    pub total_elevation_gain_m: f64,
    pub average_pace_s_per_km: Option<f64>,
    pub average_heartrate: Option<f64>,
    pub date_range: (DateTime<Utc>, DateTime<Utc>),
}

impl ActivitySummary {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Activity Summary ===\n");
        summary.push_str(&format!("Total Activities: {}\n", self.total_activities));
        summary.push_str(&format!(
            "  Running (lower paced): {}\n",
            self.running_low
        ));
        summary.push_str(&format!(
            "  Running (higher paced): {}\n",
            self.running_high
        ));
        summary.push_str(&format!("  Stair climbing: {}\n", self.treppe));
        summary.push_str(&format!("  Rest: {}\n", self.rest));
        if self.unclassified > 0 {
            summary.push_str(&format!("  Unclassified: {}\n", self.unclassified));
        }

        summary.push_str(&format!(
            "Total Distance: {:.2} km (avg {:.2} km)\n",
            self.total_distance_km, self.average_distance_km
        ));
        summary.push_str(&format!(
            "Total Moving Time: {:.1} h\n",
            self.total_moving_time_hours
        ));
        summary.push_str(&format!(
            "Total Elevation Gain: {:.0} m\n",
            self.total_elevation_gain_m
        ));

        if let Some(pace) = self.average_pace_s_per_km {
            summary.push_str(&format!(
                "Average Pace: {:.0}:{:02.0} min/km\n",
                (pace / 60.0).floor(),
                pace % 60.0
            ));
        }
        if let Some(hr) = self.average_heartrate {
            summary.push_str(&format!("Average Heart Rate: {:.0} bpm\n", hr));
        }

        summary.push_str(&format!(
            "Date Range: {} to {}\n",
            self.date_range.0.format("%Y-%m-%d"),
            self.date_range.1.format("%Y-%m-%d")
        ));

        summary
    }
}

pub struct ActivityAnalyzer {
    classifier: ActivityClassifier,
}

impl ActivityAnalyzer {
    pub fn new() -> Self {
        Self {
            classifier: ActivityClassifier::new(),
        }
    }

    /// Summarize an existing JSONL stream file.
    pub fn analyze_jsonl(&self, path: &Path) -> Result<ActivitySummary> {
        let records = JsonlWriter::new().read_records(path)?;
        self.calculate_summary(&records)
    }

    pub fn calculate_summary(&self, records: &[ActivityRecord]) -> Result<ActivitySummary> {
        if records.is_empty() {
            return Err(CompactionError::MissingData(
                "no records to analyze".to_string(),
            ));
        }

        let mut summary = ActivitySummary {
            total_activities: records.len(),
            running_low: 0,
            running_high: 0,
            treppe: 0,
            rest: 0,
            unclassified: 0,
            total_distance_km: 0.0,
            average_distance_km: 0.0,
            total_moving_time_hours: 0.0,
            total_elevation_gain_m: 0.0,
            average_pace_s_per_km: None,
            average_heartrate: None,
            date_range: (records[0].metadata.start_date, records[0].metadata.start_date),
        };

        let mut pace_sum = 0.0;
        let mut pace_count = 0usize;
        let mut hr_sum = 0.0;
        let mut hr_count = 0usize;

        for record in records {
            let meta = &record.metadata;

            match self.classifier.classify(meta) {
                Ok(ActivityType::Running {
                    intensity: Intensity::Low,
                }) => summary.running_low += 1,
                Ok(ActivityType::Running {
                    intensity: Intensity::High,
                }) => summary.running_high += 1,
                Ok(ActivityType::Treppe) => summary.treppe += 1,
                Ok(ActivityType::Rest) => summary.rest += 1,
                Err(_) => summary.unclassified += 1,
            }

            summary.total_distance_km += meta.distance_km();
            summary.total_moving_time_hours += meta.moving_time as f64 / 3600.0;
            summary.total_elevation_gain_m += meta.total_elevation_gain;

            if let Some(pace) = meta.average_pace_s_per_km() {
                pace_sum += pace;
                pace_count += 1;
            }
            if let Some(hr) = meta.average_heartrate {
                hr_sum += hr;
                hr_count += 1;
            }

            if meta.start_date < summary.date_range.0 {
                summary.date_range.0 = meta.start_date;
            }
            if meta.start_date > summary.date_range.1 {
                summary.date_range.1 = meta.start_date;
            }
        }

        summary.average_distance_km = summary.total_distance_km / records.len() as f64;
        if pace_count > 0 {
            summary.average_pace_s_per_km = Some(pace_sum / pace_count as f64);
        }
        if hr_count > 0 {
            summary.average_heartrate = Some(hr_sum / hr_count as f64);
        }

        Ok(summary)
    }
}

impl Default for ActivityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
