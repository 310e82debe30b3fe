use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::ActivityRecord;

/// Writes activity records as line-delimited JSON: one compact object per
/// line, each terminated by `\n`, in the order received.
///
/// The target file is created or overwritten. The handle is released on every
/// exit path; a mid-stream failure leaves the partial file on disk. Zero
/// records produce a zero-byte file, not an error.
pub struct JsonlWriter;

impl JsonlWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a sequence of records to `path`. The sequence is consumed
    /// lazily, so memory stays bounded by one record at a time. Returns the
    /// number of lines written.
    pub fn write_records<I>(&self, records: I, path: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = ActivityRecord>,
    {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for record in records {
            serde_json::to_writer(&mut writer, &record)?;
            writer.write_all(b"\n")?;
            count += 1;
        }

        writer.flush()?;
        Ok(count)
    }

    /// Read records back, one JSON object per line. Used by the info command
    /// and round-trip tests.
    pub fn read_records(&self, path: &Path) -> Result<Vec<ActivityRecord>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }

        Ok(records)
    }
}

impl Default for JsonlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityMetadata, QuantileSet};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn record(id: u64, name: &str) -> ActivityRecord {
        let metadata = ActivityMetadata {
            id,
            name: name.to_string(),
            sport_type: "Run".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 9, 7, 6, 0, 0).unwrap(),
            distance: 1000.0,
            moving_time: 600,
            elapsed_time: 600,
            total_elevation_gain: 0.0,
            average_speed: 1.6,
            max_speed: 2.0,
            calories: None,
            average_heartrate: None,
            max_heartrate: None,
            kudos_count: 0,
            comment_count: 0,
            achievement_count: 0,
            trainer: false,
            commute: false,
            manual: false,
        };

        let mut streams_compact = BTreeMap::new();
        streams_compact.insert("hr_bpm_csv".to_string(), "120,,135".to_string());
        let mut quantiles = BTreeMap::new();
        quantiles.insert("hr_bpm".to_string(), QuantileSet::uniform(127.5));

        ActivityRecord::new(metadata, streams_compact, quantiles)
    }

    #[test]
    fn test_write_and_read_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.jsonl");

        let writer = JsonlWriter::new();
        let records = vec![record(3, "Running 1"), record(1, "Running 2"), record(2, "Idle Rest")];
        let written = writer.write_records(records, &path).unwrap();
        assert_eq!(written, 3);

        let read_back = writer.read_records(&path).unwrap();
        let ids: Vec<u64> = read_back.iter().map(ActivityRecord::id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_file_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.jsonl");

        JsonlWriter::new()
            .write_records(vec![record(1, "Running 1"), record(2, "Running 2")], &path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(!line.is_empty());
            // Compact single-line objects with the three contract keys
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("metadata").is_some());
            assert!(value.get("streams_compact").is_some());
            assert!(value.get("quantiles").is_some());
            assert_eq!(value.as_object().unwrap().len(), 3);
        }
    }

    #[test]
    fn test_zero_records_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");

        let written = JsonlWriter::new()
            .write_records(Vec::new(), &path)
            .unwrap();

        assert_eq!(written, 0);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_rerun_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.jsonl");
        let writer = JsonlWriter::new();

        writer
            .write_records(vec![record(1, "Running 1"), record(2, "Running 2")], &path)
            .unwrap();
        writer.write_records(vec![record(9, "Running 3")], &path).unwrap();

        let read_back = writer.read_records(&path).unwrap();
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].id(), 9);
    }
}
