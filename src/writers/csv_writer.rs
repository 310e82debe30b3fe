use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ActivityMetadata, StreamSet};
use crate::utils::constants::STREAM_TIME;
use crate::utils::filename::activity_csv_filename;

/// Writes one CSV file per activity containing the raw, index-aligned stream
/// table: the time channel first, the remaining channels in name order, one
/// row per raw sample, empty cells for nulls.
pub struct CsvStreamWriter;

impl CsvStreamWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write an activity's raw streams to `<output_dir>/streams_<label>_activity_<id>.csv`.
    pub fn write_activity_streams(
        &self,
        metadata: &ActivityMetadata,
        streams: &StreamSet,
        label: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(activity_csv_filename(label, metadata.id));

        let mut columns: Vec<&str> = streams
            .channel_names()
            .filter(|name| *name != STREAM_TIME)
            .collect();
        columns.insert(0, STREAM_TIME);

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&columns)?;

        let rows = streams.sample_count();
        for row in 0..rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|name| {
                    streams
                        .get(name)
                        .and_then(|stream| stream.get(row))
                        .and_then(|sample| sample.value)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                })
                .collect();
            writer.write_record(&cells)?;
        }

        writer.flush()?;
        Ok(path)
    }
}

impl Default for CsvStreamWriter {
    fn default() -> Self {
        Self::new()
    }
}
