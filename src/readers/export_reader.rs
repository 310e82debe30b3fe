use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CompactionError, Result};
use crate::models::{ActivityMetadata, RawStream, StreamSample, StreamSet};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, EXPORT_EXTENSION, STREAM_LATLNG, STREAM_TIME};

/// One materialized fetch-layer document: activity metadata plus its raw
/// streams, ready for compaction.
#[derive(Debug, Clone)]
pub struct ActivityExport {
    pub metadata: ActivityMetadata,
    pub streams: StreamSet,
}

/// On-disk export shape: metadata fields at the top level, streams as the
/// fetch layer returns them, index-aligned arrays keyed by type.
#[derive(Debug, Deserialize)]
struct RawExportDoc {
    #[serde(flatten)]
    metadata: ActivityMetadata,
    #[serde(default)]
    streams: Vec<RawStreamEntry>,
}

#[derive(Debug, Deserialize)]
struct RawStreamEntry {
    #[serde(rename = "type")]
    stream_type: String,
    #[serde(default)]
    data: Vec<Value>,
}

/// Parses activity-export JSON documents, the boundary to the out-of-scope
/// fetch layer. Directory reads are ordered by file name so batch output
/// order is deterministic.
pub struct ExportReader;

impl ExportReader {
    pub fn new() -> Self {
        Self
    }

    /// Read one export document.
    pub fn read_activity_file(&self, path: &Path) -> Result<ActivityExport> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);

        let doc: RawExportDoc =
            serde_json::from_reader(reader).map_err(|e| CompactionError::InvalidFormat {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::assemble(doc, path)
    }

    /// Read every `.json` document in a directory, sorted by file name.
    pub fn read_export_dir(&self, dir: &Path) -> Result<Vec<ActivityExport>> {
        self.stream_exports(dir)?.collect()
    }

    /// Stream export documents one at a time (memory bounded by one
    /// activity).
    pub fn stream_exports(&self, dir: &Path) -> Result<ExportIterator> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == EXPORT_EXTENSION)
            })
            .collect();
        paths.sort();

        Ok(ExportIterator {
            paths: paths.into_iter(),
        })
    }

    fn assemble(doc: RawExportDoc, path: &Path) -> Result<ActivityExport> {
        let invalid = |message: String| CompactionError::InvalidFormat {
            path: path.display().to_string(),
            message,
        };

        // Timestamps come from the time stream; without one, samples are
        // assumed to be at the device's nominal 1 Hz
        let timestamps: Option<Vec<f64>> = doc
            .streams
            .iter()
            .find(|entry| entry.stream_type == STREAM_TIME)
            .map(|entry| {
                entry
                    .data
                    .iter()
                    .map(|v| {
                        v.as_f64().ok_or_else(|| {
                            invalid(format!("non-numeric value in time stream: {v}"))
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .transpose()?;

        let mut streams = StreamSet::new();
        for entry in doc.streams {
            if entry.stream_type == STREAM_LATLNG {
                continue;
            }

            let stream =
                Self::assemble_channel(&entry, timestamps.as_deref()).map_err(|message| {
                    invalid(format!("stream '{}': {}", entry.stream_type, message))
                })?;
            streams.insert(entry.stream_type, stream);
        }

        Ok(ActivityExport {
            metadata: doc.metadata,
            streams,
        })
    }

    /// Align one channel to the time stream: shorter arrays are padded with
    /// nulls, longer ones truncated; booleans become 1.0/0.0.
    fn assemble_channel(
        entry: &RawStreamEntry,
        timestamps: Option<&[f64]>,
    ) -> std::result::Result<RawStream, String> {
        let len = timestamps.map_or(entry.data.len(), <[f64]>::len);

        (0..len)
            .map(|i| {
                let timestamp = timestamps.map_or(i as f64, |ts| ts[i]);
                let value = match entry.data.get(i) {
                    None | Some(Value::Null) => None,
                    Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
                    Some(Value::Number(n)) => Some(
                        n.as_f64()
                            .ok_or_else(|| format!("unrepresentable number at index {i}"))?,
                    ),
                    Some(other) => return Err(format!("non-scalar value at index {i}: {other}")),
                };
                Ok(StreamSample::new(timestamp, value))
            })
            .collect()
    }
}

impl Default for ExportReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over export documents in a directory, file-name order.
pub struct ExportIterator {
    paths: std::vec::IntoIter<PathBuf>,
}

impl Iterator for ExportIterator {
    type Item = Result<ActivityExport>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(ExportReader::new().read_activity_file(&path))
    }
}
