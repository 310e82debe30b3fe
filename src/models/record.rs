use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ActivityMetadata;

/// Five-point percentile summary of a channel's raw values. All fields are
/// null for a channel that carried no usable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileSet {
    pub p5: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub p95: Option<f64>,
}

impl QuantileSet {
    pub fn all_null() -> Self {
        Self {
            p5: None,
            p25: None,
            p50: None,
            p75: None,
            p95: None,
        }
    }

    /// Degenerate summary: every percentile equals the single available value.
    pub fn uniform(value: f64) -> Self {
        Self {
            p5: Some(value),
            p25: Some(value),
            p50: Some(value),
            p75: Some(value),
            p95: Some(value),
        }
    }

    pub fn is_null(&self) -> bool {
        self.p5.is_none()
            && self.p25.is_none()
            && self.p50.is_none()
            && self.p75.is_none()
            && self.p95.is_none()
    }

    /// Percentiles must be non-decreasing; holds for any input by
    /// construction, checked in integrity-style tests.
    pub fn is_ordered(&self) -> bool {
        let values = [self.p5, self.p25, self.p50, self.p75, self.p95];
        values
            .windows(2)
            .all(|w| match (w[0], w[1]) {
                (Some(a), Some(b)) => a <= b,
                (None, None) => true,
                _ => false,
            })
    }
}

/// One self-contained output record: exactly the three top-level keys of the
/// file contract. One line of the JSONL output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub metadata: ActivityMetadata,
    pub streams_compact: BTreeMap<String, String>,
    pub quantiles: BTreeMap<String, QuantileSet>,
}

impl ActivityRecord {
    pub fn new(
        metadata: ActivityMetadata,
        streams_compact: BTreeMap<String, String>,
        quantiles: BTreeMap<String, QuantileSet>,
    ) -> Self {
        Self {
            metadata,
            streams_compact,
            quantiles,
        }
    }

    pub fn id(&self) -> u64 {
        self.metadata.id
    }

    pub fn channel_count(&self) -> usize {
        self.streams_compact.len()
    }

    pub fn has_channel(&self, compact_key: &str) -> bool {
        self.streams_compact.contains_key(compact_key)
    }
}
