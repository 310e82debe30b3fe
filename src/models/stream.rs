use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{STREAM_MOVING, STREAM_TIME};

/// One raw sample of a channel: timestamp in seconds from activity start,
/// value absent where the sensor recorded nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamSample {
    pub timestamp: f64,
    pub value: Option<f64>,
}

impl StreamSample {
    pub fn new(timestamp: f64, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }
}

/// One channel of an activity at its native, irregular sampling.
pub type RawStream = Vec<StreamSample>;

/// All raw channels of one activity, keyed by the fetch layer's stream type
/// names. Channels are index-aligned to the time channel by the reader.
#[derive(Debug, Clone, Default)]
pub struct StreamSet {
    channels: BTreeMap<String, RawStream>,
}

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, stream: RawStream) {
        self.channels.insert(name.into(), stream);
    }

    pub fn get(&self, name: &str) -> Option<&RawStream> {
        self.channels.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of raw samples, taken from the time channel.
    pub fn sample_count(&self) -> usize {
        self.channels.get(STREAM_TIME).map_or(0, Vec::len)
    }

    /// Activity duration in seconds: the time channel's max timestamp.
    pub fn duration_secs(&self) -> Option<f64> {
        let time = self.channels.get(STREAM_TIME)?;
        time.iter()
            .map(|s| s.timestamp)
            .fold(None, |acc: Option<f64>, t| {
                Some(acc.map_or(t, |a| a.max(t)))
            })
    }

    /// Drop samples where the moving mask is 0 or absent, across every
    /// channel. Timestamps are preserved, not re-based. A set without a
    /// moving channel is returned unchanged.
    pub fn filter_moving(&self) -> StreamSet {
        let Some(moving) = self.channels.get(STREAM_MOVING) else {
            return self.clone();
        };

        let keep: Vec<bool> = moving
            .iter()
            .map(|s| matches!(s.value, Some(v) if v != 0.0))
            .collect();

        let mut filtered = StreamSet::new();
        for (name, stream) in &self.channels {
            let kept: RawStream = stream
                .iter()
                .enumerate()
                .filter(|(i, _)| keep.get(*i).copied().unwrap_or(true))
                .map(|(_, s)| *s)
                .collect();
            filtered.insert(name.clone(), kept);
        }

        filtered
    }
}
