use crate::models::{QuantileSet, StreamSample};
use crate::utils::constants::QUANTILE_LEVELS;

/// Percentile summary over a channel's raw (pre-resample) values.
///
/// Uses linear interpolation between order statistics. Degenerate inputs are
/// not errors: a single value yields five equal percentiles, zero values an
/// all-null set.
pub struct QuantileSummarizer;

impl QuantileSummarizer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, stream: &[StreamSample]) -> QuantileSet {
        let mut values: Vec<f64> = stream.iter().filter_map(|s| s.value).collect();

        if values.is_empty() {
            return QuantileSet::all_null();
        }
        if values.len() == 1 {
            return QuantileSet::uniform(values[0]);
        }

        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let [p5, p25, p50, p75, p95] = QUANTILE_LEVELS.map(|pct| Self::percentile(&values, pct));

        QuantileSet {
            p5: Some(p5),
            p25: Some(p25),
            p50: Some(p50),
            p75: Some(p75),
            p95: Some(p95),
        }
    }

    /// Linear interpolation at rank `pct/100 * (n-1)` over sorted values.
    fn percentile(sorted: &[f64], pct: f64) -> f64 {
        let rank = pct / 100.0 * (sorted.len() - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;

        if lower == upper {
            sorted[lower]
        } else {
            let fraction = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

impl Default for QuantileSummarizer {
    fn default() -> Self {
        Self::new()
    }
}
