use crate::models::StreamSample;
use crate::utils::constants::DEFAULT_SAMPLE_INTERVAL_SECS;

/// Fixed-interval nearest-neighbor resampler.
///
/// For each output tick the nearest raw sample by timestamp is selected,
/// ties preferring the earlier sample. Interpolation is deliberately avoided
/// so every emitted value is an exact recorded reading. Ticks before the
/// first raw sample carry that sample's value; an empty stream produces all
/// nulls. Output length is always `ceil(duration / interval) + 1`.
pub struct StreamResampler {
    interval_secs: f64,
}

impl StreamResampler {
    pub fn new() -> Self {
        Self {
            interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
        }
    }

    pub fn with_interval(interval_secs: f64) -> Self {
        Self { interval_secs }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Number of output ticks spanning a duration: one per interval plus the
    /// tick at t = 0.
    pub fn tick_count(&self, duration_secs: f64) -> usize {
        (duration_secs / self.interval_secs).ceil() as usize + 1
    }

    /// Resample a raw stream onto the fixed grid. Never fails; gaps are
    /// explicit nulls, never truncation.
    pub fn resample(&self, stream: &[StreamSample], duration_secs: f64) -> Vec<Option<f64>> {
        let ticks = self.tick_count(duration_secs);

        if stream.is_empty() {
            return vec![None; ticks];
        }

        let mut output = Vec::with_capacity(ticks);
        let mut nearest = 0;

        for tick in 0..ticks {
            let t = tick as f64 * self.interval_secs;

            // Samples are time-ordered, so the nearest index only moves
            // forward as ticks advance. Strict comparison keeps the earlier
            // sample on ties.
            while nearest + 1 < stream.len()
                && (stream[nearest + 1].timestamp - t).abs() < (stream[nearest].timestamp - t).abs()
            {
                nearest += 1;
            }

            output.push(stream[nearest].value);
        }

        output
    }

    /// Render resampled values as the comma-joined compact form. The null
    /// token is the empty string.
    pub fn render_compact(values: &[Option<f64>]) -> String {
        values
            .iter()
            .map(|v| v.map(|x| x.to_string()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for StreamResampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<StreamSample> {
        pairs
            .iter()
            .map(|(t, v)| StreamSample::new(*t, Some(*v)))
            .collect()
    }

    #[test]
    fn test_output_length() {
        let resampler = StreamResampler::with_interval(5.0);
        assert_eq!(resampler.tick_count(0.0), 1);
        assert_eq!(resampler.tick_count(10.0), 3);
        assert_eq!(resampler.tick_count(11.0), 4);
        assert_eq!(resampler.tick_count(14.9), 4);

        let stream = samples(&[(0.0, 1.0)]);
        assert_eq!(resampler.resample(&stream, 11.0).len(), 4);
    }

    #[test]
    fn test_empty_stream_is_all_nulls() {
        let resampler = StreamResampler::with_interval(5.0);
        let output = resampler.resample(&[], 12.0);
        assert_eq!(output, vec![None, None, None, None]);
    }

    #[test]
    fn test_nearest_neighbor_selection() {
        let resampler = StreamResampler::with_interval(5.0);
        let stream = samples(&[(0.0, 10.0), (4.0, 14.0), (6.0, 16.0), (11.0, 21.0)]);

        let output = resampler.resample(&stream, 11.0);
        assert_eq!(output[0], Some(10.0)); // tick 0s -> sample at 0.0s
        assert_eq!(output[1], Some(14.0)); // tick 5s -> sample at 4.0s
        assert_eq!(output[2], Some(21.0)); // tick 10s -> sample at 11.0s
    }

    #[test]
    fn test_ties_prefer_earlier_sample() {
        let resampler = StreamResampler::with_interval(5.0);
        // 4.0 and 6.0 are equidistant from tick 5
        let stream = samples(&[(4.0, 14.0), (6.0, 16.0)]);
        let output = resampler.resample(&stream, 6.0);
        assert_eq!(output[1], Some(14.0));
    }

    #[test]
    fn test_leading_ticks_forward_fill() {
        let resampler = StreamResampler::with_interval(5.0);
        // Sensor warmed up late: first sample at 12s
        let stream = samples(&[(12.0, 95.0), (20.0, 110.0)]);
        let output = resampler.resample(&stream, 20.0);
        assert_eq!(output[0], Some(95.0));
        assert_eq!(output[1], Some(95.0));
        assert_eq!(output[4], Some(110.0));
    }

    #[test]
    fn test_null_values_propagate() {
        let resampler = StreamResampler::with_interval(5.0);
        let stream = vec![
            StreamSample::new(0.0, Some(1.0)),
            StreamSample::new(5.0, None),
            StreamSample::new(10.0, Some(3.0)),
        ];
        let output = resampler.resample(&stream, 10.0);
        assert_eq!(output, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_resampling_is_idempotent() {
        let resampler = StreamResampler::with_interval(5.0);
        let stream = samples(&[(0.0, 10.0), (3.0, 13.0), (7.0, 17.0), (13.0, 23.0)]);
        let duration = 13.0;

        let first = resampler.resample(&stream, duration);

        // Feed the output back in as a stream sampled exactly on the grid
        let regridded: Vec<StreamSample> = first
            .iter()
            .enumerate()
            .map(|(i, v)| StreamSample::new(i as f64 * 5.0, *v))
            .collect();
        let grid_duration = (first.len() - 1) as f64 * 5.0;
        let second = resampler.resample(&regridded, grid_duration);

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_compact_with_null_token() {
        let values = vec![Some(142.0), None, Some(138.5)];
        assert_eq!(StreamResampler::render_compact(&values), "142,,138.5");
    }

    #[test]
    fn test_render_compact_empty() {
        assert_eq!(StreamResampler::render_compact(&[]), "");
    }
}
