use std::collections::BTreeMap;

use validator::Validate;

use crate::error::Result;
use crate::models::{ActivityMetadata, ActivityRecord, ActivityType, StreamSample, StreamSet};
use crate::processors::channels::{channels_for, Channel};
use crate::processors::classifier::ActivityClassifier;
use crate::processors::quantiles::QuantileSummarizer;
use crate::processors::resampler::StreamResampler;
use crate::utils::constants::{STREAM_PACE, STREAM_VELOCITY};

/// Composes one `ActivityRecord` from metadata and raw streams: classify,
/// filter, resample and summarize each canonical channel present. Channels
/// absent from the raw data are omitted from the output entirely, never
/// emitted as null-filled placeholders.
pub struct RecordBuilder {
    resampler: StreamResampler,
    summarizer: QuantileSummarizer,
    classifier: ActivityClassifier,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            resampler: StreamResampler::new(),
            summarizer: QuantileSummarizer::new(),
            classifier: ActivityClassifier::new(),
        }
    }

    pub fn with_interval(interval_secs: f64) -> Self {
        Self {
            resampler: StreamResampler::with_interval(interval_secs),
            summarizer: QuantileSummarizer::new(),
            classifier: ActivityClassifier::new(),
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.resampler.interval_secs()
    }

    /// Build the record for one activity. Returns the classified type
    /// alongside the record for batch-level reporting.
    pub fn build_record(
        &self,
        metadata: &ActivityMetadata,
        streams: &StreamSet,
    ) -> Result<(ActivityRecord, ActivityType)> {
        metadata.validate()?;
        let activity_type = self.classifier.classify(metadata)?;

        // Running streams keep only samples where movement was detected
        let streams = if activity_type.is_running() {
            streams.filter_moving()
        } else {
            streams.clone()
        };
        let streams = Self::derive_pace_if_needed(streams, activity_type);

        // Duration from the time channel's max timestamp; a missing time
        // channel falls back to the metadata's elapsed time
        let duration_secs = streams
            .duration_secs()
            .unwrap_or(metadata.elapsed_time as f64);

        let mut streams_compact = BTreeMap::new();
        let mut quantiles = BTreeMap::new();

        for spec in channels_for(activity_type) {
            let Some(raw) = streams.get(spec.channel.raw_key()) else {
                continue;
            };

            let resampled = self.resampler.resample(raw, duration_secs);
            streams_compact.insert(
                spec.channel.compact_key(),
                StreamResampler::render_compact(&resampled),
            );
            quantiles.insert(
                spec.channel.quantile_key().to_string(),
                self.summarizer.summarize(raw),
            );
        }

        let record = ActivityRecord::new(metadata.clone(), streams_compact, quantiles);
        Ok((record, activity_type))
    }

    /// Pace in s/km derived per-sample from velocity when the activity type
    /// expects pace and the fetch layer supplied none. Non-positive velocity
    /// yields a null pace sample.
    fn derive_pace_if_needed(mut streams: StreamSet, activity_type: ActivityType) -> StreamSet {
        let wants_pace = channels_for(activity_type)
            .iter()
            .any(|spec| spec.channel == Channel::Pace);

        if !wants_pace || streams.contains(STREAM_PACE) {
            return streams;
        }

        let Some(velocity) = streams.get(STREAM_VELOCITY) else {
            return streams;
        };

        let pace: Vec<StreamSample> = velocity
            .iter()
            .map(|s| {
                let value = s
                    .value
                    .and_then(|v| if v > 0.0 { Some(1000.0 / v) } else { None });
                StreamSample::new(s.timestamp, value)
            })
            .collect();

        streams.insert(STREAM_PACE, pace);
        streams
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompactionError;
    use crate::models::Intensity;
    use chrono::{TimeZone, Utc};

    fn metadata(name: &str) -> ActivityMetadata {
        ActivityMetadata {
            id: 42,
            name: name.to_string(),
            sport_type: "Run".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 9, 7, 6, 30, 0).unwrap(),
            distance: 4000.0,
            moving_time: 1200,
            elapsed_time: 1260,
            total_elevation_gain: 30.0,
            average_speed: 3.3,
            max_speed: 4.5,
            calories: None,
            average_heartrate: Some(150.0),
            max_heartrate: Some(175.0),
            kudos_count: 0,
            comment_count: 0,
            achievement_count: 0,
            trainer: false,
            commute: false,
            manual: false,
        }
    }

    fn channel(values: &[f64]) -> Vec<StreamSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| StreamSample::new(i as f64, Some(*v)))
            .collect()
    }

    fn time_channel(up_to: usize) -> Vec<StreamSample> {
        (0..=up_to)
            .map(|t| StreamSample::new(t as f64, Some(t as f64)))
            .collect()
    }

    #[test]
    fn test_rest_record_omits_missing_channels() {
        let mut streams = StreamSet::new();
        streams.insert("time", time_channel(20));
        streams.insert("heartrate", channel(&[80.0; 21]));

        let builder = RecordBuilder::new();
        let (record, activity_type) = builder
            .build_record(&metadata("Idle Rest"), &streams)
            .unwrap();

        assert_eq!(activity_type, ActivityType::Rest);
        assert!(record.has_channel("hr_bpm_csv"));
        assert!(record.has_channel("time_s_csv"));
        assert!(!record.has_channel("alt_m_csv"));
        assert!(!record.quantiles.contains_key("alt_m"));
        assert_eq!(record.channel_count(), 2);
    }

    #[test]
    fn test_running_record_derives_pace_from_velocity() {
        let mut streams = StreamSet::new();
        streams.insert("time", time_channel(10));
        streams.insert("heartrate", channel(&[150.0; 11]));
        streams.insert("velocity_smooth", channel(&[2.5; 11]));

        let builder = RecordBuilder::new();
        let (record, _) = builder
            .build_record(&metadata("Running 3"), &streams)
            .unwrap();

        assert!(record.has_channel("pace_s_per_km_csv"));
        // 1000 / 2.5 m/s = 400 s/km at every tick
        let pace = &record.streams_compact["pace_s_per_km_csv"];
        assert_eq!(pace, "400,400,400");
        assert_eq!(record.quantiles["pace_s_per_km"].p50, Some(400.0));
    }

    #[test]
    fn test_existing_pace_channel_is_not_overwritten() {
        let mut streams = StreamSet::new();
        streams.insert("time", time_channel(10));
        streams.insert("pace", channel(&[350.0; 11]));
        streams.insert("velocity_smooth", channel(&[2.5; 11]));

        let builder = RecordBuilder::new();
        let (record, _) = builder
            .build_record(&metadata("Running 3"), &streams)
            .unwrap();

        assert_eq!(record.quantiles["pace_s_per_km"].p50, Some(350.0));
    }

    #[test]
    fn test_running_applies_moving_filter() {
        let mut streams = StreamSet::new();
        streams.insert("time", time_channel(10));
        // Heart rate spikes only while standing still; the filter drops it
        let mut hr = channel(&[140.0; 11]);
        hr[5] = StreamSample::new(5.0, Some(200.0));
        streams.insert("heartrate", hr);
        let mut moving: Vec<StreamSample> =
            (0..=10).map(|t| StreamSample::new(t as f64, Some(1.0))).collect();
        moving[5] = StreamSample::new(5.0, Some(0.0));
        streams.insert("moving", moving);

        let builder = RecordBuilder::new();
        let (record, _) = builder
            .build_record(&metadata("Running 4"), &streams)
            .unwrap();

        assert_eq!(record.quantiles["hr_bpm"].p95, Some(140.0));
    }

    #[test]
    fn test_rest_ignores_moving_mask() {
        let mut streams = StreamSet::new();
        streams.insert("time", time_channel(4));
        streams.insert("heartrate", channel(&[70.0, 71.0, 72.0, 73.0, 74.0]));
        streams.insert(
            "moving",
            (0..=4).map(|t| StreamSample::new(t as f64, Some(0.0))).collect(),
        );

        let builder = RecordBuilder::new();
        let (record, _) = builder.build_record(&metadata("Idle Rest"), &streams).unwrap();

        // All five samples survive for a rest session
        assert_eq!(record.quantiles["hr_bpm"].p50, Some(72.0));
    }

    #[test]
    fn test_unclassified_activity_propagates() {
        let streams = StreamSet::new();
        let builder = RecordBuilder::new();
        let err = builder.build_record(&metadata("Yoga"), &streams).unwrap_err();
        assert!(matches!(
            err,
            CompactionError::UnclassifiedActivity { id: 42, .. }
        ));
    }

    #[test]
    fn test_duration_fallback_without_time_channel() {
        let mut streams = StreamSet::new();
        streams.insert("heartrate", channel(&[150.0; 3]));

        let builder = RecordBuilder::with_interval(60.0);
        let mut meta = metadata("Running 1");
        meta.elapsed_time = 120;
        let (record, activity_type) = builder.build_record(&meta, &streams).unwrap();

        assert_eq!(
            activity_type,
            ActivityType::Running {
                intensity: Intensity::Low
            }
        );
        // 120 s at 60 s interval: ticks at 0, 60, 120
        let hr = &record.streams_compact["hr_bpm_csv"];
        assert_eq!(hr.split(',').count(), 3);
        assert!(!record.has_channel("time_s_csv"));
    }
}
