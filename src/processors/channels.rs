use crate::models::{ActivityType, StreamSet};
use crate::utils::constants::{
    STREAM_ALTITUDE, STREAM_CADENCE, STREAM_DISTANCE, STREAM_HEARTRATE, STREAM_PACE, STREAM_TIME,
    STREAM_VELOCITY,
};

/// Canonical channels an activity record can carry. The `moving` mask and
/// positional streams are auxiliary input and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Time,
    HeartRate,
    Altitude,
    Pace,
    Velocity,
    Cadence,
    Distance,
}

impl Channel {
    /// Stream type name used by the fetch layer.
    pub fn raw_key(&self) -> &'static str {
        match self {
            Channel::Time => STREAM_TIME,
            Channel::HeartRate => STREAM_HEARTRATE,
            Channel::Altitude => STREAM_ALTITUDE,
            Channel::Pace => STREAM_PACE,
            Channel::Velocity => STREAM_VELOCITY,
            Channel::Cadence => STREAM_CADENCE,
            Channel::Distance => STREAM_DISTANCE,
        }
    }

    /// Unit-bearing output name; quantile map key.
    pub fn quantile_key(&self) -> &'static str {
        match self {
            Channel::Time => "time_s",
            Channel::HeartRate => "hr_bpm",
            Channel::Altitude => "alt_m",
            Channel::Pace => "pace_s_per_km",
            Channel::Velocity => "velocity_mps",
            Channel::Cadence => "cadence_spm",
            Channel::Distance => "distance_m",
        }
    }

    /// Compact-stream map key.
    pub fn compact_key(&self) -> String {
        format!("{}_csv", self.quantile_key())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub required: bool,
}

const fn required(channel: Channel) -> ChannelSpec {
    ChannelSpec {
        channel,
        required: true,
    }
}

const fn optional(channel: Channel) -> ChannelSpec {
    ChannelSpec {
        channel,
        required: false,
    }
}

const RUNNING_CHANNELS: &[ChannelSpec] = &[
    required(Channel::Time),
    required(Channel::HeartRate),
    required(Channel::Altitude),
    required(Channel::Pace),
    required(Channel::Velocity),
    required(Channel::Cadence),
    optional(Channel::Distance),
];

const TREPPE_CHANNELS: &[ChannelSpec] = &[
    required(Channel::Time),
    required(Channel::HeartRate),
    required(Channel::Altitude),
    required(Channel::Cadence),
    optional(Channel::Distance),
];

const REST_CHANNELS: &[ChannelSpec] = &[required(Channel::Time), required(Channel::HeartRate)];

/// Ordered canonical channel table for an activity type. Pure lookup.
pub fn channels_for(activity_type: ActivityType) -> &'static [ChannelSpec] {
    match activity_type {
        ActivityType::Running { .. } => RUNNING_CHANNELS,
        ActivityType::Treppe => TREPPE_CHANNELS,
        ActivityType::Rest => REST_CHANNELS,
    }
}

/// Required channels the raw data does not carry. Pace counts as available
/// when velocity is present, since it is derived from it. Reported, never
/// fabricated.
pub fn missing_required(activity_type: ActivityType, streams: &StreamSet) -> Vec<Channel> {
    channels_for(activity_type)
        .iter()
        .filter(|spec| {
            if !spec.required || streams.contains(spec.channel.raw_key()) {
                return false;
            }
            !(spec.channel == Channel::Pace && streams.contains(Channel::Velocity.raw_key()))
        })
        .map(|spec| spec.channel)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Intensity, StreamSample};

    #[test]
    fn test_channel_tables_per_type() {
        let running = channels_for(ActivityType::Running {
            intensity: Intensity::Low,
        });
        assert_eq!(running.len(), 7);
        assert_eq!(running[0].channel, Channel::Time);
        assert!(running
            .iter()
            .any(|s| s.channel == Channel::Pace && s.required));

        let treppe = channels_for(ActivityType::Treppe);
        assert_eq!(treppe.len(), 5);
        assert!(!treppe.iter().any(|s| s.channel == Channel::Pace));

        let rest = channels_for(ActivityType::Rest);
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|s| s.required));
    }

    #[test]
    fn test_output_key_naming() {
        assert_eq!(Channel::HeartRate.compact_key(), "hr_bpm_csv");
        assert_eq!(Channel::Altitude.compact_key(), "alt_m_csv");
        assert_eq!(Channel::Pace.compact_key(), "pace_s_per_km_csv");
        assert_eq!(Channel::HeartRate.quantile_key(), "hr_bpm");
        assert_eq!(Channel::Velocity.raw_key(), "velocity_smooth");
    }

    #[test]
    fn test_missing_required_channels() {
        let mut streams = StreamSet::new();
        streams.insert("time", vec![StreamSample::new(0.0, Some(0.0))]);

        let missing = missing_required(ActivityType::Rest, &streams);
        assert_eq!(missing, vec![Channel::HeartRate]);

        streams.insert("heartrate", vec![StreamSample::new(0.0, Some(120.0))]);
        assert!(missing_required(ActivityType::Rest, &streams).is_empty());
    }

    #[test]
    fn test_pace_derivable_from_velocity_is_not_missing() {
        let mut streams = StreamSet::new();
        for key in ["time", "heartrate", "altitude", "velocity_smooth", "cadence"] {
            streams.insert(key, vec![StreamSample::new(0.0, Some(1.0))]);
        }

        let missing = missing_required(
            ActivityType::Running {
                intensity: Intensity::High,
            },
            &streams,
        );
        assert!(missing.is_empty());
    }
}
