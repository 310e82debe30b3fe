use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Activity metadata as delivered by the fetch layer. Field names follow the
/// upstream API so records pass through to output untransformed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivityMetadata {
    pub id: u64,

    #[validate(length(min = 1))]
    pub name: String,

    #[serde(rename = "type", default)]
    pub sport_type: String,

    pub start_date: DateTime<Utc>,

    /// Total distance in meters.
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub distance: f64,

    /// Moving time in seconds.
    #[serde(default)]
    pub moving_time: u32,

    /// Elapsed time in seconds.
    #[serde(default)]
    pub elapsed_time: u32,

    #[serde(default)]
    pub total_elevation_gain: f64,

    /// Average speed in m/s.
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub average_speed: f64,

    /// Max speed in m/s.
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub max_speed: f64,

    #[serde(default)]
    pub calories: Option<f64>,

    #[serde(default)]
    pub average_heartrate: Option<f64>,

    #[serde(default)]
    pub max_heartrate: Option<f64>,

    #[serde(default)]
    pub kudos_count: u32,

    #[serde(default)]
    pub comment_count: u32,

    #[serde(default)]
    pub achievement_count: u32,

    #[serde(default)]
    pub trainer: bool,

    #[serde(default)]
    pub commute: bool,

    #[serde(default)]
    pub manual: bool,
}

impl ActivityMetadata {
    /// Average pace in seconds per kilometer, from moving time and distance.
    pub fn average_pace_s_per_km(&self) -> Option<f64> {
        if self.distance > 0.0 && self.moving_time > 0 {
            Some(self.moving_time as f64 / (self.distance / 1000.0))
        } else {
            None
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Low,
    High,
}

/// Closed set of recognized activity categories. Classification from the
/// activity name is in `processors::classifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Running { intensity: Intensity },
    Treppe,
    Rest,
}

impl ActivityType {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Running {
                intensity: Intensity::Low,
            } => "running_low",
            ActivityType::Running {
                intensity: Intensity::High,
            } => "running_high",
            ActivityType::Treppe => "treppe",
            ActivityType::Rest => "rest",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ActivityType::Running { .. })
    }
}
