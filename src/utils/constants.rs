/// Raw stream type identifiers, as named by the fetch layer
pub const STREAM_TIME: &str = "time";
pub const STREAM_HEARTRATE: &str = "heartrate";
pub const STREAM_ALTITUDE: &str = "altitude";
pub const STREAM_CADENCE: &str = "cadence";
pub const STREAM_VELOCITY: &str = "velocity_smooth";
pub const STREAM_PACE: &str = "pace";
pub const STREAM_DISTANCE: &str = "distance";
pub const STREAM_MOVING: &str = "moving";
pub const STREAM_LATLNG: &str = "latlng";

/// Classification tokens (case-sensitive)
pub const RUNNING_TOKEN: &str = "Running";
pub const TREPPE_TOKEN: &str = "Treppe";
pub const STAIR_STEPPER_TOKEN: &str = "StairStepper";
pub const REST_TOKEN: &str = "Rest";

/// Sampling defaults
pub const DEFAULT_SAMPLE_INTERVAL_SECS: f64 = 5.0;

/// Percentile levels for channel summaries
pub const QUANTILE_LEVELS: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Output defaults
pub const DEFAULT_OUTPUT_DIR: &str = "streams";
pub const DEFAULT_LABEL: &str = "person";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Export file extension accepted by the directory reader
pub const EXPORT_EXTENSION: &str = "json";
