pub mod activity;
pub mod record;
pub mod stream;

pub use activity::{ActivityMetadata, ActivityType, Intensity};
pub use record::{ActivityRecord, QuantileSet};
pub use stream::{RawStream, StreamSample, StreamSet};
