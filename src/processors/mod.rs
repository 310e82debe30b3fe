pub mod batch;
pub mod channels;
pub mod classifier;
pub mod quantiles;
pub mod record_builder;
pub mod resampler;

pub use batch::{BatchCompactor, CompactionReport, MissingRequiredChannel, SkippedActivity};
pub use channels::{channels_for, missing_required, Channel, ChannelSpec};
pub use classifier::ActivityClassifier;
pub use quantiles::QuantileSummarizer;
pub use record_builder::RecordBuilder;
pub use resampler::StreamResampler;
