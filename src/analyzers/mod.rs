pub mod activity_analyzer;

pub use activity_analyzer::{ActivityAnalyzer, ActivitySummary};
