pub mod export_reader;

pub use export_reader::{ActivityExport, ExportIterator, ExportReader};
