pub mod csv_writer;
pub mod jsonl_writer;

pub use csv_writer::CsvStreamWriter;
pub use jsonl_writer::JsonlWriter;
