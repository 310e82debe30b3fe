use std::path::{Path, PathBuf};

/// Default JSONL output path: {output_dir}/{label}_streams_{interval}s.jsonl
pub fn generate_default_jsonl_filename(
    output_dir: &Path,
    label: &str,
    interval_secs: f64,
) -> PathBuf {
    output_dir.join(format!("{}_streams_{}s.jsonl", label, interval_secs))
}

/// Per-activity CSV filename used by the stream exporter.
pub fn activity_csv_filename(label: &str, activity_id: u64) -> String {
    format!("streams_{}_activity_{}.csv", label, activity_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_jsonl_filename() {
        let filename = generate_default_jsonl_filename(Path::new("streams"), "An", 5.0);
        assert_eq!(filename, PathBuf::from("streams/An_streams_5s.jsonl"));
    }

    #[test]
    fn test_fractional_interval_in_filename() {
        let filename = generate_default_jsonl_filename(Path::new("out"), "An", 2.5);
        assert_eq!(filename, PathBuf::from("out/An_streams_2.5s.jsonl"));
    }

    #[test]
    fn test_activity_csv_filename() {
        assert_eq!(
            activity_csv_filename("An", 15093834011),
            "streams_An_activity_15093834011.csv"
        );
    }
}
