/// JSON report: the full `ScanResult`, pretty-printed.
use crate::error::ExportError;
use crate::model::ScanResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_json<W: Write>(result: &ScanResult, mut out: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut out, result)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn write_json_file(result: &ScanResult, path: &Path) -> Result<(), ExportError> {
    let file = BufWriter::new(File::create(path)?);
    write_json(result, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_result;

    #[test]
    fn output_is_valid_json_with_expected_fields() {
        let mut buf = Vec::new();
        write_json(&sample_result(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["scanned_count"], 5);
        assert_eq!(value["qualifying_count"], 4);
        assert_eq!(value["completed"], true);
        assert_eq!(value["options"]["max_results"], 3);
        assert_eq!(value["options"]["root"], "/data/media");

        let top = value["top_files"].as_array().unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0]["path"], "/data/media/film.mp4");
        assert_eq!(top[0]["category"], "video");

        let categories = value["categories"].as_array().unwrap();
        assert_eq!(categories[0]["category"], "video");
    }
}
