use std::path::Path;

use anyhow::{bail, Context, Result};

/// The backend rejects uploads above 10 MB; checking locally saves the
/// round-trip.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Sanity-check a file before it is posted to `/upload/`: it must carry a
/// `.csv` extension, stay under the size cap, and parse as CSV with a header
/// row. Mirrors the backend's own rejection rules so most bad picks are
/// caught without a network call.
pub fn validate_csv(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" {
        bail!("not a CSV file: {}", path.display());
    }

    let meta = std::fs::metadata(path).context("reading file metadata")?;
    if meta.len() > MAX_UPLOAD_BYTES {
        bail!(
            "file is {} bytes, above the {} byte upload limit",
            meta.len(),
            MAX_UPLOAD_BYTES
        );
    }

    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?;
    if headers.is_empty() {
        bail!("CSV has no header columns");
    }

    // Walk the records so structural errors (ragged rows, bad quoting)
    // surface with a row number.
    for (row_no, record) in reader.records().enumerate() {
        record.with_context(|| format!("CSV row {row_no}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn accepts_well_formed_csv() {
        let path = temp_csv("chartlab_ok.csv", "age,income\n20,500\n30,700\n");
        assert!(validate_csv(&path).is_ok());
    }

    #[test]
    fn rejects_wrong_extension() {
        let path = temp_csv("chartlab_bad.txt", "age,income\n20,500\n");
        let err = validate_csv(&path).unwrap_err();
        assert!(err.to_string().contains("not a CSV file"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let path = temp_csv("chartlab_ragged.csv", "age,income\n20\n");
        assert!(validate_csv(&path).is_err());
    }
}
