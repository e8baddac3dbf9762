use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{CellValue, DatasetSummary, PlotResult, Record};

// ---------------------------------------------------------------------------
// Summary payload
// ---------------------------------------------------------------------------

/// Decode the analytics payload:
///
/// ```json
/// { "top_rows": [ { "age": 20, "income": 500, ... }, ... ] }
/// ```
///
/// Column order is taken from the first row as the backend sent it; every
/// subsequent row must carry exactly the same column set.
pub fn decode_summary(root: &JsonValue) -> Result<DatasetSummary> {
    let rows_json = root
        .get("top_rows")
        .and_then(|v| v.as_array())
        .context("missing or invalid 'top_rows' array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows: Vec<Record> = Vec::with_capacity(rows_json.len());

    for (i, rec) in rows_json.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("row {i} is not a JSON object"))?;

        if i == 0 {
            column_names = obj.keys().cloned().collect();
        } else if obj.len() != column_names.len()
            || !column_names.iter().all(|c| obj.contains_key(c))
        {
            bail!("row {i} does not match the column set of row 0");
        }

        rows.push(record_from(obj));
    }

    Ok(DatasetSummary { column_names, rows })
}

// ---------------------------------------------------------------------------
// Plot payload
// ---------------------------------------------------------------------------

/// Decode the plot payload:
///
/// ```json
/// { "data": [ { "age": 20, "income": 500 }, ... ] }
/// ```
pub fn decode_plot(root: &JsonValue) -> Result<PlotResult> {
    let records_json = root
        .get("data")
        .and_then(|v| v.as_array())
        .context("missing or invalid 'data' array")?;

    let mut records = Vec::with_capacity(records_json.len());
    for (i, rec) in records_json.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("record {i} is not a JSON object"))?;
        records.push(record_from(obj));
    }

    Ok(PlotResult { records })
}

// ---------------------------------------------------------------------------
// Upload acknowledgment
// ---------------------------------------------------------------------------

/// Decode the upload acknowledgment: `{ "filename": "data.csv" }`.
pub fn decode_upload_ack(root: &JsonValue) -> Result<String> {
    root.get("filename")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .context("missing or invalid 'filename' field")
}

fn record_from(obj: &serde_json::Map<String, JsonValue>) -> Record {
    obj.iter()
        .map(|(k, v)| (k.clone(), CellValue::from(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_summary_rows_and_columns() {
        let root = json!({
            "top_rows": [
                { "age": 20, "income": 500.5, "city": "Oslo" },
                { "age": 30, "income": 700.0, "city": null },
            ]
        });
        let summary = decode_summary(&root).unwrap();
        assert_eq!(summary.column_names, ["age", "income", "city"]);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.rows[0]["age"], CellValue::Integer(20));
        assert_eq!(summary.rows[1]["city"], CellValue::Null);
    }

    #[test]
    fn rejects_mismatched_row_columns() {
        let root = json!({
            "top_rows": [
                { "age": 20, "income": 500 },
                { "age": 30, "height": 180 },
            ]
        });
        let err = decode_summary(&root).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn rejects_missing_top_rows() {
        assert!(decode_summary(&json!({ "rows": [] })).is_err());
        assert!(decode_summary(&json!("nope")).is_err());
    }

    #[test]
    fn empty_summary_is_valid() {
        let summary = decode_summary(&json!({ "top_rows": [] })).unwrap();
        assert!(summary.is_empty());
        assert!(summary.column_names.is_empty());
    }

    #[test]
    fn decodes_plot_records() {
        let root = json!({
            "data": [
                { "age": 20, "income": 500 },
                { "age": 30, "income": 700 },
            ]
        });
        let result = decode_plot(&root).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1]["income"], CellValue::Integer(700));
    }

    #[test]
    fn decodes_upload_ack() {
        assert_eq!(
            decode_upload_ack(&json!({ "filename": "data.csv" })).unwrap(),
            "data.csv"
        );
        assert!(decode_upload_ack(&json!({})).is_err());
    }
}
