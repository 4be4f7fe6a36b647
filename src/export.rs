use crate::domain::ports::Storage;
use crate::utils::error::{DrugNetError, Result};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// 依副檔名決定輸出格式
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("tsv") => Ok(ExportFormat::Tsv),
            Some("json") => Ok(ExportFormat::Json),
            Some(other) => Err(DrugNetError::InvalidInput {
                field: "output".to_string(),
                reason: format!(
                    "Unsupported file extension: {}. Allowed extensions: csv, tsv, json",
                    other
                ),
            }),
            None => Err(DrugNetError::InvalidInput {
                field: "output".to_string(),
                reason: "File has no extension or invalid filename".to_string(),
            }),
        }
    }
}

/// Flattens a payload into rows: an array of objects is used as-is, a
/// single object becomes one row, and scalars become a one-column `value`
/// table.
fn rows(payload: &Value) -> Vec<serde_json::Map<String, Value>> {
    let wrap = |value: &Value| match value {
        Value::Object(obj) => obj.clone(),
        other => {
            let mut obj = serde_json::Map::new();
            obj.insert("value".to_string(), other.clone());
            obj
        }
    };

    match payload {
        Value::Array(items) => items.iter().map(wrap).collect(),
        other => vec![wrap(other)],
    }
}

/// Header is the union of keys in first-seen order.
fn columns(rows: &[serde_json::Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn to_delimited(payload: &Value, delimiter: u8) -> Result<Vec<u8>> {
    let rows = rows(payload);
    let columns = columns(&rows);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(&columns)?;
    for row in &rows {
        writer.write_record(columns.iter().map(|c| cell(row.get(c))))?;
    }

    writer.into_inner().map_err(|e| DrugNetError::Io(e.into_error()))
}

pub fn encode(payload: &Value, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => to_delimited(payload, b','),
        ExportFormat::Tsv => to_delimited(payload, b'\t'),
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(payload)?),
    }
}

/// Writes `payload` to `path` (relative to the storage root) in the format
/// its extension names. Returns the number of bytes written.
pub async fn export<S: Storage>(storage: &S, path: &str, payload: &Value) -> Result<usize> {
    let format = ExportFormat::from_path(path)?;
    let data = encode(payload, format)?;
    tracing::debug!("Exporting {:?} ({} bytes) to {}", format, data.len(), path);
    storage.write_file(path, &data).await?;
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path("out/acne.csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path("acne.TSV").unwrap(), ExportFormat::Tsv);
        assert_eq!(ExportFormat::from_path("acne.json").unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_path("acne.xlsx").is_err());
        assert!(ExportFormat::from_path("acne").is_err());
    }

    #[test]
    fn test_csv_uses_union_of_keys() {
        let payload = json!([
            {"name": "Ibuprofen", "similarity": 1.0},
            {"name": "Naproxen, sodium", "similarity": 0.7, "medical_condition": "Pain"}
        ]);

        let data = encode(&payload, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(data).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,similarity,medical_condition");
        assert_eq!(lines[1], "Ibuprofen,1.0,");
        assert_eq!(lines[2], "\"Naproxen, sodium\",0.7,Pain");
    }

    #[test]
    fn test_tsv_single_object_and_nulls() {
        let payload = json!({"csa": null, "drug_name": "doxycycline"});

        let data = encode(&payload, ExportFormat::Tsv).unwrap();
        let text = String::from_utf8(data).unwrap();

        assert_eq!(text, "csa\tdrug_name\n\tdoxycycline\n");
    }

    #[test]
    fn test_scalar_list() {
        let payload = json!(["Amoxicillin", "Amoxil"]);

        let data = encode(&payload, ExportFormat::Csv).unwrap();

        assert_eq!(String::from_utf8(data).unwrap(), "value\nAmoxicillin\nAmoxil\n");
    }

    #[test]
    fn test_nested_values_are_compact_json() {
        let payload = json!([{"name": "Aspirin", "step": 1, "tags": ["a", "b"]}]);

        let data = encode(&payload, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(data).unwrap();

        assert!(text.contains("Aspirin,1,\"[\"\"a\"\",\"\"b\"\"]\""));
    }
}
