use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{RawRecord, SurveyTable, AGE_COLUMN, REQUIRED_COLUMNS};
use super::normalize::normalize;

/// Schema problems that make a file unusable as a survey table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("dataset has no header row")]
    NoHeader,
    #[error("dataset missing '{0}' column")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a survey table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – survey export; the first column is read as `Age`
/// * `.json`    – `[{ "Age": "...", "Gender": "...", ... }, ...]`
/// * `.parquet` – one column per survey question; the first is read as `Age`
pub fn load_file(path: &Path) -> Result<SurveyTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(SurveyTable::from_records(
        rows.into_iter().map(normalize).collect(),
    ))
}

/// Header positions of the required columns, in [`REQUIRED_COLUMNS`] order.
/// The first header is always treated as `Age`, whatever its text.
fn resolve_columns(headers: &[String]) -> Result<[usize; 8], LoadError> {
    if headers.is_empty() {
        return Err(LoadError::NoHeader);
    }
    let mut positions = [0usize; 8];
    for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = if name == AGE_COLUMN {
            0
        } else {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?
        };
    }
    Ok(positions)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Survey exports are not always UTF-8; bytes that fail to decode are read
/// as ISO-8859-1, where every byte maps to the code point of the same value.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::debug!("dataset is not UTF-8 ({err}), decoding as ISO-8859-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes = std::fs::read(path).context("reading CSV file")?;
    let text = decode_text(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let columns = resolve_columns(&headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = columns.map(|idx| record.get(idx).unwrap_or("").to_string());
        rows.push(RawRecord::from_cells(cells));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Age": "20 to 35", "Gender": "Female", "music_recc_rating": 4, ... },
///   ...
/// ]
/// ```
///
/// A key absent from one object is an empty cell; a key absent from every
/// object is a missing column.
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        seen.extend(obj.keys().map(String::as_str));
        objects.push(obj);
    }
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !seen.contains(*c)) {
        return Err(LoadError::MissingColumn(missing.to_string()).into());
    }

    Ok(objects
        .into_iter()
        .map(|obj| RawRecord::from_cells(REQUIRED_COLUMNS.map(|col| json_cell_text(obj.get(col)))))
        .collect())
}

fn json_cell_text(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one column per survey question.
///
/// Columns may be strings or numbers; every cell is read back as text so the
/// normalizer sees the same input it would get from a CSV export. Nulls are
/// empty cells.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = resolve_columns(&headers)?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let arrays = columns.map(|idx| batch.column(idx).clone());

        for row in 0..batch.num_rows() {
            let mut cells: [String; 8] = Default::default();
            for (cell, col) in cells.iter_mut().zip(&arrays) {
                *cell = extract_cell_text(col, row)
                    .with_context(|| format!("Row {row}: failed to read cell"))?;
            }
            rows.push(RawRecord::from_cells(cells));
        }
    }

    Ok(rows)
}

/// Render a single Arrow cell as text.
fn extract_cell_text(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    Ok(array_value_to_string(col.as_ref(), row)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::AgeGroup;

    const HEADER: &str = "Age ,Gender,spotify_usage_period,spotify_subscription_plan,preffered_premium_plan,music_recc_rating,music_Influencial_mood,music_lis_frequency\n";

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_first_column_is_age_whatever_its_header() {
        let body = format!(
            "{HEADER}6 to 12, Male ,6 months to 1 year,Premium Individual,Duo plan- Rs 149/month,3,\"Happy, Sad\",Daily\n\
             60 and above,Female,More than 2 years,Free (ad-supported),,abc,,\n"
        );
        let file = write_temp(".csv", body.as_bytes());
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.records()[0];
        assert_eq!(first.age_group, AgeGroup::From6To12);
        assert_eq!(first.gender, "Male");
        assert_eq!(first.rating, Some(3.0));
        assert_eq!(first.influential_mood.as_deref(), Some("Happy, Sad"));

        let second = &table.records()[1];
        assert_eq!(second.age_group, AgeGroup::Over60);
        assert_eq!(second.rating, None);
        assert_eq!(second.preferred_plan, None);
        assert_eq!(second.listening_frequency, None);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = write_temp(".csv", b"Age,Gender,spotify_subscription_plan\n20 to 35,Female,Free\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::MissingColumn("music_recc_rating".to_string()))
        );
    }

    #[test]
    fn csv_latin1_bytes_are_decoded() {
        let mut body = HEADER.as_bytes().to_vec();
        body.extend_from_slice(
            b"20 to 35,Female,Less than 6 months,Free,,4,Caf\xe9 vibes,Daily\n",
        );
        let file = write_temp(".csv", &body);
        let table = load_file(file.path()).unwrap();
        assert_eq!(
            table.records()[0].influential_mood.as_deref(),
            Some("Caf\u{e9} vibes")
        );
    }

    #[test]
    fn json_records_load_with_numeric_ratings() {
        let body = r#"[
            {"Age": "20 to 35", "Gender": "Female", "spotify_subscription_plan": "Free",
             "music_recc_rating": 4, "spotify_usage_period": "Less than 6 months",
             "preffered_premium_plan": null, "music_Influencial_mood": "Happy",
             "music_lis_frequency": "Daily"},
            {"Age": "35 to 60", "Gender": "Male", "spotify_subscription_plan": "Premium",
             "music_recc_rating": "x", "spotify_usage_period": "More than 2 years",
             "preffered_premium_plan": "Duo plan- Rs 149/month", "music_Influencial_mood": "Sad",
             "music_lis_frequency": "Night"}
        ]"#;
        let file = write_temp(".json", body.as_bytes());
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].rating, Some(4.0));
        assert_eq!(table.records()[0].preferred_plan, None);
        assert_eq!(table.records()[1].rating, None);
        assert_eq!(table.records()[1].age_group, AgeGroup::From35To60);
    }

    #[test]
    fn json_missing_column_is_reported() {
        let file = write_temp(".json", br#"[{"Age": "20 to 35"}]"#);
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::MissingColumn("Gender".to_string()))
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", b"");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::UnsupportedExtension("xlsx".to_string()))
        );
    }
}
