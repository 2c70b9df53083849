use std::path::Path;

use anyhow::{Context, Result};

use super::model::{BeadCatalog, GradeRow};
use crate::error::{CoreError, CoreResult};

// ---------------------------------------------------------------------------
// CSV text → tables
// ---------------------------------------------------------------------------

/// Catalog CSV: header row with `name` and `unit_price` columns (any order,
/// extra columns ignored).
///
/// ```text
/// name,unit_price
/// Rocaille 2mm,0.02
/// Perle lettre,0.08
/// ```
pub fn parse_catalog_csv(text: &str) -> CoreResult<BeadCatalog> {
    let mut reader = csv_reader(text);
    let headers = read_headers(&mut reader)?;
    let name_idx = column(&headers, "name")?;
    let price_idx = column(&headers, "unit_price")?;

    let mut catalog = BeadCatalog::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| CoreError::format(format!("CSV row {}: {e}", row_no + 1)))?;
        let name = record.get(name_idx).unwrap_or("");
        let price = parse_number(record.get(price_idx), row_no, "unit_price")?;
        catalog
            .upsert(name, price)
            .map_err(|e| with_row(e, row_no))?;
    }
    Ok(catalog)
}

/// Grade CSV: `label`, `score` and `weight` columns.
pub fn parse_grades_csv(text: &str) -> CoreResult<Vec<GradeRow>> {
    let mut reader = csv_reader(text);
    let headers = read_headers(&mut reader)?;
    let label_idx = column(&headers, "label")?;
    let score_idx = column(&headers, "score")?;
    let weight_idx = column(&headers, "weight")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| CoreError::format(format!("CSV row {}: {e}", row_no + 1)))?;
        let label = record.get(label_idx).unwrap_or("");
        let score = parse_number(record.get(score_idx), row_no, "score")?;
        let weight = parse_number(record.get(weight_idx), row_no, "weight")?;
        rows.push(GradeRow::new(label, score, weight).map_err(|e| with_row(e, row_no))?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

pub fn load_catalog_file(path: &Path) -> Result<BeadCatalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog file {}", path.display()))?;
    let catalog = parse_catalog_csv(&text)
        .with_context(|| format!("parsing catalog file {}", path.display()))?;
    Ok(catalog)
}

// -- helpers --

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn read_headers(reader: &mut csv::Reader<&[u8]>) -> CoreResult<Vec<String>> {
    let headers = reader
        .headers()
        .map_err(|e| CoreError::format(format!("reading CSV headers: {e}")))?;
    Ok(headers.iter().map(|h| h.to_ascii_lowercase()).collect())
}

fn column(headers: &[String], name: &str) -> CoreResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CoreError::format(format!("CSV missing '{name}' column")))
}

fn parse_number(cell: Option<&str>, row_no: usize, col: &str) -> CoreResult<f64> {
    let raw = cell.unwrap_or("");
    raw.parse::<f64>().map_err(|_| {
        CoreError::format(format!(
            "CSV row {}, {col}: '{raw}' is not a number",
            row_no + 1
        ))
    })
}

fn with_row(err: CoreError, row_no: usize) -> CoreError {
    match err {
        CoreError::Domain(msg) => CoreError::Domain(format!("CSV row {}: {msg}", row_no + 1)),
        other => other,
    }
}
