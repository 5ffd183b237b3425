use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{
    AGE_INDEX, ATTRIBUTE_COUNT, ATTRIBUTE_NAMES, CLASS_INDEX, CLINICAL_COUNT, CleanedDataset,
    DiseaseClass, Record,
};
use crate::error::DataError;

/// Token the source uses for an unobserved value.
pub const MISSING_MARKER: &str = "?";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the dermatology table at `path`.
///
/// The file is a headerless, comma-separated table with exactly
/// [`ATTRIBUTE_COUNT`] positional columns. Rows with any missing value are
/// dropped; everything else must parse.
pub fn load_file(path: &Path) -> Result<CleanedDataset, DataError> {
    let file = File::open(path).map_err(|source| DataError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    log::info!(
        "Loaded {} complete records from {} ({} incomplete rows dropped)",
        dataset.len(),
        path.display(),
        dataset.dropped_rows
    );
    Ok(dataset)
}

/// Same as [`load_file`] for any byte source.
pub fn load_reader<R: Read>(reader: R) -> Result<CleanedDataset, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut dropped_rows = 0;

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let fields = result?;
        match clean_row(row, &fields)? {
            Some(record) => records.push(record),
            None => {
                log::debug!("Row {row}: dropped, at least one attribute is missing");
                dropped_rows += 1;
            }
        }
    }

    Ok(CleanedDataset::new(records, dropped_rows))
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

/// Turn one raw row into a [`Record`]. `Ok(None)` means the row is incomplete.
fn clean_row(row: usize, fields: &StringRecord) -> Result<Option<Record>, DataError> {
    if fields.len() != ATTRIBUTE_COUNT {
        return Err(DataError::SchemaMismatch {
            row,
            expected: ATTRIBUTE_COUNT,
            found: fields.len(),
        });
    }

    // `None` is the one missing-value sentinel for every attribute.
    let cells: Vec<Option<&str>> = fields.iter().map(present).collect();
    let age = cells[AGE_INDEX].and_then(coerce_age);

    if age.is_none() || cells.iter().any(Option::is_none) {
        return Ok(None);
    }

    let mut clinical = [0u8; CLINICAL_COUNT];
    for (col, slot) in clinical.iter_mut().enumerate() {
        let raw = cells[col].unwrap_or_default();
        *slot = parse_ordinal(raw).ok_or_else(|| invalid(row, col, raw))?;
    }

    let raw_class = cells[CLASS_INDEX].unwrap_or_default();
    let class = parse_ordinal(raw_class)
        .and_then(DiseaseClass::from_label)
        .ok_or_else(|| invalid(row, CLASS_INDEX, raw_class))?;

    Ok(Some(Record {
        clinical,
        age: age.unwrap_or_default(),
        class,
    }))
}

fn present(raw: &str) -> Option<&str> {
    if raw.is_empty() || raw == MISSING_MARKER {
        None
    } else {
        Some(raw)
    }
}

/// Numeric coercion for `age`: anything that is not a non-negative whole
/// number counts as missing.
fn coerce_age(raw: &str) -> Option<u32> {
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Whole numbers in `0..=255`, accepting a trailing `.0`.
fn parse_ordinal(raw: &str) -> Option<u8> {
    if let Ok(v) = raw.parse::<u8>() {
        return Some(v);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && (0.0..=255.0).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

fn invalid(row: usize, col: usize, raw: &str) -> DataError {
    DataError::InvalidValue {
        row,
        column: ATTRIBUTE_NAMES[col],
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(clinical: u8, age: &str, class: &str) -> String {
        let mut cells: Vec<String> = (0..CLINICAL_COUNT).map(|_| clinical.to_string()).collect();
        cells.push(age.to_string());
        cells.push(class.to_string());
        cells.join(",")
    }

    fn load(lines: &[String]) -> Result<CleanedDataset, DataError> {
        load_reader(lines.join("\n").as_bytes())
    }

    #[test]
    fn complete_rows_are_kept_in_order() {
        let ds = load(&[row(1, "25", "2"), row(3, "60", "1")]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows, 0);
        assert_eq!(ds.records[0].age, 25);
        assert_eq!(ds.records[0].class, DiseaseClass::SeborrheicDermatitis);
        assert_eq!(ds.records[1].clinical, [3u8; CLINICAL_COUNT]);
    }

    #[test]
    fn missing_marker_drops_row() {
        let mut lines = vec![row(1, "?", "2"), row(1, "30", "?"), row(2, "40", "4")];
        let mut cells: Vec<&str> = vec!["1"; ATTRIBUTE_COUNT];
        cells[5] = "?";
        lines.push(cells.join(","));

        let ds = load(&lines).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_rows, 3);
        assert_eq!(ds.records[0].age, 40);
    }

    #[test]
    fn unparseable_age_is_coerced_to_missing() {
        let ds = load(&[
            row(0, "forty", "1"),
            row(0, "-3", "1"),
            row(0, "12.5", "1"),
            row(0, "35.0", "3"),
        ])
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_rows, 3);
        assert_eq!(ds.records[0].age, 35);
    }

    #[test]
    fn whitespace_around_cells_is_ignored() {
        let line = row(1, "33", "5").replace(',', " , ");
        let ds = load(&[line]).unwrap();
        assert_eq!(ds.records[0].class, DiseaseClass::ChronicDermatitis);
    }

    #[test]
    fn wrong_width_is_schema_mismatch() {
        let short = vec!["1"; 34].join(",");
        let err = load(&[row(1, "20", "1"), short]).unwrap_err();
        match err {
            DataError::SchemaMismatch { row, expected, found } => {
                assert_eq!((row, expected, found), (2, 35, 34));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn label_outside_domain_is_rejected() {
        let err = load(&[row(1, "20", "9")]).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { column: "class", .. }));
    }

    #[test]
    fn garbage_clinical_value_is_rejected() {
        let mut cells: Vec<&str> = vec!["1"; ATTRIBUTE_COUNT];
        cells[2] = "x";
        let err = load(&[cells.join(",")]).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidValue { row: 1, column: "definite_borders", .. }
        ));
    }

    #[test]
    fn all_rows_incomplete_gives_empty_dataset() {
        let ds = load(&[row(1, "?", "1"), row(2, "?", "2")]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.dropped_rows, 2);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = load_file(Path::new("/definitely/not/here/dermatology.data")).unwrap_err();
        assert!(err.is_unavailable());
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }
}
