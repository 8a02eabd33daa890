//! Parquet row transport built on `serde_arrow`.
//!
//! Every boundary artifact (snapshot tables, coverage sets, checkpoint,
//! pivot, sample) moves through these two helpers as plain serde row structs.

use crate::error::Result;
use arrow::datatypes::FieldRef;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};
use std::fs::File;
use std::path::Path;

/// Read every row of a Parquet file into a vector of serde row structs
pub fn read_rows<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut part: Vec<T> = serde_arrow::from_record_batch(&batch)?;
        rows.append(&mut part);
    }
    Ok(rows)
}

/// Write serde row structs to a Parquet file as a single record batch
pub fn write_rows<T>(path: &Path, rows: &[T]) -> Result<()>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default().allow_null_fields(true))?;
    let batch = serde_arrow::to_record_batch(&fields, &rows)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Probe {
        id: i64,
        name: String,
        label: Option<String>,
    }

    #[test]
    fn test_row_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.parquet");
        let rows = vec![
            Probe {
                id: 1,
                name: "first".to_string(),
                label: Some("short".to_string()),
            },
            Probe {
                id: 2,
                name: "second".to_string(),
                label: None,
            },
        ];

        write_rows(&path, &rows).unwrap();
        let restored: Vec<Probe> = read_rows(&path).unwrap();
        assert_eq!(restored, rows);
    }
}
