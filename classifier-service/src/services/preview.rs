//! First rows of the bundled CSV dataset, as JSON objects.

use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type PreviewRow = Map<String, Value>;

/// Cells treated as missing and rendered as `""`.
const MISSING_MARKERS: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("CSV file not found at {}", .0.display())]
    FileMissing(PathBuf),

    #[error("failed to read CSV at {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

#[derive(Debug, Clone)]
pub struct DataPreview {
    path: PathBuf,
    max_rows: usize,
}

impl DataPreview {
    pub fn new(path: impl Into<PathBuf>, max_rows: usize) -> Self {
        Self {
            path: path.into(),
            max_rows,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file fresh on each call; rows come back in file order.
    /// Only the requested rows are read.
    pub async fn rows(&self) -> Result<Vec<PreviewRow>, PreviewError> {
        let preview = self.clone();
        tokio::task::spawn_blocking(move || preview.read_rows())
            .await
            .map_err(|e| self.unreadable(e))?
    }

    fn read_rows(&self) -> Result<Vec<PreviewRow>, PreviewError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.open_error(e))?;

        let headers = reader.headers().map_err(|e| self.unreadable(e))?.clone();

        let mut rows = Vec::with_capacity(self.max_rows);
        for record in reader.records().take(self.max_rows) {
            let record = record.map_err(|e| self.unreadable(e))?;
            let row = headers
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    (column.to_string(), cell_value(record.get(index).unwrap_or("")))
                })
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }

    fn open_error(&self, e: csv::Error) -> PreviewError {
        let not_found = matches!(
            e.kind(),
            csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
        );
        if not_found {
            PreviewError::FileMissing(self.path.clone())
        } else {
            self.unreadable(e)
        }
    }

    fn unreadable(&self, e: impl std::fmt::Display) -> PreviewError {
        PreviewError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

fn cell_value(cell: &str) -> Value {
    if MISSING_MARKERS.contains(&cell) {
        return Value::String(String::new());
    }
    if let Ok(int) = cell.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(number) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    async fn write_csv(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("preview-test-{}.csv", Uuid::new_v4()));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn returns_at_most_the_configured_rows() {
        let mut csv = String::from("id,value\n");
        for i in 0..12 {
            csv.push_str(&format!("{},{}\n", i, i * 10));
        }
        let path = write_csv(&csv).await;

        let rows = DataPreview::new(&path, 5).rows().await.unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["id"], json!(0));
        assert_eq!(rows[4]["value"], json!(40));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn short_files_return_every_row() {
        let path = write_csv("a,b\n1,2\n").await;

        let rows = DataPreview::new(&path, 5).rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_values_become_empty_strings() {
        let path = write_csv("species,petal_length,note\nsetosa,,NA\nversicolor,4.7\n").await;

        let rows = DataPreview::new(&path, 5).rows().await.unwrap();

        assert_eq!(rows[0]["petal_length"], json!(""));
        assert_eq!(rows[0]["note"], json!(""));
        assert_eq!(rows[1]["petal_length"], json!(4.7));
        // Short records are padded rather than rejected.
        assert_eq!(rows[1]["note"], json!(""));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn keeps_column_names_as_keys() {
        let path = write_csv("mean radius,target\n17.99,0\n").await;

        let rows = DataPreview::new(&path, 5).rows().await.unwrap();
        let keys: Vec<&String> = rows[0].keys().collect();

        assert!(keys.contains(&&"mean radius".to_string()));
        assert!(keys.contains(&&"target".to_string()));
        assert_eq!(rows[0]["mean radius"], json!(17.99));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn absent_file_is_file_missing() {
        let path = std::env::temp_dir().join(format!("absent-{}.csv", Uuid::new_v4()));

        let err = DataPreview::new(&path, 5).rows().await.unwrap_err();
        assert!(matches!(err, PreviewError::FileMissing(_)));
    }

    #[tokio::test]
    async fn cells_and_headers_keep_their_whitespace() {
        let path = write_csv("species , note\n setosa ,  kept \n").await;

        let rows = DataPreview::new(&path, 5).rows().await.unwrap();

        assert_eq!(rows[0]["species "], json!(" setosa "));
        assert_eq!(rows[0][" note"], json!("  kept "));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn stops_reading_after_the_requested_rows() {
        let path = std::env::temp_dir().join(format!("preview-test-{}.csv", Uuid::new_v4()));
        let mut contents = b"a,b\n1,2\n3,4\n".to_vec();
        contents.extend_from_slice(&[0xff, 0xfe, b',', 0xff, b'\n']);
        tokio::fs::write(&path, contents).await.unwrap();

        let rows = DataPreview::new(&path, 2).rows().await.unwrap();
        assert_eq!(rows.len(), 2);

        let err = DataPreview::new(&path, 5).rows().await.unwrap_err();
        assert!(matches!(err, PreviewError::Unreadable { .. }));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn directory_is_unreadable_not_missing() {
        let dir = std::env::temp_dir();

        let err = DataPreview::new(&dir, 5).rows().await.unwrap_err();
        assert!(matches!(err, PreviewError::Unreadable { .. }));
    }

    #[test]
    fn non_numeric_cells_stay_strings() {
        assert_eq!(cell_value("setosa"), json!("setosa"));
        assert_eq!(cell_value("-3"), json!(-3));
        assert_eq!(cell_value("inf"), json!("inf"));
    }
}
