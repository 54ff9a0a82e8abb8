// src/services/export_service.rs
// DOCUMENTATION: Spreadsheet export orchestration
// PURPOSE: Append a result set to the export sink, one row per call, in order

use crate::errors::ExportError;
use crate::models::ExportRow;
use crate::services::ports::ExportSink;

pub struct ExportService;

impl ExportService {
    /// Append every row to the sink
    /// DOCUMENTATION: Best-effort, not transactional. Stops at the first row
    /// that cannot be appended; rows already written stay written.
    ///
    /// # Returns
    /// Number of rows appended, or the failure with the count written before it
    pub async fn export_rows(
        sink: &dyn ExportSink,
        rows: &[ExportRow],
    ) -> Result<usize, ExportError> {
        log::info!("Exporting {} rows", rows.len());

        for (written, row) in rows.iter().enumerate() {
            if let Err(e) = sink.append_row(row).await {
                log::error!(
                    "Export stopped at row {} of {}: {}",
                    written + 1,
                    rows.len(),
                    e
                );
                return Err(ExportError::new(written, e.to_string()));
            }
        }

        log::info!("Exported {} rows", rows.len());
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockExportSink;

    fn rows(n: usize) -> Vec<ExportRow> {
        (0..n)
            .map(|i| ExportRow {
                company_name: format!("Company {}", i),
                location: format!("{} Main St", i),
                stars: (i % 5 + 1) as f64,
                review_text: format!("Review {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_one_append_per_row_in_order() {
        let sink = MockExportSink::new();
        let input = rows(4);

        let written = ExportService::export_rows(&sink, &input).await.unwrap();

        assert_eq!(written, 4);
        assert_eq!(sink.call_count(), 4);
        assert_eq!(sink.appended(), input);
    }

    #[tokio::test]
    async fn test_empty_export_writes_nothing() {
        let sink = MockExportSink::new();

        let written = ExportService::export_rows(&sink, &[]).await.unwrap();

        assert_eq!(written, 0);
        assert_eq!(sink.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let sink = MockExportSink::failing_at(2);
        let input = rows(5);

        let err = ExportService::export_rows(&sink, &input).await.unwrap_err();

        assert_eq!(err.rows_written, 2);
        assert!(err.message.contains("append request failed"));
        assert_eq!(sink.call_count(), 3);
        assert_eq!(sink.appended(), input[..2].to_vec());
    }
}
