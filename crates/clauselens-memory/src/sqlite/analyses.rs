use std::time::{SystemTime, UNIX_EPOCH};

use super::SqliteStore;
use crate::error::MemoryError;
use crate::types::{AnalysisId, AnalysisSummaryRow, NewAnalysis, SavedAnalysisRecord};

fn now_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .unwrap_or(0)
}

impl SqliteStore {
    /// Append one analysis and return its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn save_analysis(&self, record: NewAnalysis<'_>) -> Result<AnalysisId, MemoryError> {
        let row: (AnalysisId,) = sqlx::query_as(
            "INSERT INTO analyses (created_at, doc_sig, file_name, persona, lang, sections_json, flags_json, summary) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(now_epoch_secs())
        .bind(record.doc_sig)
        .bind(record.file_name)
        .bind(record.persona)
        .bind(record.lang)
        .bind(&record.sections_json)
        .bind(&record.flags_json)
        .bind(record.summary)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %row.0, file_name = record.file_name, "saved analysis");
        Ok(row.0)
    }

    /// Most recent analyses, newest first (descending ID).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<AnalysisSummaryRow>, MemoryError> {
        let rows: Vec<AnalysisSummaryRow> = sqlx::query_as(
            "SELECT id, created_at, file_name, persona, lang FROM analyses ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Load one full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_analysis(
        &self,
        id: AnalysisId,
    ) -> Result<Option<SavedAnalysisRecord>, MemoryError> {
        let row: Option<SavedAnalysisRecord> = sqlx::query_as(
            "SELECT id, created_at, doc_sig, file_name, persona, lang, sections_json, flags_json, summary \
             FROM analyses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete every saved analysis and return the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn clear_all(&self) -> Result<u64, MemoryError> {
        let result = sqlx::query("DELETE FROM analyses")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
