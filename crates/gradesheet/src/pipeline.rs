//! End-to-end extraction pipeline.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::commit::{FinalDataset, commit_preview};
use crate::config::ExtractionConfig;
use crate::document::{DocumentSource, scan_document};
use crate::error::{GradesheetError, Result};
use crate::metadata::MetadataRecord;
use crate::preview::PreviewStore;
use crate::table::{detect_header_row, normalize_headers, select_largest, shape_preview, synthetic_headers};

/// Result of uploading one document: the reviewable preview plus the
/// token that retrieves it at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Opaque token addressing the persisted preview artifact.
    pub token: String,
    /// Extracted document metadata.
    pub metadata: MetadataRecord,
    /// Raw header cells of the selected table (synthetic `colN` when no
    /// header row was detected).
    pub raw_headers: Vec<String>,
    /// Canonical column names derived from the raw headers.
    pub canonical_columns: Vec<String>,
    /// Raw header text to canonical name, in header order.
    pub header_mapping: IndexMap<String, String>,
    /// Full preview column list (metadata columns + canonical schema).
    pub preview_columns: Vec<String>,
    /// Leading preview rows, capped at the configured preview limit.
    pub preview_rows: Vec<Vec<String>>,
    /// Total shaped rows (not capped).
    pub row_count: usize,
    /// Total preview columns.
    pub column_count: usize,
}

/// The extraction pipeline: one `upload` pass producing a reviewable
/// preview, and one `confirm` pass producing the typed dataset.
pub struct Pipeline {
    config: ExtractionConfig,
    store: PreviewStore,
}

impl Pipeline {
    /// Create a pipeline with default configuration, storing preview
    /// artifacts under `store_dir`.
    pub fn new(store_dir: impl AsRef<Path>) -> Self {
        Self::with_config(store_dir, ExtractionConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(store_dir: impl AsRef<Path>, config: ExtractionConfig) -> Self {
        Self {
            config,
            store: PreviewStore::new(store_dir.as_ref()),
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Ingest a document: scan, select the dominant table, normalize
    /// headers, shape, and persist the preview.
    ///
    /// Fails only with [`GradesheetError::NoTablesDetected`] when no
    /// candidate survives the scan; every per-page anomaly has already
    /// degraded to "contributed nothing".
    pub fn upload(&self, source: &dyn DocumentSource) -> Result<UploadOutcome> {
        let (metadata, candidates) = scan_document(source, &self.config);
        let table = select_largest(&candidates).ok_or(GradesheetError::NoTablesDetected)?;

        let rows = table.rows();
        let has_header = rows
            .first()
            .is_some_and(|first| detect_header_row(first, self.config.header_uniqueness_threshold));

        let (raw_headers, data_rows) = if has_header {
            let headers = rows[0]
                .iter()
                .map(|cell| cell.as_deref().unwrap_or("").trim().to_string())
                .collect();
            (headers, &rows[1..])
        } else {
            (synthetic_headers(table.column_count()), rows)
        };

        let schema = normalize_headers(&raw_headers);
        let preview = shape_preview(data_rows, &schema, &metadata);
        let token = self.store.save(&preview)?;

        Ok(UploadOutcome {
            token,
            metadata,
            raw_headers,
            canonical_columns: schema.columns,
            header_mapping: schema.mapping,
            preview_columns: preview.columns.clone(),
            preview_rows: preview
                .rows
                .iter()
                .take(self.config.preview_row_limit)
                .cloned()
                .collect(),
            row_count: preview.rows.len(),
            column_count: preview.columns.len(),
        })
    }

    /// Confirm a previously uploaded preview: apply caller renames,
    /// infer types, coerce cells, and consume the preview artifact.
    pub fn confirm(
        &self,
        token: &str,
        renames: &IndexMap<String, String>,
    ) -> Result<FinalDataset> {
        let preview = self.store.load(token)?;
        let dataset = commit_preview(&preview, renames, &self.config);
        self.store.remove(token)?;
        Ok(dataset)
    }
}
