//! Extraction configuration.

/// Configuration for the extraction pipeline.
///
/// Passed explicitly into every extraction call; there is no ambient
/// global configuration. The page limits bound worst-case latency on
/// pathologically large documents, they do not implement cancellation.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Pages scanned for document-level metadata text.
    pub metadata_page_limit: usize,
    /// Pages scanned for table candidates.
    pub table_page_limit: usize,
    /// Rows of the shaped dataset returned for caller preview.
    pub preview_row_limit: usize,
    /// Fraction of distinct first-row cells required to classify the
    /// row as a header.
    pub header_uniqueness_threshold: f64,
    /// Fraction of numeric-looking values required to classify a
    /// column as numeric.
    pub numeric_ratio_threshold: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            metadata_page_limit: 3,
            table_page_limit: 20,
            preview_row_limit: 10,
            header_uniqueness_threshold: 0.5,
            numeric_ratio_threshold: 0.6,
        }
    }
}
