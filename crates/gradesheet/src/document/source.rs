//! Document handle abstraction.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Everything extracted from a single page.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Plain text of the page (may be empty).
    pub text: String,
    /// Raw grids detected on the page, in detection order.
    pub grids: Vec<Grid>,
}

/// A page that could not be read.
///
/// Page failures are ordinary values, not errors that unwind: the
/// scanner folds a failed page into "contributed nothing" and keeps
/// going.
#[derive(Debug, Clone)]
pub struct PageError {
    /// Zero-based page index.
    pub page: usize,
    /// Backend-specific reason.
    pub reason: String,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.page + 1, self.reason)
    }
}

/// Per-page extraction outcome.
pub type PageResult = std::result::Result<PageContent, PageError>;

/// A document capable of yielding per-page text and grids.
///
/// The pipeline only sees this trait; the PDF backend and the in-memory
/// test documents both implement it.
pub trait DocumentSource {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Extract the content of one page.
    fn page(&self, index: usize) -> PageResult;
}

/// Fingerprint of an opened source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of pages.
    pub page_count: usize,
}
