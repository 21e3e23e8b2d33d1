//! lopdf-backed document source.

use std::fs;
use std::path::Path;

use lopdf::Document;
use sha2::{Digest, Sha256};

use crate::error::{GradesheetError, Result};

use super::layout::detect_grids;
use super::source::{DocumentSource, PageContent, PageError, PageResult, SourceSummary};

/// A PDF document opened for extraction.
///
/// Opening reads the whole file once, fingerprints it, and resolves the
/// page tree. Page content extraction is per-page and fallible without
/// poisoning the rest of the document.
pub struct PdfDocument {
    doc: Document,
    /// Page numbers (1-based, as lopdf numbers them) in document order.
    pages: Vec<u32>,
    summary: SourceSummary,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| GradesheetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());
        let size_bytes = contents.len() as u64;

        let doc = Document::load_mem(&contents)?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();

        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let summary = SourceSummary {
            file,
            path: path.to_path_buf(),
            hash,
            size_bytes,
            page_count: pages.len(),
        };

        Ok(Self { doc, pages, summary })
    }

    /// Fingerprint of the opened file.
    pub fn summary(&self) -> &SourceSummary {
        &self.summary
    }

    /// File name stem, used for table naming and export titles.
    pub fn stem(&self) -> String {
        self.summary
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl DocumentSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> PageResult {
        let number = self.pages.get(index).ok_or_else(|| PageError {
            page: index,
            reason: "page out of range".to_string(),
        })?;

        let text = self
            .doc
            .extract_text(&[*number])
            .map_err(|e| PageError {
                page: index,
                reason: e.to_string(),
            })?;

        let grids = detect_grids(&text);
        Ok(PageContent { text, grids })
    }
}
