//! Combined single-pass document scan.

use std::path::Path;

use crate::config::ExtractionConfig;
use crate::metadata::{MetadataRecord, extract_metadata};
use crate::table::CandidateTable;

use super::pdf::PdfDocument;
use super::source::DocumentSource;

/// Scan a document once for both metadata text and table candidates.
///
/// At most `metadata_page_limit` pages contribute text and at most
/// `table_page_limit` pages contribute grids, all within a single
/// traversal. A page that fails to extract contributes nothing; the
/// scan itself never fails. Candidates keep page order then in-page
/// detection order, which is the selection tie-break.
pub fn scan_document(
    source: &dyn DocumentSource,
    config: &ExtractionConfig,
) -> (MetadataRecord, Vec<CandidateTable>) {
    let page_total = source.page_count();
    let text_limit = config.metadata_page_limit.min(page_total);
    let table_limit = config.table_page_limit.min(page_total);

    let mut text = String::new();
    let mut candidates = Vec::new();

    for index in 0..text_limit.max(table_limit) {
        let content = match source.page(index) {
            Ok(content) => content,
            // Failed page: contributed nothing.
            Err(_) => continue,
        };

        if index < text_limit {
            text.push('\n');
            text.push_str(&content.text);
        }

        if index < table_limit {
            for grid in content.grids {
                let grid = grid.without_empty_rows();
                if !grid.is_empty() {
                    candidates.push(CandidateTable::new(grid));
                }
            }
        }
    }

    (extract_metadata(&text), candidates)
}

/// Scan a PDF file in one open/parse pass.
///
/// Extends per-page tolerance to document scope: a file that cannot be
/// opened at all yields the all-empty metadata record and no
/// candidates, never an error. The empty candidate set then surfaces
/// downstream as the no-tables terminal failure.
pub fn scan_pdf_file(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> (MetadataRecord, Vec<CandidateTable>) {
    match PdfDocument::open(path) {
        Ok(document) => scan_document(&document, config),
        Err(_) => (MetadataRecord::default(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::grid::Grid;
    use crate::document::source::{PageContent, PageError, PageResult};

    /// In-memory document built from per-page outcomes.
    struct StubDocument {
        pages: Vec<PageResult>,
    }

    impl DocumentSource for StubDocument {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page(&self, index: usize) -> PageResult {
            self.pages[index].clone()
        }
    }

    fn page_with_grid(text: &str, rows: Vec<Vec<&str>>) -> PageResult {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|c| Some(c.to_string())).collect())
            .collect();
        Ok(PageContent {
            text: text.to_string(),
            grids: vec![Grid::from_rows(rows)],
        })
    }

    #[test]
    fn test_failed_page_contributes_nothing() {
        let doc = StubDocument {
            pages: vec![
                Err(PageError {
                    page: 0,
                    reason: "corrupt stream".into(),
                }),
                page_with_grid("Department: CS;", vec![vec!["a", "b"], vec!["c", "d"]]),
            ],
        };
        let (metadata, candidates) = scan_document(&doc, &ExtractionConfig::default());
        assert_eq!(metadata.department, "CS");
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_metadata_limit_is_independent_of_table_limit() {
        let config = ExtractionConfig {
            metadata_page_limit: 1,
            table_page_limit: 2,
            ..ExtractionConfig::default()
        };
        let doc = StubDocument {
            pages: vec![
                page_with_grid("no labels here", vec![vec!["a", "b"], vec!["c", "d"]]),
                page_with_grid("Department: Late;", vec![vec!["e", "f"], vec!["g", "h"]]),
            ],
        };
        let (metadata, candidates) = scan_document(&doc, &config);
        // Page 2 text is past the metadata limit but its grid counts.
        assert_eq!(metadata.department, "");
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_empty_grids_discarded() {
        let doc = StubDocument {
            pages: vec![Ok(PageContent {
                text: String::new(),
                grids: vec![Grid::from_rows(vec![vec![None, Some("  ".into())]])],
            })],
        };
        let (_, candidates) = scan_document(&doc, &ExtractionConfig::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_no_pages_yields_empty_outcome() {
        let doc = StubDocument { pages: vec![] };
        let (metadata, candidates) = scan_document(&doc, &ExtractionConfig::default());
        assert_eq!(metadata, MetadataRecord::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_unreadable_file_yields_empty_outcome() {
        let (metadata, candidates) =
            scan_pdf_file("/nonexistent/sheet.pdf", &ExtractionConfig::default());
        assert_eq!(metadata, MetadataRecord::default());
        assert!(candidates.is_empty());
    }
}
