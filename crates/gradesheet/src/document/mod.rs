//! Document handles: grids, the page-source abstraction, the PDF
//! backend, and the combined single-pass scan.

pub mod grid;
pub mod layout;
pub mod pdf;
pub mod scan;
pub mod source;

pub use grid::Grid;
pub use pdf::PdfDocument;
pub use scan::{scan_document, scan_pdf_file};
pub use source::{DocumentSource, PageContent, PageError, PageResult, SourceSummary};
