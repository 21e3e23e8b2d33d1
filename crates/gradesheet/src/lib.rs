//! Gradesheet: table extraction and normalization for PDF mark lists.
//!
//! Takes a typeset grade-sheet document, locates the dominant data
//! table, infers a canonical column schema from noisy header text, and
//! produces a clean, typed row set ready for persistence and export.
//!
//! # Pipeline
//!
//! - **Upload**: one scan pass extracts document metadata and table
//!   candidates, the largest candidate is selected, its headers are
//!   normalized, and the shaped preview is persisted under an opaque
//!   token for caller review.
//! - **Confirm**: the preview (optionally with column renames) is typed
//!   and coerced into the final dataset, and the preview artifact is
//!   consumed.
//!
//! # Example
//!
//! ```no_run
//! use gradesheet::{PdfDocument, Pipeline};
//!
//! let pipeline = Pipeline::new("uploads");
//! let document = PdfDocument::open("marks.pdf").unwrap();
//! let outcome = pipeline.upload(&document).unwrap();
//!
//! println!("Columns: {:?}", outcome.canonical_columns);
//! let dataset = pipeline.confirm(&outcome.token, &Default::default()).unwrap();
//! println!("Rows: {}", dataset.row_count());
//! ```

pub mod commit;
pub mod config;
pub mod document;
pub mod error;
pub mod metadata;
pub mod preview;
pub mod table;
pub mod typing;

mod pipeline;

pub use commit::{CellValue, FinalDataset, commit_preview, export_title, table_name};
pub use config::ExtractionConfig;
pub use document::{
    DocumentSource, Grid, PageContent, PageError, PdfDocument, SourceSummary, scan_document,
    scan_pdf_file,
};
pub use error::{GradesheetError, Result};
pub use metadata::{METADATA_COLUMNS, MetadataRecord, extract_metadata};
pub use pipeline::{Pipeline, UploadOutcome};
pub use preview::{PreviewStore, PreviewTable};
pub use table::{CandidateTable, CanonicalSchema, normalize_headers, sanitize_identifier, select_largest};
pub use typing::{ColumnKind, TypedColumn, infer_column_kinds};
