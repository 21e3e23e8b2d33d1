//! Row shaping: reconcile data rows against the canonical schema and
//! prepend document metadata.

use crate::metadata::{METADATA_COLUMNS, MetadataRecord};
use crate::preview::PreviewTable;

use super::header::CanonicalSchema;

/// Shape raw data rows into the preview dataset.
///
/// Every cell becomes a trimmed string (missing cells become empty
/// strings). Rows shorter than the schema are padded, longer rows are
/// truncated; a column-count mismatch is never an error. The four
/// metadata columns lead every row, each filled uniformly from the
/// metadata record.
pub fn shape_preview(
    data_rows: &[Vec<Option<String>>],
    schema: &CanonicalSchema,
    metadata: &MetadataRecord,
) -> PreviewTable {
    let width = schema.columns.len();

    let mut columns = Vec::with_capacity(METADATA_COLUMNS.len() + width);
    columns.extend(METADATA_COLUMNS.iter().map(|c| c.to_string()));
    columns.extend(schema.columns.iter().cloned());

    let leading = [
        metadata.department.as_str(),
        metadata.class.as_str(),
        metadata.semester.as_str(),
        metadata.course_session.as_str(),
    ];

    let rows = data_rows
        .iter()
        .map(|raw| {
            let mut row: Vec<String> = Vec::with_capacity(METADATA_COLUMNS.len() + width);
            row.extend(leading.iter().map(|v| v.to_string()));
            row.extend(
                raw.iter()
                    .take(width)
                    .map(|cell| cell.as_deref().unwrap_or("").trim().to_string()),
            );
            // Pad when the data is narrower than the schema.
            row.resize(METADATA_COLUMNS.len() + width, String::new());
            row
        })
        .collect();

    PreviewTable { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::header::normalize_headers;

    fn schema_of(names: &[&str]) -> CanonicalSchema {
        normalize_headers(&names.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    fn record() -> MetadataRecord {
        MetadataRecord {
            department: "CS".to_string(),
            ..MetadataRecord::default()
        }
    }

    #[test]
    fn test_metadata_columns_lead() {
        let schema = schema_of(&["Name", "Roll No"]);
        let preview = shape_preview(
            &[vec![Some("Ali".into()), Some("101".into())]],
            &schema,
            &record(),
        );
        assert_eq!(
            preview.columns,
            vec!["department", "class", "semester", "course_session", "student_name", "student_id"]
        );
        assert_eq!(preview.rows[0], vec!["CS", "", "", "", "Ali", "101"]);
    }

    #[test]
    fn test_narrow_rows_padded() {
        let schema = schema_of(&["Name", "Roll No", "Total"]);
        let preview = shape_preview(&[vec![Some("Ali".into())]], &schema, &record());
        assert_eq!(preview.rows[0], vec!["CS", "", "", "", "Ali", "", ""]);
    }

    #[test]
    fn test_wide_rows_truncated() {
        let schema = schema_of(&["Name"]);
        let preview = shape_preview(
            &[vec![Some("Ali".into()), Some("overflow".into())]],
            &schema,
            &record(),
        );
        assert_eq!(preview.rows[0], vec!["CS", "", "", "", "Ali"]);
    }

    #[test]
    fn test_cells_trimmed_and_missing_become_empty() {
        let schema = schema_of(&["Name", "Total"]);
        let preview = shape_preview(&[vec![Some("  Ali  ".into()), None]], &schema, &record());
        assert_eq!(preview.rows[0], vec!["CS", "", "", "", "Ali", ""]);
    }
}
