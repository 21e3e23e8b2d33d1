//! Commit transformation: renames, type inference, and cell coercion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::metadata::MetadataRecord;
use crate::preview::PreviewTable;
use crate::table::header::sanitize_identifier;
use crate::typing::{ColumnKind, TypedColumn, infer_column_kinds};

/// A typed cell of the final dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

/// The fully typed table handed to the persistence and export
/// collaborators. Not retained by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDataset {
    pub columns: Vec<TypedColumn>,
    pub rows: Vec<Vec<CellValue>>,
}

impl FinalDataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Coerce one preview cell under its column's kind.
///
/// An empty value is `Null`. A numeric column's unparseable value
/// degrades to `Null` rather than failing the row; a text value keeps
/// its trimmed string form.
pub fn coerce_cell(value: &str, kind: ColumnKind) -> CellValue {
    if value.is_empty() {
        return CellValue::Null;
    }
    match kind {
        ColumnKind::Numeric => {
            let stripped = value.replace(',', "");
            match stripped.trim().parse::<f64>() {
                Ok(number) => CellValue::Number(number),
                Err(_) => CellValue::Null,
            }
        }
        ColumnKind::Text => CellValue::Text(value.trim().to_string()),
    }
}

/// Transform a preview dataset into the final typed dataset.
///
/// Renames are a direct relabeling applied before inference, so type
/// classification sees the post-rename names and values. Row order and
/// column order are preserved.
pub fn commit_preview(
    preview: &PreviewTable,
    renames: &IndexMap<String, String>,
    config: &ExtractionConfig,
) -> FinalDataset {
    let mut renamed = preview.clone();
    for column in &mut renamed.columns {
        if let Some(new_name) = renames.get(column.as_str()) {
            *column = new_name.clone();
        }
    }

    let columns = infer_column_kinds(&renamed, config.numeric_ratio_threshold);

    let rows = renamed
        .rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    coerce_cell(row.get(index).map_or("", |s| s.as_str()), column.kind)
                })
                .collect()
        })
        .collect();

    FinalDataset { columns, rows }
}

/// Table name for the persistence collaborator, derived from a
/// caller-supplied stem.
pub fn table_name(stem: &str) -> String {
    format!("student_marks_{}", sanitize_identifier(stem))
}

/// Human-readable export title: the non-empty descriptive metadata
/// fields joined with " - ", or the document base name when all are
/// empty.
pub fn export_title(metadata: &MetadataRecord, fallback: &str) -> String {
    let parts: Vec<&str> = [
        metadata.department.as_str(),
        metadata.class.as_str(),
        metadata.semester.as_str(),
    ]
    .into_iter()
    .filter(|p| !p.is_empty())
    .collect();

    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(" - ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(columns: &[&str], rows: &[&[&str]]) -> PreviewTable {
        PreviewTable {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_coerce_numeric_with_thousands_separator() {
        assert_eq!(
            coerce_cell("1,234.50", ColumnKind::Numeric),
            CellValue::Number(1234.5)
        );
    }

    #[test]
    fn test_coerce_unparseable_numeric_degrades_to_null() {
        assert_eq!(coerce_cell("Absent", ColumnKind::Numeric), CellValue::Null);
        assert_eq!(coerce_cell("", ColumnKind::Numeric), CellValue::Null);
        assert_eq!(coerce_cell("", ColumnKind::Text), CellValue::Null);
    }

    #[test]
    fn test_commit_types_and_coerces() {
        let p = preview(
            &["student_name", "total_marks"],
            &[&["Ali", "90"], &["Sara", "1,234.50"], &["Omar", "Absent"]],
        );
        let dataset = commit_preview(&p, &IndexMap::new(), &ExtractionConfig::default());

        assert_eq!(dataset.columns[0].kind, ColumnKind::Text);
        assert_eq!(dataset.columns[1].kind, ColumnKind::Numeric);
        assert_eq!(dataset.rows[0][1], CellValue::Number(90.0));
        assert_eq!(dataset.rows[1][1], CellValue::Number(1234.5));
        assert_eq!(dataset.rows[2][1], CellValue::Null);
        assert_eq!(dataset.rows[0][0], CellValue::Text("Ali".to_string()));
    }

    #[test]
    fn test_rename_applies_before_inference() {
        // "col1" would be type-inferred; renamed to an identifier-free
        // name the numeric values win, and the new name is what the
        // final dataset carries.
        let p = preview(&["col1"], &[&["18"], &["20"], &["19"]]);
        let mut renames = IndexMap::new();
        renames.insert("col1".to_string(), "midterm_score".to_string());
        let dataset = commit_preview(&p, &renames, &ExtractionConfig::default());

        assert_eq!(dataset.column_names(), vec!["midterm_score"]);
        assert_eq!(dataset.columns[0].kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_rename_onto_forced_text_name() {
        // Inference runs on the post-rename name, so renaming a numeric
        // column to student_id forces it to text.
        let p = preview(&["col1"], &[&["101"], &["102"]]);
        let mut renames = IndexMap::new();
        renames.insert("col1".to_string(), "student_id".to_string());
        let dataset = commit_preview(&p, &renames, &ExtractionConfig::default());

        assert_eq!(dataset.columns[0].kind, ColumnKind::Text);
        assert_eq!(dataset.rows[0][0], CellValue::Text("101".to_string()));
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("2024 results!"), "student_marks_c_2024_results_");
        assert_eq!(table_name(""), "student_marks_col");
    }

    #[test]
    fn test_export_title() {
        let metadata = MetadataRecord {
            department: "CS".into(),
            class: String::new(),
            semester: "5".into(),
            course_session: String::new(),
        };
        assert_eq!(export_title(&metadata, "sheet"), "CS - 5");
        assert_eq!(export_title(&MetadataRecord::default(), "sheet"), "sheet");
    }
}
