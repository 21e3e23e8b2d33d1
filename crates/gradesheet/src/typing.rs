//! Column type inference.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::metadata::METADATA_COLUMNS;
use crate::preview::PreviewTable;

/// Storage bound for metadata and identifier text columns.
pub const IDENTIFIER_TEXT_WIDTH: usize = 1000;
/// Storage bound for general text columns.
pub const TEXT_WIDTH: usize = 500;

/// Persistence-facing column classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// A column with its inferred kind and storage width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedColumn {
    pub name: String,
    pub kind: ColumnKind,
    /// Maximum text length for `Text` columns; `None` for numeric.
    /// Storage sizing only, no semantic meaning.
    pub width: Option<usize>,
}

impl TypedColumn {
    /// SQL-ish type for the persistence collaborator.
    pub fn sql_type(&self) -> String {
        match self.kind {
            ColumnKind::Numeric => "FLOAT NULL".to_string(),
            ColumnKind::Text => format!("VARCHAR({}) NULL", self.width.unwrap_or(TEXT_WIDTH)),
        }
    }
}

static NUMERIC_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Whether a string value reads as a number once thousands-separator
/// commas and surrounding whitespace are removed.
pub fn is_numeric_value(value: &str) -> bool {
    let stripped = value.replace(',', "");
    let stripped = stripped.trim();
    !stripped.is_empty() && NUMERIC_VALUE.is_match(stripped)
}

/// Names that are never coerced to numbers: the metadata columns plus
/// the student identifier columns. Roll numbers look numeric but are
/// identifiers.
fn forced_text(name: &str) -> bool {
    METADATA_COLUMNS.contains(&name) || matches!(name, "student_name" | "student_id")
}

/// Classify every preview column as numeric or text.
///
/// A column is numeric when at least `threshold` of its values look
/// numeric (boundary inclusive). The vote tolerates stray annotations
/// like "Absent" or "-" inside an otherwise numeric marks column.
pub fn infer_column_kinds(preview: &PreviewTable, threshold: f64) -> Vec<TypedColumn> {
    preview
        .columns
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if forced_text(name) {
                return TypedColumn {
                    name: name.clone(),
                    kind: ColumnKind::Text,
                    width: Some(IDENTIFIER_TEXT_WIDTH),
                };
            }

            let total = preview.rows.len().max(1);
            let numeric = preview
                .rows
                .iter()
                .filter(|row| is_numeric_value(row.get(index).map_or("", |s| s.as_str())))
                .count();

            if numeric as f64 / total as f64 >= threshold {
                TypedColumn {
                    name: name.clone(),
                    kind: ColumnKind::Numeric,
                    width: None,
                }
            } else {
                TypedColumn {
                    name: name.clone(),
                    kind: ColumnKind::Text,
                    width: Some(TEXT_WIDTH),
                }
            }
        })
        .collect()
}
