//! Confirm command - commit a staged preview to the database and
//! export the stored table.

use std::path::{Path, PathBuf};

use colored::Colorize;
use gradesheet::{Pipeline, export_title, table_name};
use indexmap::IndexMap;

use crate::db;
use crate::export;

pub fn run(
    token: String,
    source: String,
    rename: Vec<String>,
    store_dir: PathBuf,
    database: PathBuf,
    export_dir: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let renames = parse_renames(&rename)?;
    let pipeline = Pipeline::new(&store_dir);

    let dataset = pipeline.confirm(&token, &renames)?;
    let stem = source_stem(&source);
    let table = table_name(&stem);

    if verbose {
        eprintln!(
            "{} {} rows, {} columns into table {}",
            "Committing".cyan().bold(),
            dataset.row_count(),
            dataset.columns.len(),
            table
        );
    }

    let inserted = db::persist(&database, &table, &dataset)?;
    println!(
        "{} {} rows into {}",
        "Imported".green().bold(),
        inserted.to_string().white().bold(),
        table.white().bold()
    );

    // Title from the committed metadata columns, falling back to the
    // source name.
    let metadata = dataset_metadata(&dataset);
    let title = export_title(&metadata, &stem);

    let export_path = export::export_table(&database, &table, &export_dir, &stem, &title)?;
    println!(
        "{} {}",
        "Exported".green().bold(),
        export_path.display().to_string().cyan()
    );

    Ok(())
}

/// Parse repeated `OLD=NEW` arguments, preserving order.
fn parse_renames(args: &[String]) -> Result<IndexMap<String, String>, String> {
    let mut renames = IndexMap::new();
    for arg in args {
        match arg.split_once('=') {
            Some((old, new)) if !old.is_empty() && !new.is_empty() => {
                renames.insert(old.to_string(), new.to_string());
            }
            _ => return Err(format!("Invalid rename '{arg}'. Use OLD=NEW.")),
        }
    }
    Ok(renames)
}

/// File stem of the source argument (accepts either a name or a path).
fn source_stem(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

/// Recover the uniform metadata column values from the first committed
/// row for the export title.
fn dataset_metadata(dataset: &gradesheet::FinalDataset) -> gradesheet::MetadataRecord {
    let first = dataset.rows.first();
    let value_of = |field: &str| -> String {
        dataset
            .columns
            .iter()
            .position(|c| c.name == field)
            .and_then(|index| first.and_then(|row| row.get(index)))
            .and_then(|cell| match cell {
                gradesheet::CellValue::Text(value) => Some(value.clone()),
                _ => None,
            })
            .unwrap_or_default()
    };

    gradesheet::MetadataRecord {
        department: value_of("department"),
        class: value_of("class"),
        semester: value_of("semester"),
        course_session: value_of("course_session"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_renames() {
        let renames =
            parse_renames(&["col1=midterm_score".to_string(), "col2=grade".to_string()]).unwrap();
        assert_eq!(renames["col1"], "midterm_score");
        assert_eq!(renames["col2"], "grade");
        assert!(parse_renames(&["broken".to_string()]).is_err());
    }

    #[test]
    fn test_source_stem() {
        assert_eq!(source_stem("marks.pdf"), "marks");
        assert_eq!(source_stem("dir/2024_marks.pdf"), "2024_marks");
    }
}
