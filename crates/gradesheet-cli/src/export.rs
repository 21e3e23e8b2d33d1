//! Export collaborator: re-read the stored table and write a delimited
//! file with a title line.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use rusqlite::types::Value;

/// Export a stored table as CSV: one title line, a header row, then the
/// data rows as the database returned them. Existing export names get a
/// numeric suffix instead of being overwritten.
pub fn export_table(
    db_path: &Path,
    table_name: &str,
    export_dir: &Path,
    source_stem: &str,
    title: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(export_dir)?;

    let conn = Connection::open(db_path)?;
    let mut statement = conn.prepare(&format!("SELECT * FROM \"{}\"", table_name))?;
    let column_names: Vec<String> = statement
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut records: Vec<Vec<String>> = Vec::new();
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let mut record = Vec::with_capacity(column_names.len());
        for index in 0..column_names.len() {
            let value: Value = row.get(index)?;
            record.push(display_value(value));
        }
        records.push(record);
    }

    let path = unique_export_path(export_dir, source_stem);
    // Flexible: the title line is a single field above the table.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
    writer.write_record([title])?;
    writer.write_record(&column_names)?;
    for record in &records {
        writer.write_record(record)?;
    }
    writer.flush()?;

    Ok(path)
}

fn display_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => v,
        Value::Blob(_) => String::new(),
    }
}

/// First free `<stem>.csv`, `<stem>_1.csv`, `<stem>_2.csv`, ... path.
fn unique_export_path(export_dir: &Path, source_stem: &str) -> PathBuf {
    let mut path = export_dir.join(format!("{source_stem}.csv"));
    let mut counter = 0;
    while path.exists() {
        counter += 1;
        path = export_dir.join(format!("{source_stem}_{counter}.csv"));
    }
    path
}
