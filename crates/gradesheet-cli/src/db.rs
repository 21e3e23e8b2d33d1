//! SQLite persistence collaborator.

use std::path::Path;

use gradesheet::{CellValue, FinalDataset};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

/// Create the target table if needed and insert every dataset row in
/// one transaction. Returns the number of rows inserted.
pub fn persist(
    db_path: &Path,
    table_name: &str,
    dataset: &FinalDataset,
) -> rusqlite::Result<usize> {
    let mut conn = Connection::open(db_path)?;
    conn.pragma_update(None, "foreign_keys", true)?;

    let columns_ddl: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| format!("\"{}\" {}", c.name, c.sql_type()))
        .collect();
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" ({});",
        table_name,
        columns_ddl.join(", ")
    ))?;

    let column_names: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect();
    let placeholders = vec!["?"; dataset.columns.len()];
    let insert_sql = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table_name,
        column_names.join(", "),
        placeholders.join(", ")
    );

    let tx = conn.transaction()?;
    {
        let mut statement = tx.prepare(&insert_sql)?;
        for row in &dataset.rows {
            statement.execute(params_from_iter(row.iter().map(sql_value)))?;
        }
    }
    tx.commit()?;

    Ok(dataset.rows.len())
}

fn sql_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Number(n) => Value::Real(*n),
        CellValue::Text(s) => Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradesheet::{ColumnKind, TypedColumn};
    use tempfile::tempdir;

    fn dataset() -> FinalDataset {
        FinalDataset {
            columns: vec![
                TypedColumn {
                    name: "student_name".into(),
                    kind: ColumnKind::Text,
                    width: Some(1000),
                },
                TypedColumn {
                    name: "total_marks".into(),
                    kind: ColumnKind::Numeric,
                    width: None,
                },
            ],
            rows: vec![
                vec![CellValue::Text("Ali".into()), CellValue::Number(90.0)],
                vec![CellValue::Text("Sara".into()), CellValue::Null],
            ],
        }
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let inserted = persist(&db_path, "student_marks_test", &dataset()).unwrap();
        assert_eq!(inserted, 2);

        let conn = Connection::open(&db_path).unwrap();
        let total: f64 = conn
            .query_row(
                "SELECT SUM(total_marks) FROM student_marks_test",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(total, 90.0);

        let nulls: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM student_marks_test WHERE total_marks IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 1);
    }

    #[test]
    fn test_persist_appends_to_existing_table() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        persist(&db_path, "student_marks_test", &dataset()).unwrap();
        persist(&db_path, "student_marks_test", &dataset()).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM student_marks_test", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 4);
    }
}
