//! Upload command - extract a grade sheet and stage the preview.

use std::path::PathBuf;

use colored::Colorize;
use gradesheet::{GradesheetError, PdfDocument, Pipeline};

pub fn run(
    file: PathBuf,
    store_dir: PathBuf,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let pipeline = Pipeline::new(&store_dir);

    // A document that fails to open contributes nothing, which lands in
    // the same terminal state as a readable document with no tables.
    let outcome = match PdfDocument::open(&file) {
        Ok(document) => {
            if verbose {
                let summary = document.summary();
                eprintln!(
                    "{} {} ({} bytes, {} pages, {})",
                    "Opened".cyan().bold(),
                    summary.file,
                    summary.size_bytes,
                    summary.page_count,
                    summary.hash
                );
            }
            pipeline.upload(&document)
        }
        Err(e) => {
            if verbose {
                eprintln!("{} document unreadable: {}", "Warning:".yellow().bold(), e);
            }
            Err(GradesheetError::NoTablesDetected)
        }
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(GradesheetError::NoTablesDetected) => {
            return Err("no tables detected in document".into());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("{} {}", "Staged".green().bold(), outcome.token.white().bold());
    println!();

    println!("{}", "Metadata".cyan().bold());
    println!("  department:     {}", display_or_dash(&outcome.metadata.department));
    println!("  class:          {}", display_or_dash(&outcome.metadata.class));
    println!("  semester:       {}", display_or_dash(&outcome.metadata.semester));
    println!("  course_session: {}", display_or_dash(&outcome.metadata.course_session));
    println!();

    println!("{}", "Columns".cyan().bold());
    for (raw, canonical) in &outcome.header_mapping {
        println!("  {} -> {}", display_or_dash(raw), canonical);
    }
    println!();

    println!(
        "{} ({} of {} rows)",
        "Preview".cyan().bold(),
        outcome.preview_rows.len(),
        outcome.row_count
    );
    println!("  {}", outcome.preview_columns.join(" | "));
    for row in &outcome.preview_rows {
        println!("  {}", row.join(" | "));
    }
    println!();
    println!(
        "Run {} to import.",
        format!("gradesheet confirm {} <SOURCE>", outcome.token).cyan()
    );

    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
