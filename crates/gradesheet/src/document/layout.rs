//! Text-layout grid detection.
//!
//! Typeset grade sheets keep the text layer aligned in columns, so cells
//! on one line are separated by tabs or runs of spaces. This module
//! recovers grids from that structure; it is not a general PDF layout
//! analyzer.

use once_cell::sync::Lazy;
use regex::Regex;

use super::grid::Grid;

/// Cell separator: a tab, or two or more consecutive spaces.
static CELL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t| {2,}").unwrap());

/// Minimum consecutive multi-cell lines that form a grid. A single
/// aligned line is almost always a caption or a labeled field, not a
/// table.
const MIN_GRID_ROWS: usize = 2;

/// Split one text line into cells. Lines that yield fewer than two
/// cells are not tabular.
fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    CELL_SEPARATOR
        .split(trimmed)
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Detect grids in a page's text.
///
/// Consecutive lines with two or more cells form one grid; any other
/// line ends the current grid. Each grid is normalized to its widest
/// row.
pub fn detect_grids(text: &str) -> Vec<Grid> {
    let mut grids = Vec::new();
    let mut block: Vec<Vec<Option<String>>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            block.push(cells.into_iter().map(Some).collect());
        } else {
            flush_block(&mut block, &mut grids);
        }
    }
    flush_block(&mut block, &mut grids);

    grids
}

fn flush_block(block: &mut Vec<Vec<Option<String>>>, grids: &mut Vec<Grid>) {
    if block.len() >= MIN_GRID_ROWS {
        grids.push(Grid::from_rows(std::mem::take(block)));
    } else {
        block.clear();
    }
}
