//! Header detection and canonical schema derivation.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// A canonical, deduplicated column schema derived from raw headers.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSchema {
    /// Canonical column names, unique, in header order.
    pub columns: Vec<String>,
    /// Original (trimmed) header cell text to its canonical name.
    pub mapping: IndexMap<String, String>,
}

/// Canonical-name dictionary tested in declaration order; the first
/// key with any matching pattern wins. Patterns are whole-word matches
/// against the normalized (lowercase alphanumeric) header text.
static HEADER_MAP: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    fn word(pattern: &str) -> Regex {
        Regex::new(&format!(r"\b{pattern}\b")).unwrap()
    }
    vec![
        (
            "student_name",
            vec![word(r"student\s*name"), word(r"name"), word(r"candidate\s*name")],
        ),
        (
            "student_id",
            vec![word(r"reg(istration)?\s*no"), word(r"roll\s*no"), word(r"student\s*id")],
        ),
        (
            "internal_marks",
            vec![word(r"internal"), word(r"int(er?nals)?"), word(r"internal\s*marks")],
        ),
        (
            "mid_marks",
            vec![word(r"mid"), word(r"mid-?term"), word(r"midterm")],
        ),
        (
            "final_marks",
            vec![word(r"final"), word(r"theory"), word(r"final\s*marks")],
        ),
        (
            "practical_marks",
            vec![word(r"practical"), word(r"lab"), word(r"practical\s*marks")],
        ),
        (
            "total_marks",
            vec![word(r"total"), word(r"obtained"), word(r"grand\s*total")],
        ),
    ]
});

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9 ]").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Decide whether a table's first row is a header or disguised data.
///
/// `nonempty` counts cells that are non-empty and not the literal text
/// "none"; `unique` counts distinct stringified cells. The row is a
/// header when `nonempty >= 1` and `unique >= ceil(threshold * width)`.
/// A few blank header cells are tolerated; a row of mostly repeated
/// filler is rejected as data.
///
/// Known limitation: a single all-distinct, all-numeric data row also
/// passes this test and is consumed as a header.
pub fn detect_header_row(cells: &[Option<String>], threshold: f64) -> bool {
    if cells.is_empty() {
        return false;
    }

    let stringified: Vec<&str> = cells.iter().map(|c| c.as_deref().unwrap_or("")).collect();

    let nonempty = stringified
        .iter()
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
        .count();
    let unique = stringified.iter().collect::<HashSet<_>>().len();

    let required = ((threshold * cells.len() as f64).ceil() as usize).max(1);
    nonempty >= 1 && unique >= required
}

/// Placeholder headers `col1..colN` for a table with no header row.
pub fn synthetic_headers(column_count: usize) -> Vec<String> {
    (1..=column_count).map(|i| format!("col{i}")).collect()
}

/// Reduce an identifier candidate to alphanumerics and underscores,
/// prefix a leading digit, and bound the length. Empty input falls back
/// to the literal `col`.
pub fn sanitize_identifier(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "col".to_string();
    }

    let safe: String = trimmed
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let safe = if safe.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("c_{safe}")
    } else {
        safe
    };
    safe.chars().take(64).collect()
}

/// Map raw header cells to a canonical, collision-free schema.
///
/// Each cell is normalized (lowercase, non-alphanumerics to spaces,
/// collapsed) and tested against [`HEADER_MAP`]; unmatched cells fall
/// back to a sanitized identifier of the normalized text. Names are
/// deduplicated with `_2`, `_3`, ... suffixes tracked in an explicit
/// set of already-assigned names.
pub fn normalize_headers(raw_headers: &[String]) -> CanonicalSchema {
    let mut columns = Vec::with_capacity(raw_headers.len());
    let mut assigned: HashSet<String> = HashSet::new();
    let mut mapping = IndexMap::new();

    for raw in raw_headers {
        let cell = raw.trim().to_string();
        let lowercased = cell.to_lowercase();
        let lowered = NON_ALNUM.replace_all(&lowercased, " ");
        let lowered = SPACE_RUN.replace_all(&lowered, " ");
        let lowered = lowered.trim();

        let matched = HEADER_MAP.iter().find_map(|(canon, patterns)| {
            patterns
                .iter()
                .any(|p| p.is_match(lowered))
                .then(|| (*canon).to_string())
        });
        let base = matched.unwrap_or_else(|| sanitize_identifier(&lowered.replace(' ', "_")));

        let mut name = base.clone();
        let mut index = 1;
        while assigned.contains(&name) {
            index += 1;
            name = format!("{base}_{index}");
        }
        assigned.insert(name.clone());
        columns.push(name.clone());
        mapping.insert(cell, name);
    }

    CanonicalSchema { columns, mapping }
}
