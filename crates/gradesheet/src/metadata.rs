//! Document-level metadata extraction from free page text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The metadata columns prepended to every shaped dataset, in their
/// final left-to-right order.
pub const METADATA_COLUMNS: [&str; 4] = ["department", "class", "semester", "course_session"];

/// Document-level descriptive fields extracted from free text.
///
/// Fields that were not found stay empty. Immutable once extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub department: String,
    pub class: String,
    pub semester: String,
    pub course_session: String,
}

impl MetadataRecord {
    /// Value of a metadata column by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "department" => Some(&self.department),
            "class" => Some(&self.class),
            "semester" => Some(&self.semester),
            "course_session" => Some(&self.course_session),
            _ => None,
        }
    }

    fn field_mut(&mut self, field: &str) -> &mut String {
        match field {
            "department" => &mut self.department,
            "class" => &mut self.class,
            "semester" => &mut self.semester,
            "course_session" => &mut self.course_session,
            _ => unreachable!("unknown metadata field"),
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Labeled-field patterns, one ordered alternative list per field.
/// Declaration order and per-field alternative order are part of the
/// contract: the first alternative that matches wins.
static FIELD_PATTERNS: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            "department",
            vec![
                re(r"(?i)department\s*[:-]\s*([A-Za-z0-9&,.\s-]+)"),
                re(r"(?i)dept\s*[:-]\s*([A-Za-z0-9&,.\s-]+)"),
            ],
        ),
        (
            "class",
            vec![
                re(r"(?i)class\s*[:-]\s*([A-Za-z0-9/&\s-]+)"),
                re(r"(?i)section\s*[:-]\s*([A-Za-z0-9/&\s-]+)"),
            ],
        ),
        (
            "semester",
            vec![
                re(r"(?i)semester\s*[:-]\s*([A-Za-z0-9\s-]+)"),
                re(r"(?i)sem\s*[:-]\s*([A-Za-z0-9\s-]+)"),
            ],
        ),
        (
            "course_session",
            vec![
                re(r"(?i)session\s*[:-]\s*([A-Za-z0-9/\s-]+)"),
                re(r"(?i)course session\s*[:-]\s*([A-Za-z0-9/\s-]+)"),
            ],
        ),
    ]
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| re(r"\s+"));
static TRAILING_SEPARATORS: Lazy<Regex> = Lazy::new(|| re(r"[\s.:;,/-]+$"));

/// Extract a metadata record from concatenated page text.
///
/// Whitespace runs are collapsed before matching so labels and values
/// split across lines still match. Fields with no matching alternative
/// stay empty.
pub fn extract_metadata(text: &str) -> MetadataRecord {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let collapsed = collapsed.trim();

    let mut record = MetadataRecord::default();
    for (field, patterns) in FIELD_PATTERNS.iter() {
        for pattern in patterns {
            if let Some(captures) = pattern.captures(collapsed) {
                let value = captures.get(1).map_or("", |m| m.as_str()).trim();
                let value = TRAILING_SEPARATORS.replace(value, "");
                *record.field_mut(field) = value.trim().to_string();
                break;
            }
        }
    }
    record
}
