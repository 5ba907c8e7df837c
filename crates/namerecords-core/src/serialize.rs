// ABOUTME: Converts persisted name records into the client-facing JSON shape.
// ABOUTME: String fields are HTML-escaped so stored markup is never returned raw.

use serde::Serialize;

use crate::model::NameRecord;

/// The escaped output representation of a `NameRecord`.
/// `recent` serializes as `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedNameRecord {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub era: String,
    pub recent: Option<bool>,
}

pub fn serialize(record: &NameRecord) -> SerializedNameRecord {
    SerializedNameRecord {
        id: record.id,
        name: escape_html(&record.name),
        gender: escape_html(&record.gender),
        era: escape_html(&record.era),
        recent: record.recent,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
