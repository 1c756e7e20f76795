//! Record normalizer: raw metadata record → canonical [`Book`].
//!
//! A raw record is whatever the metadata provider returned, usually an Open
//! Library search document. Every field is optional. Missing or ill-typed
//! fields fall back to their defaults; only an absent record yields nothing.
//!
//! | Book field | Record keys (first hit wins) | Default |
//! |------------|------------------------------|---------|
//! | `title` | `title` | `"N/A"` |
//! | `author` | `author_name`, `author` | `[]` |
//! | `subjects` | `subject`, `subjects` | `[]` |
//! | `ratings_average` | `ratings_average` | unknown |
//! | `readinglog_count` | `readinglog_count` | unknown |

use serde_json::{Map, Value};

use crate::model::{Book, UNTITLED};
use crate::model::book::dedup_subjects;

/// Normalize a raw record. Returns `None` only when there is no record.
pub fn normalize(raw: Option<&Value>) -> Option<Book> {
    let record = match raw? {
        Value::Object(map) => map,
        Value::Null => return None,
        other => {
            tracing::debug!(kind = json_kind(other), "metadata record is not an object");
            return None;
        }
    };

    let title = match record.get("title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => UNTITLED.to_string(),
    };

    Some(Book {
        title,
        author: string_list(record, &["author_name", "author"]),
        subjects: dedup_subjects(string_list(record, &["subject", "subjects"]).into_iter()),
        ratings_average: record.get("ratings_average").and_then(as_rating),
        readinglog_count: record.get("readinglog_count").and_then(as_count),
    })
}

fn string_list(record: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let Some(value) = keys.iter().find_map(|k| record.get(*k)) else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn as_rating(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|r| r.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|r| r.is_finite()),
        _ => None,
    }
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
