//! Book, the canonical catalog entity.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Title given to records that arrive without one.
///
/// This is a sentinel, not a real title: the catalog pipeline drops books
/// carrying it.
pub const UNTITLED: &str = "N/A";

/// A book in the catalog.
///
/// `ratings_average` and `readinglog_count` are `None` when the source did
/// not know them, which is distinct from a real `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ratings_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub readinglog_count: Option<u64>,
}

impl Book {
    /// A book with only a title; an empty title becomes [`UNTITLED`].
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            title: if title.is_empty() { UNTITLED.to_string() } else { title },
            author: Vec::new(),
            subjects: Vec::new(),
            ratings_average: None,
            readinglog_count: None,
        }
    }

    pub fn with_author(mut self, author: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.author = author.into_iter().map(Into::into).collect();
        self
    }

    /// Set the subject tags. Duplicates are dropped, first occurrence kept.
    pub fn with_subjects(mut self, subjects: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subjects = dedup_subjects(subjects.into_iter().map(Into::into));
        self
    }

    /// Set the average rating. Non-finite values are stored as unknown.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.ratings_average = rating.is_finite().then_some(rating);
        self
    }

    pub fn with_readinglog_count(mut self, count: u64) -> Self {
        self.readinglog_count = Some(count);
        self
    }

    pub fn is_untitled(&self) -> bool {
        self.title == UNTITLED
    }

    /// Subjects as a set, ignoring `excluded` when given.
    pub fn subject_set<'a>(&'a self, excluded: Option<&str>) -> HashSet<&'a str> {
        self.subjects
            .iter()
            .map(String::as_str)
            .filter(|s| Some(*s) != excluded)
            .collect()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, Subjects: {}, Ratings Average: {}, Reading Log Count: {}",
            self.title,
            self.author.join(", "),
            self.subjects.join(", "),
            display_unknown(self.ratings_average),
            display_unknown(self.readinglog_count),
        )
    }
}

/// Render an optional value, using `N/A` for unknown.
pub fn display_unknown<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

pub(crate) fn dedup_subjects(subjects: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    subjects.filter(|s| seen.insert(s.clone())).collect()
}

/// Accepts a number, `null`, or a string. Strings that do not parse
/// (including the legacy `"N/A"`) read as unknown.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Known(T),
        Text(String),
        Null(()),
    }

    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Known(v)) => Some(v),
        Some(Lenient::Text(s)) => s.trim().parse().ok(),
        Some(Lenient::Null(())) | None => None,
    })
}
