//! Catalog store: the titles input and the persisted book catalog.
//!
//! On disk both are JSON:
//!
//! ```text
//! book_titles.json   ["The Judge's List", "Atlas Shrugged", ...]
//! books.json         {"The Judge's List": {"title": ..., "author": [...],
//!                     "subjects": [...], "ratings_average": 3.9,
//!                     "readinglog_count": 412}, ...}
//! ```
//!
//! Unknown numerics are written as `null`. Catalogs written with the legacy
//! `"N/A"` strings still load, as unknown. Entry order is preserved in both
//! directions.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{Book, UNTITLED};
use crate::{Error, Result};

// ============================================================================
// CatalogStore trait
// ============================================================================

/// Persistence contract for titles and catalogs.
pub trait CatalogStore {
    /// Titles to look up, lower-cased and de-duplicated, in file order.
    fn load_titles(&self) -> Result<Vec<String>>;

    /// Persist the catalog, keyed by title.
    fn save_catalog(&self, books: &[Book]) -> Result<()>;

    /// Read a catalog written by `save_catalog`.
    fn load_catalog(&self) -> Result<Vec<Book>>;
}

// ============================================================================
// JSON files
// ============================================================================

/// File-backed [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    pub titles_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(titles_path: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        Self { titles_path: titles_path.into(), catalog_path: catalog_path.into() }
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load_titles(&self) -> Result<Vec<String>> {
        let raw: Vec<String> = serde_json::from_reader(open(&self.titles_path)?)
            .map_err(|e| Error::Catalog(format!("{}: {e}", self.titles_path.display())))?;
        let titles = prepare_titles(raw);
        tracing::info!(path = %self.titles_path.display(), count = titles.len(), "loaded titles");
        Ok(titles)
    }

    fn save_catalog(&self, books: &[Book]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.catalog_path)?);
        write_catalog(&mut writer, books)?;
        writer.flush()?;
        tracing::info!(path = %self.catalog_path.display(), count = books.len(), "saved catalog");
        Ok(())
    }

    fn load_catalog(&self) -> Result<Vec<Book>> {
        let books = read_catalog(open(&self.catalog_path)?)
            .map_err(|e| Error::Catalog(format!("{}: {e}", self.catalog_path.display())))?;
        tracing::info!(path = %self.catalog_path.display(), count = books.len(), "loaded catalog");
        Ok(books)
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::Catalog(format!("{}: {e}", path.display())))
}

/// Lower-case titles and drop blanks and repeats, keeping first occurrence.
pub fn prepare_titles(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

// ============================================================================
// Encoding
// ============================================================================

/// Write a title-keyed catalog. Repeated titles collapse to one entry at the
/// first position, carrying the last payload.
pub fn write_catalog<W: Write>(writer: W, books: &[Book]) -> Result<()> {
    serde_json::to_writer_pretty(writer, &CatalogMap(&dedup_last_wins(books)))?;
    Ok(())
}

pub fn read_catalog<R: std::io::Read>(reader: R) -> serde_json::Result<Vec<Book>> {
    let CatalogEntries(books) = serde_json::from_reader(reader)?;
    Ok(books)
}

fn dedup_last_wins(books: &[Book]) -> Vec<&Book> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<&Book> = Vec::with_capacity(books.len());
    for book in books {
        match position.get(book.title.as_str()) {
            Some(&i) => out[i] = book,
            None => {
                position.insert(book.title.as_str(), out.len());
                out.push(book);
            }
        }
    }
    out
}

struct CatalogMap<'a>(&'a [&'a Book]);

impl Serialize for CatalogMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for book in self.0 {
            map.serialize_entry(&book.title, book)?;
        }
        map.end()
    }
}

/// Catalog entries in file order. An entry without its own title takes the
/// map key, or the untitled sentinel when the key is blank too.
struct CatalogEntries(Vec<Book>);

impl<'de> Deserialize<'de> for CatalogEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CatalogEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of title to book")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut books = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, mut book)) = access.next_entry::<String, Book>()? {
                    if book.title.trim().is_empty() {
                        book.title = if key.trim().is_empty() { UNTITLED.to_string() } else { key };
                    }
                    books.push(book);
                }
                Ok(CatalogEntries(books))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prepare_titles() {
        let titles = prepare_titles(vec![
            "The Judge's List".to_string(),
            "  ".to_string(),
            "the judge's list".to_string(),
            "Atlas Shrugged".to_string(),
        ]);
        assert_eq!(titles, vec!["the judge's list", "atlas shrugged"]);
    }

    #[test]
    fn test_write_then_read_keeps_order_and_unknowns() {
        let books = vec![
            Book::new("Zebra").with_subjects(["z"]).with_readinglog_count(0),
            Book::new("Apple").with_author(["A. Author"]).with_rating(3.5),
        ];
        let mut buf = Vec::new();
        write_catalog(&mut buf, &books).unwrap();
        let back = read_catalog(buf.as_slice()).unwrap();
        assert_eq!(back, books);
    }

    #[test]
    fn test_unknowns_written_as_null() {
        let mut buf = Vec::new();
        write_catalog(&mut buf, &[Book::new("Dune")]).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["Dune"]["ratings_average"], serde_json::Value::Null);
        assert_eq!(json["Dune"]["readinglog_count"], serde_json::Value::Null);
    }

    #[test]
    fn test_duplicate_titles_collapse() {
        let books = vec![
            Book::new("A").with_readinglog_count(1),
            Book::new("B"),
            Book::new("A").with_readinglog_count(2),
        ];
        let mut buf = Vec::new();
        write_catalog(&mut buf, &books).unwrap();
        let back = read_catalog(buf.as_slice()).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].title, "A");
        assert_eq!(back[0].readinglog_count, Some(2));
    }

    #[test]
    fn test_legacy_catalog_loads() {
        let legacy = r#"{
            "Atlas Shrugged": {"title": "Atlas Shrugged", "author": ["Ayn Rand"],
                               "subjects": ["Fiction"], "ratings_average": "N/A",
                               "readinglog_count": 1200},
            "Untitled Key": {"subjects": []}
        }"#;
        let books = read_catalog(legacy.as_bytes()).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].ratings_average, None);
        assert_eq!(books[0].readinglog_count, Some(1200));
        assert_eq!(books[1].title, "Untitled Key");
    }

    #[test]
    fn test_blank_titles_never_load_empty() {
        let mut blank = Book::new("Placeholder");
        blank.title = "   ".to_string();
        let mut empty = Book::new("Placeholder");
        empty.title = String::new();

        let mut buf = Vec::new();
        write_catalog(&mut buf, &[blank, empty]).unwrap();
        let back = read_catalog(buf.as_slice()).unwrap();
        assert_eq!(back[0].title, UNTITLED);
        assert_eq!(back[1].title, UNTITLED);

        let keyed = r#"{"Dune": {"title": "  "}}"#;
        assert_eq!(read_catalog(keyed.as_bytes()).unwrap()[0].title, "Dune");
    }

    #[test]
    fn test_non_finite_rating_saves_as_unknown() {
        let books = vec![Book::new("Dune").with_rating(f64::INFINITY)];
        let mut buf = Vec::new();
        write_catalog(&mut buf, &books).unwrap();
        let back = read_catalog(buf.as_slice()).unwrap();
        assert_eq!(back, books);
        assert_eq!(back[0].ratings_average, None);
    }

    #[test]
    fn test_rejects_non_map() {
        assert!(read_catalog("[1, 2]".as_bytes()).is_err());
    }
}
