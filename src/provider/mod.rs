//! # Metadata Providers
//!
//! A provider turns a title into a raw metadata record. Providers may be
//! unreliable: a lookup can fail or come back empty, and either outcome
//! only drops that one title from the catalog.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `StaticProvider` | (default) | In-memory records, for offline use and tests |
//! | `OpenLibraryProvider` | `openlibrary` | Open Library search API |

#[cfg(feature = "openlibrary")]
pub mod openlibrary;

use hashbrown::HashMap;
use serde_json::Value;

use crate::model::Book;
use crate::normalize::normalize;
use crate::Result;

#[cfg(feature = "openlibrary")]
pub use openlibrary::{fetch_bestseller_titles, OpenLibraryProvider};

// ============================================================================
// MetadataProvider trait
// ============================================================================

/// Source of raw metadata records.
pub trait MetadataProvider {
    /// Look up one title. `Ok(None)` means the provider has no record.
    fn fetch_by_title(&self, title: &str) -> Result<Option<Value>>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn fetch_by_title(&self, title: &str) -> Result<Option<Value>> {
        (**self).fetch_by_title(title)
    }
}

// ============================================================================
// StaticProvider
// ============================================================================

/// Records held in memory, looked up by case-insensitive title.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: HashMap<String, Value>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, title: &str, record: Value) -> Self {
        self.insert(title, record);
        self
    }

    pub fn insert(&mut self, title: &str, record: Value) {
        self.records.insert(title.to_lowercase(), record);
    }
}

impl MetadataProvider for StaticProvider {
    fn fetch_by_title(&self, title: &str) -> Result<Option<Value>> {
        Ok(self.records.get(&title.to_lowercase()).cloned())
    }
}

// ============================================================================
// Catalog assembly
// ============================================================================

/// Fetch and normalize every title, skipping failures.
///
/// A provider error, a missing record, or a record without a usable title
/// drops that title and the batch carries on.
pub fn collect_catalog<P, I, S>(provider: &P, titles: I) -> Vec<Book>
where
    P: MetadataProvider + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut books = Vec::new();
    let mut skipped = 0usize;

    for title in titles {
        let title = title.as_ref();
        let record = match provider.fetch_by_title(title) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(title, error = %e, "metadata lookup failed, skipping");
                skipped += 1;
                continue;
            }
        };

        match normalize(record.as_ref()) {
            Some(book) if !book.is_untitled() => {
                tracing::debug!(title, found = %book.title, "normalized record");
                books.push(book);
            }
            Some(_) => {
                tracing::warn!(title, "record has no title, skipping");
                skipped += 1;
            }
            None => {
                tracing::warn!(title, "no metadata found, skipping");
                skipped += 1;
            }
        }
    }

    tracing::info!(collected = books.len(), skipped, "catalog assembled");
    books
}
