//! Open Library search provider and the NYT bestseller title list.
//!
//! ```text
//! title → GET openlibrary.org/search.json?title=… → docs[0]
//! year  → GET api.nytimes.com/…/full-overview.json → titles
//! ```
//!
//! Both calls are blocking. Timeouts and HTTP errors surface as
//! `Error::Provider`, which the catalog pipeline downgrades to a skip.

use std::time::Duration;

use hashbrown::HashSet;
use serde::Deserialize;
use serde_json::Value;

use super::MetadataProvider;
use crate::{Error, Result};

const SEARCH_URL: &str = "https://openlibrary.org/search.json";
const NYT_OVERVIEW_URL: &str = "https://api.nytimes.com/svc/books/v3/lists/full-overview.json";

/// Blocking Open Library client.
pub struct OpenLibraryProvider {
    agent: ureq::Agent,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "numFound", default)]
    num_found: u64,
    #[serde(default)]
    docs: Vec<Value>,
}

impl OpenLibraryProvider {
    pub fn new() -> Self {
        Self::with_base_url(SEARCH_URL)
    }

    /// Point the provider at another search endpoint (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(15))
            .build();
        Self { agent, base_url: base_url.into() }
    }
}

impl Default for OpenLibraryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for OpenLibraryProvider {
    fn fetch_by_title(&self, title: &str) -> Result<Option<Value>> {
        let response = self
            .agent
            .get(&self.base_url)
            .query("title", title)
            .call()
            .map_err(|e| provider_error("Open Library search", e))?;
        let body: SearchResponse = response
            .into_json()
            .map_err(|e| Error::Provider(format!("Open Library response: {e}")))?;

        tracing::debug!(title, num_found = body.num_found, "open library search");
        Ok(first_doc(body))
    }
}

/// The best match of a search: `docs[0]`, or `None` when nothing was found.
fn first_doc(response: SearchResponse) -> Option<Value> {
    if response.num_found == 0 {
        return None;
    }
    response.docs.into_iter().next()
}

// ============================================================================
// NYT bestseller lists
// ============================================================================

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    #[serde(default)]
    results: OverviewResults,
}

#[derive(Debug, Default, Deserialize)]
struct OverviewResults {
    #[serde(default)]
    lists: Vec<BestsellerList>,
}

#[derive(Debug, Deserialize)]
struct BestsellerList {
    #[serde(default)]
    books: Vec<BestsellerEntry>,
}

#[derive(Debug, Deserialize)]
struct BestsellerEntry {
    title: String,
}

/// Titles on every NYT list published for the last day of `year`, each
/// title once, in list order.
pub fn fetch_bestseller_titles(year: i32, api_key: &str) -> Result<Vec<String>> {
    let published = format!("{year}-12-31");
    let response = ureq::get(NYT_OVERVIEW_URL)
        .query("published_date", &published)
        .query("api-key", api_key)
        .timeout(Duration::from_secs(30))
        .call()
        .map_err(|e| provider_error("NYT overview", e))?;
    let body: OverviewResponse = response
        .into_json()
        .map_err(|e| Error::Provider(format!("NYT overview response: {e}")))?;

    let titles = bestseller_titles(body);
    tracing::info!(year, count = titles.len(), "fetched bestseller titles");
    Ok(titles)
}

/// Titles across all lists, each once, in list order.
fn bestseller_titles(response: OverviewResponse) -> Vec<String> {
    let mut seen = HashSet::new();
    response
        .results
        .lists
        .into_iter()
        .flat_map(|list| list.books)
        .map(|entry| entry.title)
        .filter(|title| seen.insert(title.clone()))
        .collect()
}

fn provider_error(what: &str, error: ureq::Error) -> Error {
    match error {
        ureq::Error::Status(code, _) => Error::Provider(format!("{what}: HTTP {code}")),
        ureq::Error::Transport(transport) => Error::Provider(format!("{what}: {transport}")),
    }
}
