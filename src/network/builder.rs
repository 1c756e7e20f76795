//! Similarity graph builder.
//!
//! Turns a book sequence into a [`Network`]:
//!
//! ```text
//! books → upsert nodes (size, color band) → pair scan → edges
//! ```
//!
//! Two pair-scan strategies produce the same edges in the same order:
//! `Pairwise` compares every unordered pair (O(n²)), `InvertedIndex` only
//! compares books that share at least one subject.

use std::collections::BTreeSet;

use hashbrown::HashMap;

use crate::model::*;
use super::Network;

/// Near-universal tag in the bestseller catalog, ignored for similarity.
pub const DEFAULT_EXCLUDED_TAG: &str = "New York Times Bestseller";
pub const DEFAULT_SIZE_SCALE: u64 = 10;
pub const DEFAULT_MIN_SIZE: u64 = 10;

// ============================================================================
// Configuration
// ============================================================================

/// How candidate pairs are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildStrategy {
    /// Compare every unordered pair.
    #[default]
    Pairwise,
    /// Compare only pairs found through a subject → books index.
    InvertedIndex,
}

/// Builder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub excluded_tag: String,
    /// Node size per reading-log entry.
    pub size_scale: u64,
    /// Node size when the reading-log count is unknown.
    pub min_size: u64,
    pub strategy: BuildStrategy,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            excluded_tag: DEFAULT_EXCLUDED_TAG.to_string(),
            size_scale: DEFAULT_SIZE_SCALE,
            min_size: DEFAULT_MIN_SIZE,
            strategy: BuildStrategy::default(),
        }
    }
}

impl NetworkConfig {
    pub fn with_excluded_tag(mut self, tag: impl Into<String>) -> Self {
        self.excluded_tag = tag.into();
        self
    }

    pub fn with_size_scale(mut self, scale: u64) -> Self {
        self.size_scale = scale;
        self
    }

    pub fn with_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

// ============================================================================
// Build
// ============================================================================

/// Node size for a reading-log count.
pub fn node_size(readinglog_count: Option<u64>, config: &NetworkConfig) -> u64 {
    match readinglog_count {
        Some(count) => count.saturating_mul(config.size_scale),
        None => config.min_size,
    }
}

/// Build the network. Never fails; an empty input gives an empty network.
///
/// Duplicate titles overwrite earlier payloads (last write wins) and keep
/// the first node position.
pub fn build(books: impl IntoIterator<Item = Book>, config: &NetworkConfig) -> Network {
    let mut network = Network::empty(config.excluded_tag.clone());

    for book in books {
        let size = node_size(book.readinglog_count, config);
        let color_band = ColorBand::from_rating(book.ratings_average);
        network.upsert_node(book, size, color_band);
    }

    let pairs = {
        let subjects: Vec<BTreeSet<&str>> = network
            .nodes()
            .map(|node| similarity_subjects(&node.book, &config.excluded_tag))
            .collect();
        match config.strategy {
            BuildStrategy::Pairwise => pairwise(&subjects),
            BuildStrategy::InvertedIndex => inverted_index(&subjects),
        }
    };

    for (i, j, common) in pairs {
        let (src, dst) = (NodeId(i as u64), NodeId(j as u64));
        tracing::trace!(%src, %dst, weight = common.len(), "similarity edge");
        if let Err(e) = network.add_relationship(src, dst, common) {
            tracing::error!(error = %e, "dropping similarity edge");
        }
    }

    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        strategy = ?config.strategy,
        "built similarity network"
    );
    network
}

/// A book's subjects minus the excluded tag.
fn similarity_subjects<'a>(book: &'a Book, excluded_tag: &str) -> BTreeSet<&'a str> {
    book.subjects
        .iter()
        .map(String::as_str)
        .filter(|s| *s != excluded_tag)
        .collect()
}

type Pair = (usize, usize, Vec<String>);

fn common(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> Vec<String> {
    a.intersection(b).map(|s| s.to_string()).collect()
}

fn pairwise(subjects: &[BTreeSet<&str>]) -> Vec<Pair> {
    let mut pairs = Vec::new();
    for i in 0..subjects.len() {
        for j in (i + 1)..subjects.len() {
            let shared = common(&subjects[i], &subjects[j]);
            if !shared.is_empty() {
                pairs.push((i, j, shared));
            }
        }
    }
    pairs
}

fn inverted_index(subjects: &[BTreeSet<&str>]) -> Vec<Pair> {
    // Postings are filled in ascending node order, so each list is sorted.
    let mut postings: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, set) in subjects.iter().enumerate() {
        for subject in set {
            postings.entry(*subject).or_default().push(i);
        }
    }

    let mut pairs = Vec::new();
    for (i, set) in subjects.iter().enumerate() {
        let candidates: BTreeSet<usize> = set
            .iter()
            .filter_map(|s| postings.get(s))
            .flatten()
            .copied()
            .filter(|&j| j > i)
            .collect();
        for j in candidates {
            pairs.push((i, j, common(set, &subjects[j])));
        }
    }
    pairs
}
