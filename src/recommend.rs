//! Recommendation engine.
//!
//! Candidates are the seed's neighbors in the network. Each candidate is
//! re-checked against the seed with its own shared-subject threshold, which
//! is independent of the one-subject rule that created the edge. The
//! re-check intersects the full subject sets, so a tag every book carries
//! counts toward it unless `SharedSubjectCount::ExcludingTag` is chosen.
//! Survivors are ranked by reading-log count.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::network::Network;
use crate::{Error, Result};

/// Default minimum number of shared subjects for a recommendation.
pub const DEFAULT_MIN_SHARED_SUBJECTS: usize = 2;
/// Rating a neighbor needs when a high rating is required.
pub const HIGH_RATING: f64 = 4.0;

/// How the seed/neighbor overlap is counted when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharedSubjectCount {
    /// Count every shared subject, the excluded tag included.
    #[default]
    Raw,
    /// Ignore the network's excluded tag, as edge construction does.
    ExcludingTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendOptions {
    pub min_shared_subjects: usize,
    pub require_high_rating: bool,
    pub high_rating: f64,
    pub shared_count: SharedSubjectCount,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            min_shared_subjects: DEFAULT_MIN_SHARED_SUBJECTS,
            require_high_rating: false,
            high_rating: HIGH_RATING,
            shared_count: SharedSubjectCount::default(),
        }
    }
}

impl RecommendOptions {
    pub fn with_min_shared_subjects(mut self, min: usize) -> Self {
        self.min_shared_subjects = min;
        self
    }

    pub fn with_high_rating(mut self, required: bool) -> Self {
        self.require_high_rating = required;
        self
    }

    pub fn with_shared_count(mut self, mode: SharedSubjectCount) -> Self {
        self.shared_count = mode;
        self
    }
}

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    /// Raw count; `None` when unknown.
    pub readinglog_count: Option<u64>,
    pub ratings_average: Option<f64>,
    pub shared_subjects: usize,
}

/// Recommend books related to `seed_title`.
///
/// The seed lookup is exact and case-sensitive. An absent seed is
/// `Error::NotFound`. Results are sorted by reading-log count, highest first,
/// with unknown counts ranked as zero; equal counts keep neighbor order.
pub fn recommend(
    network: &Network,
    seed_title: &str,
    options: &RecommendOptions,
) -> Result<Vec<Recommendation>> {
    let seed = network
        .node_by_title(seed_title)
        .ok_or_else(|| Error::NotFound(format!("Book '{seed_title}' not found in the network")))?;

    let excluded = match options.shared_count {
        SharedSubjectCount::ExcludingTag => Some(network.excluded_tag()),
        SharedSubjectCount::Raw => None,
    };
    let seed_subjects = seed.book.subject_set(excluded);

    let mut picks: Vec<Recommendation> = network
        .neighbors(seed.id)
        .filter_map(|neighbor| {
            let shared = neighbor
                .book
                .subject_set(excluded)
                .intersection(&seed_subjects)
                .count();
            if shared < options.min_shared_subjects {
                return None;
            }
            if options.require_high_rating
                && !neighbor.ratings_average().is_some_and(|r| r >= options.high_rating)
            {
                return None;
            }
            Some(Recommendation {
                title: neighbor.title().to_string(),
                readinglog_count: neighbor.readinglog_count(),
                ratings_average: neighbor.ratings_average(),
                shared_subjects: shared,
            })
        })
        .collect();

    // Stable sort: ties keep neighbor order.
    picks.sort_by_key(|r| Reverse(r.readinglog_count.unwrap_or(0)));

    tracing::debug!(
        seed = seed_title,
        candidates = network.degree(seed.id),
        kept = picks.len(),
        "recommendations ranked"
    );
    Ok(picks)
}
