//! Title search.
//!
//! Unlike the recommendation lookup, search is a case-insensitive substring
//! match. When several titles match, the first in node order wins.

use crate::model::BookNode;
use crate::network::Network;

/// First node whose title contains `fragment`, ignoring case.
pub fn search<'n>(network: &'n Network, fragment: &str) -> Option<&'n BookNode> {
    let needle = fragment.to_lowercase();
    let found = network
        .nodes()
        .find(|node| node.title().to_lowercase().contains(&needle));
    tracing::debug!(fragment, found = found.map(|n| n.title()), "title search");
    found
}
