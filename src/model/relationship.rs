//! Similarity relationship (undirected edge) between two books.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Opaque relationship identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelId(pub u64);

impl std::fmt::Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected similarity edge.
///
/// `src` is always the endpoint inserted first; the pair is unordered for
/// every lookup. `weight` equals `common_subjects.len()` and is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelId,
    pub src: NodeId,
    pub dst: NodeId,
    /// Shared subjects, excluding the network's excluded tag. Sorted.
    pub common_subjects: Vec<String>,
    pub weight: usize,
}

impl Relationship {
    pub fn new(id: RelId, src: NodeId, dst: NodeId, common_subjects: Vec<String>) -> Self {
        let weight = common_subjects.len();
        Self { id, src, dst, common_subjects, weight }
    }

    /// The "other" end of the relationship from the given node.
    pub fn other_node(&self, from: NodeId) -> Option<NodeId> {
        if from == self.src { Some(self.dst) }
        else if from == self.dst { Some(self.src) }
        else { None }
    }

    /// True if this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.src == a && self.dst == b) || (self.src == b && self.dst == a)
    }
}
