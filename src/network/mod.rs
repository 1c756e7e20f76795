//! # Similarity Network
//!
//! In-memory undirected graph: one node per distinct title, one weighted
//! edge per pair of books sharing at least one subject outside the
//! excluded tag.
//!
//! The network is assembled once by [`build`] and read-only afterwards.
//! There are no locks and no interior mutability: pass it by reference to
//! whoever needs it.
//!
//! ## Invariants
//!
//! - Node IDs are dense and follow first-insertion order of titles.
//! - No self-loops, at most one edge per unordered pair.
//! - `adjacency[n]` lists every edge touching `n`, in insertion order.

pub mod builder;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::*;
use crate::{Error, Result};

pub use builder::{
    build, node_size, BuildStrategy, NetworkConfig,
    DEFAULT_EXCLUDED_TAG, DEFAULT_MIN_SIZE, DEFAULT_SIZE_SCALE,
};

// ============================================================================
// Network
// ============================================================================

/// Book similarity network.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<BookNode>,
    relationships: Vec<Relationship>,
    /// node index → IDs of relationships touching it
    adjacency: Vec<SmallVec<[RelId; 8]>>,
    /// exact title → node ID
    title_index: HashMap<String, NodeId>,
    excluded_tag: String,
}

/// Summary counts, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
    pub isolated: usize,
    pub max_degree: usize,
    pub max_weight: usize,
}

impl Network {
    /// A network with no nodes.
    pub fn empty(excluded_tag: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            relationships: Vec::new(),
            adjacency: Vec::new(),
            title_index: HashMap::new(),
            excluded_tag: excluded_tag.into(),
        }
    }

    /// Build a network from a book sequence. See [`build`].
    pub fn build(books: impl IntoIterator<Item = Book>, config: &NetworkConfig) -> Self {
        build(books, config)
    }

    // ========================================================================
    // Assembly (builder only)
    // ========================================================================

    /// Insert a book, or overwrite the payload of an existing node with the
    /// same title. The node keeps its original ID.
    pub(crate) fn upsert_node(&mut self, book: Book, size: u64, color_band: ColorBand) -> NodeId {
        if let Some(&id) = self.title_index.get(book.title.as_str()) {
            tracing::debug!(title = %book.title, %id, "duplicate title, overwriting node payload");
            let node = &mut self.nodes[id.index()];
            node.book = book;
            node.size = size;
            node.color_band = color_band;
            return id;
        }

        let id = NodeId(self.nodes.len() as u64);
        self.title_index.insert(book.title.clone(), id);
        self.nodes.push(BookNode { id, book, size, color_band });
        self.adjacency.push(SmallVec::new());
        id
    }

    /// Connect two distinct nodes. Rejects self-loops and duplicate pairs.
    pub(crate) fn add_relationship(
        &mut self,
        src: NodeId,
        dst: NodeId,
        common_subjects: Vec<String>,
    ) -> Result<RelId> {
        if self.node(src).is_none() {
            return Err(Error::NotFound(format!("Source node {src}")));
        }
        if self.node(dst).is_none() {
            return Err(Error::NotFound(format!("Target node {dst}")));
        }
        if src == dst {
            return Err(Error::ConstraintViolation(format!("Self-loop on node {src}")));
        }
        if common_subjects.is_empty() {
            return Err(Error::ConstraintViolation(format!(
                "Edge {src}-{dst} has no shared subjects"
            )));
        }
        if self.edge_between(src, dst).is_some() {
            return Err(Error::ConstraintViolation(format!(
                "Edge {src}-{dst} already exists"
            )));
        }

        let id = RelId(self.relationships.len() as u64);
        self.relationships.push(Relationship::new(id, src, dst, common_subjects));
        self.adjacency[src.index()].push(id);
        self.adjacency[dst.index()].push(id);
        Ok(id)
    }

    // ========================================================================
    // Read API
    // ========================================================================

    pub fn excluded_tag(&self) -> &str {
        &self.excluded_tag
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &BookNode> {
        self.nodes.iter()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    pub fn node(&self, id: NodeId) -> Option<&BookNode> {
        self.nodes.get(id.index())
    }

    /// Exact, case-sensitive title lookup.
    pub fn node_by_title(&self, title: &str) -> Option<&BookNode> {
        self.title_index.get(title).and_then(|id| self.node(*id))
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.title_index.contains_key(title)
    }

    pub fn relationship(&self, id: RelId) -> Option<&Relationship> {
        self.relationships.get(id.0 as usize)
    }

    /// Edges touching `node`, in insertion order. Empty for unknown IDs.
    pub fn relationships(&self, node: NodeId) -> impl Iterator<Item = &Relationship> {
        self.adjacency
            .get(node.index())
            .into_iter()
            .flatten()
            .filter_map(move |rid| self.relationship(*rid))
    }

    /// Nodes sharing an edge with `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = &BookNode> {
        self.relationships(node)
            .filter_map(move |rel| rel.other_node(node))
            .filter_map(move |id| self.node(id))
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(node.index()).map_or(0, |adj| adj.len())
    }

    /// The edge joining `a` and `b`, in either direction.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Relationship> {
        // Scan the smaller adjacency list.
        let (from, to) = if self.degree(a) <= self.degree(b) { (a, b) } else { (b, a) };
        self.relationships(from).find(|rel| rel.connects(from, to))
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            isolated: self.adjacency.iter().filter(|adj| adj.is_empty()).count(),
            max_degree: self.adjacency.iter().map(|adj| adj.len()).max().unwrap_or(0),
            max_weight: self.relationships.iter().map(|r| r.weight).max().unwrap_or(0),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
