//! # book-network: Subject-Similarity Network over a Book Catalog
//!
//! Builds an in-memory graph where every book is a node and every pair of
//! books sharing a subject tag is a weighted edge, then answers title
//! searches and ranked recommendations over it.
//!
//! ## Design Principles
//!
//! 1. **Build once, read after**: `Network` is assembled by `build()` and
//!    passed by reference; there is no global graph and no locking
//! 2. **Clean DTOs**: `Book`, `BookNode`, `Relationship` cross all boundaries
//! 3. **Unknown is not zero**: missing ratings and counts are `None` end to end
//! 4. **Collaborators behind traits**: `MetadataProvider` and `CatalogStore`
//!
//! ## Quick Start
//!
//! ```rust
//! use book_network::{Book, NetworkConfig, RecommendOptions};
//!
//! # fn example() -> book_network::Result<()> {
//! let books = vec![
//!     Book::new("A").with_subjects(["x", "y", "z"]),
//!     Book::new("B").with_subjects(["x", "y"]).with_readinglog_count(40),
//! ];
//! let network = book_network::build(books, &NetworkConfig::default());
//!
//! let hit = book_network::search(&network, "a").map(|n| n.title().to_string());
//! let recs = book_network::recommend(&network, "A", &RecommendOptions::default())?;
//! assert_eq!(recs[0].title, "B");
//! # let _ = hit;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Collaborators
//!
//! | Concern | Module | Description |
//! |---------|--------|-------------|
//! | Metadata | `provider` | Raw records by title (static, or Open Library with `openlibrary`) |
//! | Persistence | `catalog` | JSON titles input and title-keyed catalog |
//! | Rendering | `export` | Graphviz DOT with size and color attributes |
//! | UI | `session` | Search / recommend / exit command loop |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod normalize;
pub mod network;
pub mod recommend;
pub mod search;
pub mod catalog;
pub mod provider;
pub mod export;
pub mod session;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Book, BookNode, ColorBand, NodeId, RelId, Relationship, UNTITLED};

// ============================================================================
// Re-exports: Network
// ============================================================================

pub use network::{build, BuildStrategy, Network, NetworkConfig, NetworkStats};

// ============================================================================
// Re-exports: Operations
// ============================================================================

pub use normalize::normalize;
pub use recommend::{recommend, Recommendation, RecommendOptions, SharedSubjectCount};
pub use search::search;

// ============================================================================
// Re-exports: Collaborators
// ============================================================================

pub use catalog::{CatalogStore, JsonCatalogStore};
pub use provider::{collect_catalog, MetadataProvider, StaticProvider};
pub use session::Session;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Metadata provider error: {0}")]
    Provider(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
