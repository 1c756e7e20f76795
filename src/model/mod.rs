//! # Book Network Model
//!
//! Clean DTOs for the similarity network.
//! These types cross every boundary: provider ↔ catalog ↔ network ↔ session.
//!
//! Design rule: no I/O, no state, no graph logic here.
//! This module is pure data.

pub mod book;
pub mod node;
pub mod relationship;

pub use book::{Book, UNTITLED};
pub use node::{BookNode, ColorBand, NodeId};
pub use relationship::{RelId, Relationship};
