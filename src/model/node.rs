//! Book node in the similarity network.

use serde::{Deserialize, Serialize};
use super::Book;

/// Opaque node identifier. Dense: the n-th distinct title gets `NodeId(n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating band used to color a node.
///
/// Bands are closed below and open above, except `Top` which is unbounded:
/// `< 2` low, `[2, 3)` medium, `[3, 4)` high, `>= 4` top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Unknown,
    Low,
    Medium,
    High,
    Top,
}

impl ColorBand {
    pub fn from_rating(rating: Option<f64>) -> Self {
        match rating {
            None => ColorBand::Unknown,
            Some(r) if r.is_nan() => ColorBand::Unknown,
            Some(r) if r >= 4.0 => ColorBand::Top,
            Some(r) if r >= 3.0 => ColorBand::High,
            Some(r) if r >= 2.0 => ColorBand::Medium,
            Some(_) => ColorBand::Low,
        }
    }

    /// Color used by the reference rendering.
    pub fn color_name(self) -> &'static str {
        match self {
            ColorBand::Unknown => "gray",
            ColorBand::Low => "red",
            ColorBand::Medium => "orange",
            ColorBand::High => "yellow",
            ColorBand::Top => "green",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorBand::Unknown => "unknown",
            ColorBand::Low => "low",
            ColorBand::Medium => "medium",
            ColorBand::High => "high",
            ColorBand::Top => "top",
        }
    }
}

impl std::fmt::Display for ColorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the network: the book plus its derived display attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookNode {
    pub id: NodeId,
    pub book: Book,
    /// Proportional to the reading-log count; a fixed minimum when unknown.
    pub size: u64,
    pub color_band: ColorBand,
}

impl BookNode {
    pub fn title(&self) -> &str {
        &self.book.title
    }

    pub fn readinglog_count(&self) -> Option<u64> {
        self.book.readinglog_count
    }

    pub fn ratings_average(&self) -> Option<f64> {
        self.book.ratings_average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_band_reference_points() {
        assert_eq!(ColorBand::from_rating(Some(4.5)), ColorBand::Top);
        assert_eq!(ColorBand::from_rating(Some(3.2)), ColorBand::High);
        assert_eq!(ColorBand::from_rating(Some(2.0)), ColorBand::Medium);
        assert_eq!(ColorBand::from_rating(Some(1.0)), ColorBand::Low);
        assert_eq!(ColorBand::from_rating(None), ColorBand::Unknown);
    }

    #[test]
    fn test_color_band_boundaries() {
        assert_eq!(ColorBand::from_rating(Some(0.0)), ColorBand::Low);
        assert_eq!(ColorBand::from_rating(Some(1.999)), ColorBand::Low);
        assert_eq!(ColorBand::from_rating(Some(2.999)), ColorBand::Medium);
        assert_eq!(ColorBand::from_rating(Some(3.0)), ColorBand::High);
        assert_eq!(ColorBand::from_rating(Some(3.999)), ColorBand::High);
        assert_eq!(ColorBand::from_rating(Some(4.0)), ColorBand::Top);
        assert_eq!(ColorBand::from_rating(Some(5.0)), ColorBand::Top);
        assert_eq!(ColorBand::from_rating(Some(f64::NAN)), ColorBand::Unknown);
    }

    #[test]
    fn test_color_names() {
        assert_eq!(ColorBand::Unknown.color_name(), "gray");
        assert_eq!(ColorBand::Low.color_name(), "red");
        assert_eq!(ColorBand::Medium.color_name(), "orange");
        assert_eq!(ColorBand::High.color_name(), "yellow");
        assert_eq!(ColorBand::Top.color_name(), "green");
    }
}
