//! Edge kinds and edge-constrained size arithmetic.
//!
//! An edge-size constraint pins either the shorter or the longer spatial
//! dimension of an image; the other dimension follows from the aspect ratio.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Which spatial edge of an image a size constraint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    /// The shorter of the two spatial dimensions.
    #[default]
    Short,
    /// The longer of the two spatial dimensions.
    Long,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "short"),
            Self::Long => write!(f, "long"),
        }
    }
}

impl FromStr for Edge {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            other => Err(CoreError::UnknownEdge(other.to_owned())),
        }
    }
}

/// Compute the `[height, width]` of an image whose given edge equals
/// `edge_size` while the aspect ratio (`width / height`) is preserved.
///
/// The unconstrained dimension is rounded to the nearest pixel and is
/// always at least 1.
pub fn edge_to_image_size(edge_size: usize, aspect_ratio: f64, edge: Edge) -> [usize; 2] {
    let constrained_is_width = match edge {
        Edge::Short => aspect_ratio < 1.0,
        Edge::Long => aspect_ratio > 1.0,
    };

    let derive = |size: f64| (size.round() as usize).max(1);
    if constrained_is_width {
        [derive(edge_size as f64 / aspect_ratio), edge_size]
    } else {
        [edge_size, derive(edge_size as f64 * aspect_ratio)]
    }
}
