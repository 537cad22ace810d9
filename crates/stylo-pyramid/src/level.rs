//! A single resolution tier of an image pyramid.

use std::ops::RangeInclusive;

use stylo_core::Edge;

use crate::error::{PyramidError, Result};

/// One resolution tier: an edge size, a step count, and the edge kind the
/// size constrains.
///
/// A level is an immutable value object. Its step sequence is recomputed on
/// every call, so iterating a level twice yields the same indices both
/// times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PyramidLevel {
    edge_size: usize,
    num_steps: usize,
    edge: Edge,
}

impl PyramidLevel {
    /// Create a level. Both `edge_size` and `num_steps` must be at least 1.
    pub fn new(edge_size: usize, num_steps: usize, edge: Edge) -> Result<Self> {
        if edge_size == 0 {
            return Err(PyramidError::invalid_configuration(
                "edge_size must be at least 1",
            ));
        }
        if num_steps == 0 {
            return Err(PyramidError::invalid_configuration(
                "num_steps must be at least 1",
            ));
        }
        Ok(Self {
            edge_size,
            num_steps,
            edge,
        })
    }

    /// Target length of the constrained edge at this level.
    pub fn edge_size(&self) -> usize {
        self.edge_size
    }

    /// Number of optimization steps to run at this level.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Which spatial edge the size constrains.
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// One-based step indices `1..=num_steps` for this level.
    pub fn steps(&self) -> RangeInclusive<usize> {
        1..=self.num_steps
    }
}

impl IntoIterator for &PyramidLevel {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps()
    }
}
