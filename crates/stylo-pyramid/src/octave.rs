//! Octave pyramid construction.
//!
//! An octave pyramid doubles its edge size from level to level, starting at
//! or above a minimum edge size and ending exactly at the maximum. It is a
//! convenience constructor for [`ImagePyramid`]; the result behaves like any
//! other pyramid.

use burn::tensor::backend::Backend;
use stylo_core::{Edge, ResizeMode};

use crate::error::{PyramidError, Result};
use crate::param::LevelParam;
use crate::pyramid::{ImagePyramid, SharedTarget};

/// Builder for pyramids whose edge sizes double geometrically up to
/// `max_edge_size`.
///
/// When the level count is not given explicitly, it is derived as the
/// largest `L` with `max_edge_size / 2^(L-1) >= min_edge_size`, with a floor
/// of one level.
pub struct OctaveImagePyramid<B: Backend> {
    max_edge_size: usize,
    num_steps: LevelParam<usize>,
    num_levels: Option<usize>,
    min_edge_size: usize,
    edge: Edge,
    resize_targets: Vec<SharedTarget<B>>,
    mode: ResizeMode,
}

impl<B: Backend> OctaveImagePyramid<B> {
    /// Default minimum edge size of the coarsest level.
    pub const DEFAULT_MIN_EDGE_SIZE: usize = 64;

    /// Start building an octave pyramid topping out at `max_edge_size`.
    pub fn builder(max_edge_size: usize, num_steps: impl Into<LevelParam<usize>>) -> Self {
        Self {
            max_edge_size,
            num_steps: num_steps.into(),
            num_levels: None,
            min_edge_size: Self::DEFAULT_MIN_EDGE_SIZE,
            edge: Edge::default(),
            resize_targets: Vec::new(),
            mode: ResizeMode::default(),
        }
    }

    /// Fix the level count instead of deriving it from the edge sizes.
    pub fn with_num_levels(mut self, num_levels: usize) -> Self {
        self.num_levels = Some(num_levels);
        self
    }

    /// Set the minimum edge size of the coarsest level. Defaults to
    /// [`Self::DEFAULT_MIN_EDGE_SIZE`]. Only used when the level count is
    /// derived.
    pub fn with_min_edge_size(mut self, min_edge_size: usize) -> Self {
        self.min_edge_size = min_edge_size;
        self
    }

    /// Set the constrained edge kind for all levels.
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    /// Set the interpolation mode used when resizing targets.
    pub fn with_interpolation(mut self, mode: ResizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bind a resize target.
    pub fn with_resize_target(mut self, target: SharedTarget<B>) -> Self {
        self.resize_targets.push(target);
        self
    }

    /// Bind several resize targets.
    pub fn with_resize_targets(
        mut self,
        targets: impl IntoIterator<Item = SharedTarget<B>>,
    ) -> Self {
        self.resize_targets.extend(targets);
        self
    }

    fn derive_num_levels(&self) -> Result<usize> {
        match self.num_levels {
            Some(0) => Err(PyramidError::invalid_configuration(
                "num_levels must be at least 1",
            )),
            Some(num_levels) => Ok(num_levels),
            None => {
                if self.min_edge_size == 0 {
                    return Err(PyramidError::invalid_configuration(
                        "min_edge_size must be at least 1",
                    ));
                }
                if self.min_edge_size > self.max_edge_size {
                    return Err(PyramidError::invalid_configuration(format!(
                        "min_edge_size ({}) exceeds max_edge_size ({}); no valid level count",
                        self.min_edge_size, self.max_edge_size
                    )));
                }
                // floor(log2(max / min)) + 1, at least 1
                Ok((self.max_edge_size / self.min_edge_size).ilog2() as usize + 1)
            }
        }
    }

    /// Derive the edge sizes and build the pyramid.
    pub fn build(self) -> Result<ImagePyramid<B>> {
        if self.max_edge_size == 0 {
            return Err(PyramidError::invalid_configuration(
                "max_edge_size must be at least 1",
            ));
        }
        let num_levels = self.derive_num_levels()?;

        // Smallest first, doubling towards max_edge_size; each level is
        // clamped to at least one pixel.
        let edge_sizes: Vec<usize> = (0..num_levels)
            .map(|i| {
                let halvings = (num_levels - 1 - i) as u32;
                self.max_edge_size
                    .checked_shr(halvings)
                    .unwrap_or(0)
                    .max(1)
            })
            .collect();

        tracing::debug!(
            max_edge_size = self.max_edge_size,
            num_levels,
            ?edge_sizes,
            "derived octave pyramid schedule"
        );

        ImagePyramid::builder(edge_sizes, self.num_steps)
            .with_edge(self.edge)
            .with_interpolation(self.mode)
            .with_resize_targets(self.resize_targets)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn edge_sizes(pyramid: &ImagePyramid<TestBackend>) -> Vec<usize> {
        pyramid.levels().iter().map(|l| l.edge_size()).collect()
    }

    #[test]
    fn test_derived_level_count() {
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(16, 1)
            .with_min_edge_size(2)
            .build()
            .unwrap();

        assert_eq!(edge_sizes(&pyramid), vec![2, 4, 8, 16]);
    }

    #[test]
    fn test_explicit_level_count() {
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(16, 1)
            .with_num_levels(3)
            .with_min_edge_size(2)
            .build()
            .unwrap();

        assert_eq!(edge_sizes(&pyramid), vec![4, 8, 16]);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let err = OctaveImagePyramid::<TestBackend>::builder(16, 1)
            .with_min_edge_size(32)
            .build()
            .unwrap_err();
        assert!(matches!(err, PyramidError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_single_level_floor() {
        // max == min: exactly one level at max_edge_size.
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(64, 1)
            .build()
            .unwrap();

        assert_eq!(edge_sizes(&pyramid), vec![64]);
    }

    #[test]
    fn test_non_power_of_two_max() {
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(100, 1)
            .with_min_edge_size(20)
            .build()
            .unwrap();

        // floor(log2(100 / 20)) + 1 = 3 levels: 100/4, 100/2, 100.
        assert_eq!(edge_sizes(&pyramid), vec![25, 50, 100]);
    }

    #[test]
    fn test_edge_sizes_clamped_to_one() {
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(4, 1)
            .with_num_levels(6)
            .build()
            .unwrap();

        assert_eq!(edge_sizes(&pyramid), vec![1, 1, 1, 1, 2, 4]);
    }

    #[test]
    fn test_num_steps_broadcast_to_derived_levels() {
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(16, 5)
            .with_min_edge_size(2)
            .build()
            .unwrap();

        assert!(pyramid.levels().iter().all(|l| l.num_steps() == 5));
    }

    #[test]
    fn test_per_level_num_steps_must_match() {
        // Derivation yields 4 levels; 3 step counts is a mismatch.
        let err = OctaveImagePyramid::<TestBackend>::builder(16, vec![1, 2, 3])
            .with_min_edge_size(2)
            .build()
            .unwrap_err();
        assert!(matches!(err, PyramidError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_long_edge_propagates() {
        let pyramid = OctaveImagePyramid::<TestBackend>::builder(16, 1)
            .with_min_edge_size(8)
            .with_edge(Edge::Long)
            .build()
            .unwrap();

        assert!(pyramid.levels().iter().all(|l| l.edge() == Edge::Long));
    }
}
