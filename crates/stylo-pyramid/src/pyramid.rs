//! Image pyramid: ordered resolution levels plus a resize/restore protocol
//! for bound target images.
//!
//! Iterating a pyramid resizes every bound target to the current level's
//! edge size before the level is handed to the consumer. The targets'
//! original images are captured once when the first level is pulled and are
//! restored exactly once when the pass ends, on every exit path: normal
//! exhaustion, an early `break`, or a panic unwinding through the consumer's
//! loop body.

use std::cell::RefCell;
use std::fmt;
use std::ops::Index;
use std::rc::Rc;

use burn::tensor::backend::Backend;
use stylo_core::{Edge, Image, ResizeFilter, ResizeMode};

use crate::error::{PyramidError, Result};
use crate::level::PyramidLevel;
use crate::param::LevelParam;

/// Capability contract for anything holding a mutable target image that
/// should follow the pyramid's resolution schedule, e.g. an optimization
/// objective holding a reference image.
pub trait ResizableTarget<B: Backend> {
    /// Current target image.
    fn target_image(&self) -> Image<B>;

    /// Replace the target image.
    fn set_target_image(&mut self, image: Image<B>);
}

/// Shared handle to a resize target.
///
/// Pyramid iteration is single-threaded and cooperative; the consumer pulls
/// one level at a time. Plain reference counting with interior mutability is
/// therefore sufficient, no locking is involved.
pub type SharedTarget<B> = Rc<RefCell<dyn ResizableTarget<B>>>;

/// Ordered, indexable, iterable collection of pyramid levels, optionally
/// bound to a set of resize targets.
///
/// The level list is immutable after construction and the pyramid can be
/// iterated any number of times; each pass captures the targets' images
/// afresh at its start.
pub struct ImagePyramid<B: Backend> {
    levels: Vec<PyramidLevel>,
    filters: Vec<ResizeFilter>,
    resize_targets: Vec<SharedTarget<B>>,
}

impl<B: Backend> ImagePyramid<B> {
    /// Pyramid from edge sizes and step counts, with the short edge
    /// constrained and no resize targets bound.
    ///
    /// Either argument may be a scalar (broadcast to every level) or a
    /// per-level sequence; see [`ImagePyramidBuilder::build`] for the
    /// broadcasting rules.
    pub fn new(
        edge_sizes: impl Into<LevelParam<usize>>,
        num_steps: impl Into<LevelParam<usize>>,
    ) -> Result<Self> {
        Self::builder(edge_sizes, num_steps).build()
    }

    /// Start building a pyramid with edge kinds, interpolation mode, and
    /// resize targets.
    pub fn builder(
        edge_sizes: impl Into<LevelParam<usize>>,
        num_steps: impl Into<LevelParam<usize>>,
    ) -> ImagePyramidBuilder<B> {
        ImagePyramidBuilder::new(edge_sizes, num_steps)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the pyramid has no levels. Construction forbids this, so the
    /// result is always `false`; provided for container-API symmetry.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All levels in ascending resolution order.
    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    /// Level at the given index.
    ///
    /// Pure accessor: does not touch the resize/restore state and works
    /// whether or not an iteration pass is active.
    pub fn level(&self, index: usize) -> Result<&PyramidLevel> {
        self.levels.get(index).ok_or(PyramidError::LevelOutOfRange {
            index,
            len: self.levels.len(),
        })
    }

    /// Iterate the levels, driving the resize/restore protocol for all
    /// bound targets.
    pub fn iter(&self) -> PyramidIter<'_, B> {
        PyramidIter {
            pyramid: self,
            next_level: 0,
            guard: None,
        }
    }
}

impl<B: Backend> Index<usize> for ImagePyramid<B> {
    type Output = PyramidLevel;

    fn index(&self, index: usize) -> &Self::Output {
        &self.levels[index]
    }
}

impl<'a, B: Backend> IntoIterator for &'a ImagePyramid<B> {
    type Item = &'a PyramidLevel;
    type IntoIter = PyramidIter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<B: Backend> fmt::Debug for ImagePyramid<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePyramid")
            .field("levels", &self.levels)
            .field("num_resize_targets", &self.resize_targets.len())
            .finish()
    }
}

/// Builder for [`ImagePyramid`].
pub struct ImagePyramidBuilder<B: Backend> {
    edge_sizes: LevelParam<usize>,
    num_steps: LevelParam<usize>,
    edge: LevelParam<Edge>,
    resize_targets: Vec<SharedTarget<B>>,
    mode: ResizeMode,
}

impl<B: Backend> ImagePyramidBuilder<B> {
    /// Create a builder from edge sizes and step counts.
    pub fn new(
        edge_sizes: impl Into<LevelParam<usize>>,
        num_steps: impl Into<LevelParam<usize>>,
    ) -> Self {
        Self {
            edge_sizes: edge_sizes.into(),
            num_steps: num_steps.into(),
            edge: LevelParam::Scalar(Edge::default()),
            resize_targets: Vec::new(),
            mode: ResizeMode::default(),
        }
    }

    /// Set the constrained edge kind, scalar or per level. Defaults to
    /// [`Edge::Short`] everywhere.
    pub fn with_edge(mut self, edge: impl Into<LevelParam<Edge>>) -> Self {
        self.edge = edge.into();
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

    /// Validate, broadcast, and build the pyramid.
    ///
    /// The level count follows `edge_sizes` when it is a sequence, otherwise
    /// `num_steps` when that is a sequence; two scalars produce a single
    /// level. A sequence whose length disagrees with the level count is a
    /// configuration error.
    pub fn build(self) -> Result<ImagePyramid<B>> {
        let num_levels = self
            .edge_sizes
            .sequence_len()
            .or(self.num_steps.sequence_len())
            .unwrap_or(1);
        if num_levels == 0 {
            return Err(PyramidError::invalid_configuration(
                "a pyramid needs at least one level",
            ));
        }

        let edge_sizes = self.edge_sizes.resolve(num_levels, "edge_sizes")?;
        let num_steps = self.num_steps.resolve(num_levels, "num_steps")?;
        let edges = self.edge.resolve(num_levels, "edge")?;

        let levels = edge_sizes
            .into_iter()
            .zip(num_steps)
            .zip(edges)
            .map(|((edge_size, num_steps), edge)| PyramidLevel::new(edge_size, num_steps, edge))
            .collect::<Result<Vec<_>>>()?;

        // Pre-building the per-level filters keeps iteration infallible.
        let filters = levels
            .iter()
            .map(|level| {
                ResizeFilter::new(level.edge_size(), level.edge())
                    .map(|filter| filter.with_mode(self.mode))
                    .map_err(|err| PyramidError::invalid_configuration(err.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ImagePyramid {
            levels,
            filters,
            resize_targets: self.resize_targets,
        })
    }
}

/// Iterator over pyramid levels that drives the resize/restore protocol.
///
/// Dropping the iterator restores every bound target to the image it held
/// when the pass started, which also covers early breaks and panics in the
/// consumer's loop body.
pub struct PyramidIter<'a, B: Backend> {
    pyramid: &'a ImagePyramid<B>,
    next_level: usize,
    guard: Option<RestoreGuard<B>>,
}

impl<'a, B: Backend> Iterator for PyramidIter<'a, B> {
    type Item = &'a PyramidLevel;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_level;
        let Some(level) = self.pyramid.levels.get(index) else {
            // Pass complete: restore now rather than waiting for drop.
            self.guard = None;
            return None;
        };
        self.next_level += 1;

        if index == 0 {
            self.guard = Some(RestoreGuard::capture(&self.pyramid.resize_targets));
        }

        tracing::debug!(
            level = index,
            edge_size = level.edge_size(),
            num_steps = level.num_steps(),
            "entering pyramid level"
        );

        // Resize relative to whatever image each target currently holds, so
        // refinements made at the previous level carry forward.
        let filter = &self.pyramid.filters[index];
        for target in &self.pyramid.resize_targets {
            let mut target = target.borrow_mut();
            let resized = filter.apply(&target.target_image());
            target.set_target_image(resized);
        }

        Some(level)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pyramid.levels.len() - self.next_level;
        (remaining, Some(remaining))
    }
}

impl<B: Backend> ExactSizeIterator for PyramidIter<'_, B> {}

/// Originals captured at the start of an iteration pass; restores them when
/// dropped.
struct RestoreGuard<B: Backend> {
    saved: Vec<(SharedTarget<B>, Image<B>)>,
}

impl<B: Backend> RestoreGuard<B> {
    fn capture(targets: &[SharedTarget<B>]) -> Self {
        let saved = targets
            .iter()
            .map(|target| (Rc::clone(target), target.borrow().target_image()))
            .collect();
        Self { saved }
    }
}

impl<B: Backend> Drop for RestoreGuard<B> {
    fn drop(&mut self) {
        for (target, image) in self.saved.drain(..) {
            target.borrow_mut().set_target_image(image);
        }
    }
}
