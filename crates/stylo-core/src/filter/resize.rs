//! Edge-constrained resize filter.
//!
//! Resizes an image so that its shorter or longer spatial edge matches a
//! fixed size while the aspect ratio is preserved. The input image is never
//! mutated; the filter returns a new image.

use burn::tensor::backend::Backend;
use burn::tensor::module::interpolate;
use burn::tensor::ops::{InterpolateMode, InterpolateOptions};

use crate::error::{CoreError, Result};
use crate::image::{edge_to_image_size, Edge, Image};

/// Interpolation mode used when resampling pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
}

impl ResizeMode {
    fn options(self) -> InterpolateOptions {
        let mode = match self {
            Self::Nearest => InterpolateMode::Nearest,
            Self::Bilinear => InterpolateMode::Bilinear,
            Self::Bicubic => InterpolateMode::Bicubic,
        };
        InterpolateOptions::new(mode)
    }
}

/// Resize filter pinning one spatial edge to a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct ResizeFilter {
    edge_size: usize,
    edge: Edge,
    mode: ResizeMode,
}

impl ResizeFilter {
    /// Create a new resize filter.
    ///
    /// # Arguments
    /// * `edge_size` - Target length of the constrained edge (at least 1)
    /// * `edge` - Which spatial edge the size constrains
    pub fn new(edge_size: usize, edge: Edge) -> Result<Self> {
        if edge_size == 0 {
            return Err(CoreError::InvalidEdgeSize(edge_size));
        }
        Ok(Self {
            edge_size,
            edge,
            mode: ResizeMode::default(),
        })
    }

    /// Set the interpolation mode.
    pub fn with_mode(mut self, mode: ResizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the target edge size.
    pub fn edge_size(&self) -> usize {
        self.edge_size
    }

    /// Get the constrained edge kind.
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Apply the filter, returning a resized copy of the input image.
    pub fn apply<B: Backend>(&self, input: &Image<B>) -> Image<B> {
        let [height, width] =
            edge_to_image_size(self.edge_size, input.aspect_ratio(), self.edge);
        if height == input.height() && width == input.width() {
            return input.clone();
        }
        let data = interpolate(input.data().clone(), [height, width], self.mode.options());
        Image::new(data)
    }
}
