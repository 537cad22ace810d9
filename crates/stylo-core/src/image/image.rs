//! Image container for batched raster data.
//!
//! Images are stored as `[batch, channels, height, width]` tensors,
//! potentially on GPU. Consumers that only schedule work on images (such as
//! the pyramid engine) treat the pixel content as opaque.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::edge::Edge;

/// Batched raster image backed by a 4-D tensor.
///
/// # Type Parameters
/// * `B` - The backend (CPU or GPU) for tensor operations
#[derive(Debug, Clone)]
pub struct Image<B: Backend> {
    /// The pixel data as `[batch, channels, height, width]`.
    data: Tensor<B, 4>,
}

impl<B: Backend> Image<B> {
    /// Create a new image from a `[batch, channels, height, width]` tensor.
    pub fn new(data: Tensor<B, 4>) -> Self {
        Self { data }
    }

    /// Get the image data tensor.
    pub fn data(&self) -> &Tensor<B, 4> {
        &self.data
    }

    /// Consume the image and return the underlying tensor.
    pub fn into_inner(self) -> Tensor<B, 4> {
        self.data
    }

    /// Get the image shape as `[batch, channels, height, width]`.
    pub fn dims(&self) -> [usize; 4] {
        self.data.dims()
    }

    /// Get the batch size.
    pub fn batch_size(&self) -> usize {
        self.dims()[0]
    }

    /// Get the number of channels.
    pub fn channels(&self) -> usize {
        self.dims()[1]
    }

    /// Get the spatial height.
    pub fn height(&self) -> usize {
        self.dims()[2]
    }

    /// Get the spatial width.
    pub fn width(&self) -> usize {
        self.dims()[3]
    }

    /// Get the device the image data lives on.
    pub fn device(&self) -> B::Device {
        self.data.device()
    }

    /// Length of the given spatial edge.
    pub fn edge_size(&self, edge: Edge) -> usize {
        let [_, _, height, width] = self.dims();
        match edge {
            Edge::Short => height.min(width),
            Edge::Long => height.max(width),
        }
    }

    /// Aspect ratio `width / height` of the spatial dimensions.
    pub fn aspect_ratio(&self) -> f64 {
        let [_, _, height, width] = self.dims();
        width as f64 / height as f64
    }
}
