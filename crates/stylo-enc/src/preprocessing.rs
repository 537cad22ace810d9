//! Input normalization stage.
//!
//! Pretrained convolutional backbones expect their input normalized with the
//! per-channel statistics of the training corpus. The normalization is
//! inserted as the first, labelled stage of a multi-layer encoder so callers
//! can feed raw `[0, 1]` images.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Channel-wise input normalization: `(x - mean) / std`.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    mean: [f32; 3],
    std: [f32; 3],
}

impl Normalize {
    /// Create a normalization stage with explicit per-channel statistics.
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { mean, std }
    }

    /// Normalization with the ImageNet statistics used by torchvision
    /// pretrained weights.
    pub fn imagenet() -> Self {
        Self::new([0.485, 0.456, 0.406], [0.229, 0.224, 0.225])
    }

    /// Get the per-channel means.
    pub fn mean(&self) -> [f32; 3] {
        self.mean
    }

    /// Get the per-channel standard deviations.
    pub fn std(&self) -> [f32; 3] {
        self.std
    }

    /// Normalize a `[batch, 3, height, width]` input.
    pub fn forward<B: Backend>(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let device = input.device();
        let mean: Tensor<B, 4> =
            Tensor::<B, 1>::from_floats(self.mean, &device).reshape([1, 3, 1, 1]);
        let std: Tensor<B, 4> =
            Tensor::<B, 1>::from_floats(self.std, &device).reshape([1, 3, 1, 1]);
        (input - mean) / std
    }
}
