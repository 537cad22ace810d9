//! Labelled multi-layer feature-extraction encoder.
//!
//! A multi-layer encoder is an ordered sequence of named layers. Callers
//! request encodings by layer label; the encoder runs a single forward pass
//! up to the deepest requested layer and hands back the intermediate
//! activations at each requested label.

use std::sync::Arc;

use burn::nn::conv::Conv2d;
use burn::nn::pool::MaxPool2d;
use burn::nn::{BatchNorm, Relu};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::{EncoderError, Result};
use crate::preprocessing::Normalize;

/// One named stage of a multi-layer encoder.
#[derive(Debug)]
pub enum LayerModule<B: Backend> {
    /// Input normalization stage.
    Preprocess(Normalize),
    /// 2-D convolution.
    Conv(Conv2d<B>),
    /// Batch normalization over the two spatial dimensions.
    BatchNorm(BatchNorm<B, 2>),
    /// ReLU activation.
    Relu(Relu),
    /// 2-D max pooling.
    Pool(MaxPool2d),
}

impl<B: Backend> LayerModule<B> {
    /// Forward a `[batch, channels, height, width]` activation through this
    /// stage.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        match self {
            Self::Preprocess(norm) => norm.forward(input),
            Self::Conv(conv) => conv.forward(input),
            Self::BatchNorm(bn) => bn.forward(input),
            Self::Relu(relu) => relu.forward(input),
            Self::Pool(pool) => pool.forward(input),
        }
    }
}

/// Ordered, labelled sequence of encoder layers.
pub struct MultiLayerEncoder<B: Backend> {
    layers: Vec<(String, LayerModule<B>)>,
}

impl<B: Backend> MultiLayerEncoder<B> {
    /// Create an encoder from named layers. At least one layer is required.
    pub fn new(layers: Vec<(String, LayerModule<B>)>) -> Result<Self> {
        if layers.is_empty() {
            return Err(EncoderError::Empty);
        }
        Ok(Self { layers })
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the encoder has no layers. Construction forbids this, so the
    /// result is always `false`; provided for container-API symmetry.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Labels of all layers in forward order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(name, _)| name.as_str())
    }

    /// Whether a layer with the given label exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_ok()
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.layers
            .iter()
            .position(|(label, _)| label == name)
            .ok_or_else(|| EncoderError::UnknownLayer {
                name: name.to_owned(),
                available: self.layer_names().map(str::to_owned).collect(),
            })
    }

    /// Encode `input` at each of the requested layer labels.
    ///
    /// Runs a single forward pass up to the deepest requested layer. The
    /// returned encodings are ordered like `layers`.
    pub fn encode(&self, input: Tensor<B, 4>, layers: &[&str]) -> Result<Vec<Tensor<B, 4>>> {
        let positions = layers
            .iter()
            .map(|name| self.position(name))
            .collect::<Result<Vec<_>>>()?;
        let Some(deepest) = positions.iter().copied().max() else {
            return Ok(Vec::new());
        };

        let mut outputs = Vec::with_capacity(deepest + 1);
        let mut activation = input;
        for (_, module) in self.layers.iter().take(deepest + 1) {
            activation = module.forward(activation);
            outputs.push(activation.clone());
        }

        Ok(positions.into_iter().map(|pos| outputs[pos].clone()).collect())
    }

    /// Encode `input` at a single layer label.
    pub fn forward_to(&self, input: Tensor<B, 4>, layer: &str) -> Result<Tensor<B, 4>> {
        let position = self.position(layer)?;
        let mut activation = input;
        for (_, module) in self.layers.iter().take(position + 1) {
            activation = module.forward(activation);
        }
        Ok(activation)
    }

    /// Extract a single-layer view sharing this encoder.
    pub fn extract_encoder(self: Arc<Self>, layer: &str) -> Result<SingleLayerEncoder<B>> {
        SingleLayerEncoder::new(self, layer)
    }
}

/// Single-layer view onto a shared [`MultiLayerEncoder`].
pub struct SingleLayerEncoder<B: Backend> {
    encoder: Arc<MultiLayerEncoder<B>>,
    layer: String,
    position: usize,
}

impl<B: Backend> SingleLayerEncoder<B> {
    /// Create a view for the given layer label. The label is validated once
    /// here, so [`Self::forward`] is infallible.
    pub fn new(encoder: Arc<MultiLayerEncoder<B>>, layer: impl Into<String>) -> Result<Self> {
        let layer = layer.into();
        let position = encoder.position(&layer)?;
        Ok(Self {
            encoder,
            layer,
            position,
        })
    }

    /// Label of the layer this view encodes at.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Encode `input` at this view's layer.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut activation = input;
        for (_, module) in self.encoder.layers.iter().take(self.position + 1) {
            activation = module.forward(activation);
        }
        activation
    }
}
