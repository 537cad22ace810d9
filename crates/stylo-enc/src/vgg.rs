//! VGG-based multi-layer encoders.
//!
//! Builds the feature-extraction half of a VGG network as a labelled
//! multi-layer encoder. Labels follow the block/depth scheme
//! `conv{block}_{depth}`, `bn{block}_{depth}`, `relu{block}_{depth}` and
//! `pool{block}`: each ReLU increases the depth within the current block and
//! each pooling layer closes the block. When internal preprocessing is
//! enabled, an input-normalization stage labelled `preprocessing` comes
//! first.

use burn::nn::conv::Conv2dConfig;
use burn::nn::pool::MaxPool2dConfig;
use burn::nn::{BatchNormConfig, PaddingConfig2d, Relu};
use burn::tensor::backend::Backend;

use crate::error::Result;
use crate::multi_layer::{LayerModule, MultiLayerEncoder};
use crate::preprocessing::Normalize;

/// Output channels of the five VGG convolution blocks.
const BLOCK_CHANNELS: [usize; 5] = [64, 128, 256, 512, 512];

/// VGG architecture variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VggArch {
    Vgg11,
    Vgg13,
    Vgg16,
    Vgg19,
}

impl VggArch {
    /// Number of convolutions in each of the five blocks.
    fn block_depths(self) -> [usize; 5] {
        match self {
            Self::Vgg11 => [1, 1, 2, 2, 2],
            Self::Vgg13 => [2, 2, 2, 2, 2],
            Self::Vgg16 => [2, 2, 3, 3, 3],
            Self::Vgg19 => [2, 2, 4, 4, 4],
        }
    }

    /// Canonical architecture name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vgg11 => "vgg11",
            Self::Vgg13 => "vgg13",
            Self::Vgg16 => "vgg16",
            Self::Vgg19 => "vgg19",
        }
    }
}

/// Builder for VGG multi-layer encoders.
#[derive(Debug, Clone, Copy)]
pub struct VggEncoderBuilder {
    arch: VggArch,
    batch_norm: bool,
    internal_preprocessing: bool,
}

impl VggEncoderBuilder {
    /// Create a builder for the given architecture.
    pub fn new(arch: VggArch) -> Self {
        Self {
            arch,
            batch_norm: false,
            internal_preprocessing: true,
        }
    }

    /// Insert batch normalization after every convolution.
    pub fn with_batch_norm(mut self, enabled: bool) -> Self {
        self.batch_norm = enabled;
        self
    }

    /// Control whether a `preprocessing` normalization stage is inserted as
    /// the first layer. Defaults to `true`.
    pub fn with_internal_preprocessing(mut self, enabled: bool) -> Self {
        self.internal_preprocessing = enabled;
        self
    }

    /// Build the labelled encoder on the given device.
    pub fn build<B: Backend>(self, device: &B::Device) -> Result<MultiLayerEncoder<B>> {
        let mut layers: Vec<(String, LayerModule<B>)> = Vec::new();

        if self.internal_preprocessing {
            layers.push((
                "preprocessing".to_owned(),
                LayerModule::Preprocess(Normalize::imagenet()),
            ));
        }

        let mut in_channels = 3;
        let depths = self.arch.block_depths();
        for (block_idx, (&depth_count, &out_channels)) in
            depths.iter().zip(BLOCK_CHANNELS.iter()).enumerate()
        {
            let block = block_idx + 1;
            for depth in 1..=depth_count {
                let conv = Conv2dConfig::new([in_channels, out_channels], [3, 3])
                    .with_padding(PaddingConfig2d::Explicit(1, 1))
                    .init(device);
                layers.push((format!("conv{block}_{depth}"), LayerModule::Conv(conv)));

                if self.batch_norm {
                    let bn = BatchNormConfig::new(out_channels).init(device);
                    layers.push((format!("bn{block}_{depth}"), LayerModule::BatchNorm(bn)));
                }

                layers.push((format!("relu{block}_{depth}"), LayerModule::Relu(Relu::new())));
                in_channels = out_channels;
            }

            let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
            layers.push((format!("pool{block}"), LayerModule::Pool(pool)));
        }

        tracing::debug!(
            arch = self.arch.name(),
            batch_norm = self.batch_norm,
            num_layers = layers.len(),
            "built VGG multi-layer encoder"
        );

        MultiLayerEncoder::new(layers)
    }
}

/// Multi-layer encoder based on the VGG11 architecture.
pub fn vgg11_multi_layer_encoder<B: Backend>(device: &B::Device) -> Result<MultiLayerEncoder<B>> {
    VggEncoderBuilder::new(VggArch::Vgg11).build(device)
}

/// Multi-layer encoder based on the VGG13 architecture.
pub fn vgg13_multi_layer_encoder<B: Backend>(device: &B::Device) -> Result<MultiLayerEncoder<B>> {
    VggEncoderBuilder::new(VggArch::Vgg13).build(device)
}

/// Multi-layer encoder based on the VGG16 architecture.
pub fn vgg16_multi_layer_encoder<B: Backend>(device: &B::Device) -> Result<MultiLayerEncoder<B>> {
    VggEncoderBuilder::new(VggArch::Vgg16).build(device)
}

/// Multi-layer encoder based on the VGG19 architecture.
pub fn vgg19_multi_layer_encoder<B: Backend>(device: &B::Device) -> Result<MultiLayerEncoder<B>> {
    VggEncoderBuilder::new(VggArch::Vgg19).build(device)
}
