pub mod error;
pub mod multi_layer;
pub mod preprocessing;
pub mod vgg;

pub use error::{EncoderError, Result};
pub use multi_layer::{LayerModule, MultiLayerEncoder, SingleLayerEncoder};
pub use preprocessing::Normalize;
pub use vgg::{VggArch, VggEncoderBuilder};
