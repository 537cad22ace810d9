use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use stylo_enc::vgg::{vgg11_multi_layer_encoder, VggArch, VggEncoderBuilder};
use stylo_enc::EncoderError;

type Backend = NdArray<f32>;

#[test]
fn test_vgg11_encode_shapes() {
    let device = Default::default();
    let encoder = vgg11_multi_layer_encoder::<Backend>(&device).unwrap();

    let input = Tensor::<Backend, 4>::zeros([1, 3, 32, 32], &device);
    let encodings = encoder
        .encode(input, &["relu1_1", "pool1", "relu2_1"])
        .unwrap();

    assert_eq!(encodings.len(), 3);
    // relu1_1 keeps the spatial size, pool1 halves it, relu2_1 doubles the
    // channels at the halved size.
    assert_eq!(encodings[0].dims(), [1, 64, 32, 32]);
    assert_eq!(encodings[1].dims(), [1, 64, 16, 16]);
    assert_eq!(encodings[2].dims(), [1, 128, 16, 16]);
}

#[test]
fn test_vgg11_forward_to_deepest_pool() {
    let device = Default::default();
    let encoder = vgg11_multi_layer_encoder::<Backend>(&device).unwrap();

    let input = Tensor::<Backend, 4>::zeros([1, 3, 64, 64], &device);
    let encoding = encoder.forward_to(input, "pool5").unwrap();

    // Five poolings: 64 / 2^5 = 2.
    assert_eq!(encoding.dims(), [1, 512, 2, 2]);
}

#[test]
fn test_unknown_layer_lists_available() {
    let device = Default::default();
    let encoder = vgg11_multi_layer_encoder::<Backend>(&device).unwrap();

    let input = Tensor::<Backend, 4>::zeros([1, 3, 8, 8], &device);
    match encoder.forward_to(input, "conv6_1") {
        Err(EncoderError::UnknownLayer { name, available }) => {
            assert_eq!(name, "conv6_1");
            assert!(available.iter().any(|label| label == "conv1_1"));
        }
        other => panic!("expected UnknownLayer, got {other:?}"),
    }
}

#[test]
fn test_batch_norm_variant_forward() {
    let device = Default::default();
    let encoder = VggEncoderBuilder::new(VggArch::Vgg11)
        .with_batch_norm(true)
        .build::<Backend>(&device)
        .unwrap();

    let input = Tensor::<Backend, 4>::zeros([2, 3, 16, 16], &device);
    let encoding = encoder.forward_to(input, "bn1_1").unwrap();
    assert_eq!(encoding.dims(), [2, 64, 16, 16]);
}
