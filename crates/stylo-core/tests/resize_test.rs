use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use stylo_core::{Edge, Image, ResizeFilter, ResizeMode};

type Backend = NdArray<f32>;

#[test]
fn test_resize_chain_tracks_edge_sizes() {
    let device = Default::default();
    let mut image = Image::<Backend>::new(Tensor::ones([1, 3, 128, 96], &device));

    for edge_size in [64, 32, 96] {
        let filter = ResizeFilter::new(edge_size, Edge::Short).unwrap();
        image = filter.apply(&image);
        assert_eq!(image.edge_size(Edge::Short), edge_size);
    }
}

#[test]
fn test_resize_preserves_constant_content() {
    let device = Default::default();
    let image = Image::<Backend>::new(Tensor::ones([1, 1, 64, 64], &device) * 0.5);

    let filter = ResizeFilter::new(16, Edge::Short).unwrap();
    let resized = filter.apply(&image);

    let data = resized.into_inner().into_data();
    for &value in data.as_slice::<f32>().unwrap() {
        assert!((value - 0.5).abs() < 1e-5, "expected 0.5, got {value}");
    }
}

#[test]
fn test_resize_aspect_ratio_preserved() {
    let device = Default::default();
    let image = Image::<Backend>::new(Tensor::zeros([1, 3, 200, 100], &device));

    for mode in [ResizeMode::Nearest, ResizeMode::Bilinear, ResizeMode::Bicubic] {
        let filter = ResizeFilter::new(50, Edge::Short).unwrap().with_mode(mode);
        let resized = filter.apply(&image);
        assert_eq!(resized.dims(), [1, 3, 100, 50]);
    }
}
