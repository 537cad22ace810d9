//! Pyramid Schedule Example
//!
//! Demonstrates how an octave pyramid drives a coarse-to-fine optimization
//! loop: a bound target image follows the resolution schedule and is
//! restored once the loop finishes.
//!
//! Usage:
//!   cargo run --example style_schedule

use std::cell::RefCell;
use std::rc::Rc;

use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use stylo_core::{Edge, Image};
use stylo_pyramid::{OctaveImagePyramid, ResizableTarget, SharedTarget};

type Backend = NdArray<f32>;

/// Toy stand-in for a comparison objective holding a reference image.
struct ContentObjective {
    target: Image<Backend>,
}

impl ResizableTarget<Backend> for ContentObjective {
    fn target_image(&self) -> Image<Backend> {
        self.target.clone()
    }

    fn set_target_image(&mut self, image: Image<Backend>) {
        self.target = image;
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    let device = Default::default();
    let content = Image::new(Tensor::<Backend, 4>::ones([1, 3, 512, 384], &device));
    println!("Content image: {:?}", content.dims());

    let objective = Rc::new(RefCell::new(ContentObjective { target: content }));
    let shared: SharedTarget<Backend> = objective.clone();

    let pyramid = OctaveImagePyramid::builder(512, 20)
        .with_min_edge_size(64)
        .with_resize_target(shared)
        .build()?;

    println!("Schedule with {} levels:", pyramid.len());
    for level in &pyramid {
        let dims = objective.borrow().target.dims();
        println!(
            "  edge {:>3} ({}) -> target resized to {:?}",
            level.edge_size(),
            level.edge(),
            dims
        );

        for _step in level {
            // An optimization step against the resized target would run
            // here: encode, score, backpropagate, update the input image.
        }
    }

    let restored = objective.borrow().target.dims();
    println!("After the loop the target is back to {restored:?}");
    assert_eq!(objective.borrow().target.edge_size(Edge::Short), 384);

    Ok(())
}
