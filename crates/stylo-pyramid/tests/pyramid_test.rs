use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use stylo_core::{Edge, Image};
use stylo_pyramid::{ImagePyramid, OctaveImagePyramid, ResizableTarget, SharedTarget};

type Backend = NdArray<f32>;

/// Minimal operator holding a target image, standing in for an optimization
/// objective that participates in pyramid-driven resizing.
struct TestOperator {
    image: Image<Backend>,
    resize_log: Vec<[usize; 4]>,
}

impl TestOperator {
    fn new(dims: [usize; 4]) -> Rc<RefCell<Self>> {
        let device = Default::default();
        Rc::new(RefCell::new(Self {
            image: Image::new(Tensor::zeros(dims, &device)),
            resize_log: Vec::new(),
        }))
    }
}

impl ResizableTarget<Backend> for TestOperator {
    fn target_image(&self) -> Image<Backend> {
        self.image.clone()
    }

    fn set_target_image(&mut self, image: Image<Backend>) {
        self.resize_log.push(image.dims());
        self.image = image;
    }
}

#[test]
fn test_iter_resize() {
    let op = TestOperator::new([1, 3, 128, 128]);
    let shared: SharedTarget<Backend> = op.clone();

    let pyramid = ImagePyramid::builder([32, 64], 1)
        .with_resize_target(shared)
        .build()
        .unwrap();

    for (level, edge_size) in pyramid.iter().zip([32, 64]) {
        let actual = op.borrow().image.edge_size(level.edge());
        assert_eq!(actual, edge_size);
    }
}

#[test]
fn test_iter_restore_after_consumer_panic() {
    let op = TestOperator::new([1, 3, 128, 128]);
    let shared: SharedTarget<Backend> = op.clone();

    let pyramid = ImagePyramid::builder([1], 1)
        .with_resize_target(shared)
        .build()
        .unwrap();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        for _level in &pyramid {
            panic!("consumer failure");
        }
    }));
    assert!(outcome.is_err());

    assert_eq!(op.borrow().image.dims(), [1, 3, 128, 128]);
}

#[test]
fn test_consumer_error_propagates_and_restores() {
    let op = TestOperator::new([1, 3, 96, 96]);
    let shared: SharedTarget<Backend> = op.clone();

    let pyramid = ImagePyramid::builder([24, 48], 1)
        .with_resize_target(shared)
        .build()
        .unwrap();

    let run = || -> Result<(), &'static str> {
        for level in &pyramid {
            for _step in level {
                return Err("loss exploded");
            }
        }
        Ok(())
    };
    assert_eq!(run(), Err("loss exploded"));

    assert_eq!(op.borrow().image.dims(), [1, 3, 96, 96]);
}

#[test]
fn test_reiteration_recaptures_per_pass() {
    let op = TestOperator::new([1, 3, 128, 128]);
    let shared: SharedTarget<Backend> = op.clone();

    let pyramid = ImagePyramid::builder([32, 64], 1)
        .with_resize_target(shared)
        .build()
        .unwrap();

    for _ in &pyramid {}
    let first_pass = op.borrow().resize_log.clone();
    assert_eq!(op.borrow().image.dims(), [1, 3, 128, 128]);

    op.borrow_mut().resize_log.clear();
    for _ in &pyramid {}
    let second_pass = op.borrow().resize_log.clone();
    assert_eq!(op.borrow().image.dims(), [1, 3, 128, 128]);

    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_multiple_targets_all_follow_schedule() {
    let first = TestOperator::new([1, 3, 128, 128]);
    let second = TestOperator::new([1, 3, 256, 192]);
    let targets: Vec<SharedTarget<Backend>> = vec![first.clone(), second.clone()];

    let pyramid = ImagePyramid::builder([32, 64], 1)
        .with_resize_targets(targets)
        .build()
        .unwrap();

    for (level, edge_size) in pyramid.iter().zip([32usize, 64]) {
        assert_eq!(first.borrow().image.edge_size(level.edge()), edge_size);
        assert_eq!(second.borrow().image.edge_size(level.edge()), edge_size);
    }

    assert_eq!(first.borrow().image.dims(), [1, 3, 128, 128]);
    assert_eq!(second.borrow().image.dims(), [1, 3, 256, 192]);
}

#[test]
fn test_long_edge_schedule() {
    let op = TestOperator::new([1, 3, 128, 64]);
    let shared: SharedTarget<Backend> = op.clone();

    let pyramid = ImagePyramid::builder([32, 64], 1)
        .with_edge(Edge::Long)
        .with_resize_target(shared)
        .build()
        .unwrap();

    for (level, edge_size) in pyramid.iter().zip([32usize, 64]) {
        assert_eq!(op.borrow().image.edge_size(level.edge()), edge_size);
    }
    assert_eq!(op.borrow().image.dims(), [1, 3, 128, 64]);
}

#[test]
fn test_nested_step_iteration_drives_full_schedule() {
    let pyramid = ImagePyramid::<Backend>::new(vec![16, 32], vec![2, 3]).unwrap();

    let mut steps = Vec::new();
    for level in &pyramid {
        for step in level {
            steps.push((level.edge_size(), step));
        }
    }
    assert_eq!(
        steps,
        vec![(16, 1), (16, 2), (32, 1), (32, 2), (32, 3)]
    );
}

#[test]
fn test_octave_pyramid_with_bound_target() {
    let op = TestOperator::new([1, 3, 128, 128]);
    let shared: SharedTarget<Backend> = op.clone();

    let pyramid = OctaveImagePyramid::builder(16, 1)
        .with_min_edge_size(2)
        .with_resize_target(shared)
        .build()
        .unwrap();

    assert_eq!(pyramid.len(), 4);
    for (idx, level) in pyramid.iter().enumerate() {
        assert_eq!(level.edge_size(), 1 << (idx + 1));
        assert_eq!(op.borrow().image.edge_size(Edge::Short), level.edge_size());
    }
    assert_eq!(op.borrow().image.dims(), [1, 3, 128, 128]);
}
