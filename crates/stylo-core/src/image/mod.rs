pub mod edge;
#[allow(clippy::module_inception)]
pub mod image;

pub use edge::{edge_to_image_size, Edge};
pub use image::Image;
