pub mod error;
pub mod filter;
pub mod image;

pub use error::{CoreError, Result};
pub use filter::{ResizeFilter, ResizeMode};
pub use image::{Edge, Image};
