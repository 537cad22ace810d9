pub mod resize;

pub use resize::{ResizeFilter, ResizeMode};
