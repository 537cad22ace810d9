pub mod error;
pub mod level;
pub mod octave;
pub mod param;
pub mod pyramid;

pub use error::{PyramidError, Result};
pub use level::PyramidLevel;
pub use octave::OctaveImagePyramid;
pub use param::LevelParam;
pub use pyramid::{
    ImagePyramid, ImagePyramidBuilder, PyramidIter, ResizableTarget, SharedTarget,
};
