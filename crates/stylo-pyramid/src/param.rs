//! Scalar-or-per-level constructor parameters.

use crate::error::{PyramidError, Result};

/// Constructor parameter that is either a single value broadcast to every
/// level or an explicit per-level sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelParam<T> {
    /// One value for all levels.
    Scalar(T),
    /// One value per level.
    PerLevel(Vec<T>),
}

impl<T: Clone> LevelParam<T> {
    /// Number of levels this parameter dictates, if it is a sequence.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::PerLevel(values) => Some(values.len()),
        }
    }

    /// Resolve to exactly `num_levels` values, broadcasting a scalar and
    /// rejecting a sequence of any other length.
    pub(crate) fn resolve(self, num_levels: usize, name: &str) -> Result<Vec<T>> {
        match self {
            Self::Scalar(value) => Ok(vec![value; num_levels]),
            Self::PerLevel(values) if values.len() == num_levels => Ok(values),
            Self::PerLevel(values) => Err(PyramidError::invalid_configuration(format!(
                "expected {num_levels} values for {name}, got {}",
                values.len()
            ))),
        }
    }
}

impl<T> From<T> for LevelParam<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<T> From<Vec<T>> for LevelParam<T> {
    fn from(values: Vec<T>) -> Self {
        Self::PerLevel(values)
    }
}

impl<T: Clone> From<&[T]> for LevelParam<T> {
    fn from(values: &[T]) -> Self {
        Self::PerLevel(values.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for LevelParam<T> {
    fn from(values: [T; N]) -> Self {
        Self::PerLevel(values.into())
    }
}
