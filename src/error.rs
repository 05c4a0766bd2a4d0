use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Sampling left no usable points. Resample with less trimming.
    #[error("trajectory has no points")]
    EmptyTrajectory,
}

pub type Result<T> = std::result::Result<T, OrbitError>;
