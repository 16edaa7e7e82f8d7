use thiserror::Error;

/// Pose interpolation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseInterpError {
    #[error("Trajectory contains no samples")]
    EmptyTrajectory,

    #[error("Target time {target} outside trajectory range [{first}, {last}]")]
    OutOfRange {
        target: f64,
        first: f64,
        last: f64,
    },

    #[error("Timestamp at position {index} is not strictly increasing")]
    NonMonotonic { index: usize },

    #[error("Point dimensions do not match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Result type for interpolation queries
pub type InterpResult<T> = Result<T, PoseInterpError>;
