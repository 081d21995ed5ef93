use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a path needs at least 2 control points, got {control_points}")]
pub struct InvalidPathError {
    pub control_points: usize,
}
