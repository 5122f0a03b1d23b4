use std::path::PathBuf;

use thiserror::Error;

use crate::shape::ShapeKind;

/// Errors raised while loading configuration or exporting the visual log.
#[derive(Error, Debug)]
pub enum DebugDrawError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse debug draw config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to serialize visual log: {0}")]
    Serialize(#[from] ron::Error),
}

pub type DebugDrawResult<T> = Result<T, DebugDrawError>;

/// A draw command whose geometry cannot be rendered.
///
/// Produced by [`DrawShape::validate`](crate::DrawShape::validate). Reaching one
/// of these during a tick means the producer built a bad command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("{kind:?} has a non-finite {field}")]
    NonFinite { kind: ShapeKind, field: &'static str },
    #[error("{kind:?} has a negative {field} ({value})")]
    Negative {
        kind: ShapeKind,
        field: &'static str,
        value: f32,
    },
    #[error("{kind:?} has a zero-length {field}")]
    Degenerate { kind: ShapeKind, field: &'static str },
}
