//! Error types for loopspan.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building, reading or processing a mesh selection.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A loop walk visited more vertices than there are candidates.
    ///
    /// This indicates a non-manifold or inconsistent selection graph. The
    /// loop builder recovers from it by truncating the offending loop; it is
    /// reported, never returned from the selection pipeline.
    #[error("loop traversal started at vertex {start} exceeded {limit} vertices")]
    LoopTraversalOverflow {
        /// Index of the vertex the walk started from.
        start: usize,
        /// The traversal cap that was exceeded.
        limit: usize,
    },

    /// The mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// An edge references an invalid vertex index.
    #[error("edge {edge} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The edge index.
        edge: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// An edge connects a vertex to itself.
    #[error("edge {edge} is degenerate (both endpoints are the same vertex)")]
    DegenerateEdge {
        /// The edge index.
        edge: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a load error for the given path.
    pub(crate) fn load(path: &std::path::Path, message: impl Into<String>) -> Self {
        MeshError::LoadError {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_display() {
        let err = MeshError::LoopTraversalOverflow { start: 4, limit: 12 };
        let msg = err.to_string();
        assert!(msg.contains("vertex 4"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_invalid_param() {
        let err = MeshError::invalid_param("edge_length", -1.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter: edge_length = -1 (must be positive)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MeshError = io.into();
        assert!(matches!(err, MeshError::Io(_)));
    }
}
