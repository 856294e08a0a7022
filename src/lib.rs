//! # Loopspan
//!
//! Spaced vertex selection along edge loops.
//!
//! Given a mesh with a set of selected vertices, loopspan reconstructs the
//! chains and rings those vertices form along the mesh edges and re-selects
//! them so that the selected runs respect a maximum travelled distance and a
//! maximum accumulated turning angle. Selected corners sharper than a
//! threshold are dropped at the end.
//!
//! ## Features
//!
//! - **Graph abstraction**: the pipeline runs on anything implementing [`mesh::MeshGraph`]
//! - **Flexible indexing**: support for 16-bit, 32-bit, and 64-bit indices
//! - **File formats**: OBJ (load) and PLY (load and save, with selection flags)
//! - **Recoverable traversal**: malformed selections are truncated and reported, never fatal
//!
//! ## Quick Start
//!
//! ```no_run
//! use loopspan::prelude::*;
//!
//! let mut mesh: EdgeMesh = loopspan::io::load("outline.ply").unwrap();
//!
//! let report = select_spaced_vertices(&mut mesh, &SpacingOptions::default()).unwrap();
//! println!("{}", report);
//!
//! loopspan::io::save(&mesh, "spaced.ply").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use loopspan::prelude::*;
//! use nalgebra::Point3;
//!
//! // An L-shaped chain with unit edges.
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(2.0, 1.0, 0.0),
//!     Point3::new(2.0, 2.0, 0.0),
//! ];
//! let mut mesh: EdgeMesh = build_from_polylines(&positions, &[vec![0, 1, 2, 3, 4]]).unwrap();
//! mesh.select_all();
//!
//! let loops = build_loops(&mesh);
//! assert_eq!(loops.len(), 1);
//!
//! let options = SpacingOptions::distance_only(10.0);
//! select_spaced_vertices(&mut mesh, &options).unwrap();
//! assert_eq!(mesh.num_selected(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use loopspan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        build_loops, select_spaced_vertices, LoopKind, SelectionReport, SpacingOptions,
        VertexLoop,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_edges, build_from_faces, build_from_polylines, EdgeId, EdgeMesh, MeshGraph,
        MeshIndex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
