//! Core mesh data structures.
//!
//! # Overview
//!
//! The selection pipeline works against the [`MeshGraph`] trait: vertex
//! positions, vertex and edge selection flags and per-vertex incident-edge
//! lists. [`EdgeMesh`] is the in-memory implementation used by the file
//! loaders and the command-line tool.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an edge
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use loopspan::mesh::{build_from_polylines, EdgeMesh};
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//! ];
//! let mut mesh: EdgeMesh = build_from_polylines(&positions, &[vec![0, 1, 2]]).unwrap();
//! mesh.select_all();
//! assert_eq!(mesh.num_selected(), 3);
//! ```

mod builder;
mod edge_mesh;
mod graph;
mod index;

pub use builder::{build_from_edges, build_from_faces, build_from_polylines, to_edge_list};
pub use edge_mesh::{Edge, EdgeMesh, Vertex};
pub use graph::MeshGraph;
pub use index::{EdgeId, MeshIndex, VertexId};
