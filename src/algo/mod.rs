//! Selection refinement algorithms.
//!
//! - **Loops**: reconstruct open and closed vertex loops from a selection
//! - **Segmentation**: keep loop vertices within distance and turning-angle budgets
//! - **Angles**: interior/turning angles and the sharp-corner filter
//! - **Selection**: the full pipeline over a [`MeshGraph`](crate::mesh::MeshGraph)

pub mod angle;
pub mod loops;
pub mod segment;
pub mod select;

pub use angle::{deselect_sharp_vertices, interior_angle, turning_angle, vertex_angle};
pub use loops::{build_loops, LoopKind, LoopSet, VertexLoop};
pub use segment::{segment_loop, segment_loops, SegmentBudget};
pub use select::{select_spaced_vertices, SelectionReport, SpacingOptions};
