//! The mesh interface consumed by the selection pipeline.
//!
//! [`MeshGraph`] is the only view the algorithms in [`crate::algo`] have of a
//! mesh. It exposes vertex positions, vertex/edge selection flags and the
//! ordered incident-edge list of every vertex. [`EdgeMesh`](super::EdgeMesh)
//! is the in-crate implementation; a host application (a modelling tool, a
//! scene graph, ...) implements the trait over its own storage instead.

use nalgebra::Point3;

use super::index::{EdgeId, MeshIndex, VertexId};
use crate::error::Result;

/// Read/write view over the vertices and edges of a mesh.
pub trait MeshGraph<I: MeshIndex = u32> {
    /// Number of vertices. Valid vertex ids are `0..num_vertices()`.
    fn num_vertices(&self) -> usize;

    /// Number of edges. Valid edge ids are `0..num_edges()`.
    fn num_edges(&self) -> usize;

    /// Position of a vertex.
    fn position(&self, v: VertexId<I>) -> Point3<f64>;

    /// Whether a vertex is selected.
    fn is_selected(&self, v: VertexId<I>) -> bool;

    /// Set the selection flag of a vertex.
    fn set_selected(&mut self, v: VertexId<I>, selected: bool);

    /// Edges incident to a vertex, in a stable order.
    ///
    /// The order matters: loop traversal tries the first edge before the
    /// second.
    fn incident_edges(&self, v: VertexId<I>) -> &[EdgeId<I>];

    /// The two endpoints of an edge.
    fn edge_vertices(&self, e: EdgeId<I>) -> [VertexId<I>; 2];

    /// Whether an edge is selected.
    fn is_edge_selected(&self, e: EdgeId<I>) -> bool;

    /// Number of edges incident to a vertex, regardless of selection.
    #[inline]
    fn degree(&self, v: VertexId<I>) -> usize {
        self.incident_edges(v).len()
    }

    /// The endpoint of `e` that is not `v`.
    #[inline]
    fn other_vertex(&self, e: EdgeId<I>, v: VertexId<I>) -> VertexId<I> {
        let [a, b] = self.edge_vertices(e);
        if a == v {
            b
        } else {
            a
        }
    }

    /// Whether the mesh currently accepts selection edits.
    ///
    /// The pipeline is a no-op on a graph that is not editable.
    fn is_editable(&self) -> bool {
        true
    }

    /// Persist the flags written through [`set_selected`](Self::set_selected).
    ///
    /// Called exactly once at the end of a pipeline run. Implementations must
    /// leave the graph editable.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}
