//! Vertex/edge mesh with selection state.
//!
//! [`EdgeMesh`] stores exactly what the selection pipeline reads: vertex
//! positions, vertex and edge selection flags, and for every vertex the ordered
//! list of its incident edges. Faces are not stored; when a mesh is built from
//! polygons only their boundary edges are kept (see
//! [`build_from_faces`](super::build_from_faces)).
//!
//! # Incident edge order
//!
//! Edges are appended to a vertex's incident list in creation order. Loop
//! traversal prefers the first incident edge, so the order in which edges are
//! added is observable in the direction of reconstructed loops.

use nalgebra::Point3;

use super::graph::MeshGraph;
use super::index::{EdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex of an [`EdgeMesh`].
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Selection flag.
    pub selected: bool,

    /// Incident edges, in the order they were added.
    pub(crate) edges: Vec<EdgeId<I>>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new, unselected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            selected: false,
            edges: Vec::new(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Incident edges of this vertex.
    #[inline]
    pub fn edges(&self) -> &[EdgeId<I>] {
        &self.edges
    }
}

/// An edge of an [`EdgeMesh`].
#[derive(Debug, Clone, Copy)]
pub struct Edge<I: MeshIndex = u32> {
    /// The two endpoints.
    pub vertices: [VertexId<I>; 2],

    /// Selection flag.
    pub selected: bool,
}

/// An undirected vertex/edge graph embedded in 3D, with selection flags.
#[derive(Debug, Clone)]
pub struct EdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) edges: Vec<Edge<I>>,
    editable: bool,
}

impl<I: MeshIndex> Default for EdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> EdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            editable: true,
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            edges: Vec::with_capacity(num_edges),
            editable: true,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertices[v.index()].position
    }

    /// The endpoint of `e` that is not `v`.
    #[inline]
    pub fn other_vertex(&self, e: EdgeId<I>, v: VertexId<I>) -> VertexId<I> {
        let [a, b] = self.edge(e).vertices;
        if a == v {
            b
        } else {
            a
        }
    }

    /// Number of edges incident to a vertex.
    #[inline]
    pub fn degree(&self, v: VertexId<I>) -> usize {
        self.vertex(v).edges.len()
    }

    /// Find the edge connecting two vertices, if any.
    pub fn find_edge(&self, v0: VertexId<I>, v1: VertexId<I>) -> Option<EdgeId<I>> {
        self.vertex(v0)
            .edges
            .iter()
            .copied()
            .find(|&e| self.other_vertex(e, v0) == v1)
    }

    /// Length of an edge.
    pub fn edge_length(&self, e: EdgeId<I>) -> f64 {
        let [a, b] = self.edge(e).vertices;
        (self.position(b) - self.position(a)).norm()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over vertices adjacent to a vertex, in incident-edge order.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex(v)
            .edges
            .iter()
            .map(move |&e| self.other_vertex(e, v))
    }

    // ==================== Selection ====================

    /// Whether a vertex is selected.
    #[inline]
    pub fn is_selected(&self, v: VertexId<I>) -> bool {
        self.vertex(v).selected
    }

    /// Set the selection flag of a vertex.
    #[inline]
    pub fn set_selected(&mut self, v: VertexId<I>, selected: bool) {
        self.vertices[v.index()].selected = selected;
    }

    /// Set the selection flag of an edge.
    #[inline]
    pub fn set_edge_selected(&mut self, e: EdgeId<I>, selected: bool) {
        self.edges[e.index()].selected = selected;
    }

    /// Select every vertex and edge.
    pub fn select_all(&mut self) {
        for v in &mut self.vertices {
            v.selected = true;
        }
        for e in &mut self.edges {
            e.selected = true;
        }
    }

    /// Clear every vertex and edge selection flag.
    pub fn deselect_all(&mut self) {
        for v in &mut self.vertices {
            v.selected = false;
        }
        for e in &mut self.edges {
            e.selected = false;
        }
    }

    /// Select the given vertices, leaving all others untouched.
    ///
    /// Out-of-range indices are rejected before any flag is changed.
    pub fn select_vertices<T>(&mut self, indices: T) -> Result<()>
    where
        T: IntoIterator<Item = usize>,
    {
        let indices: Vec<usize> = indices.into_iter().collect();
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(MeshError::invalid_param(
                "vertex",
                bad,
                "index out of range",
            ));
        }
        for i in indices {
            self.vertices[i].selected = true;
        }
        Ok(())
    }

    /// IDs of all selected vertices, in ascending order.
    pub fn selected_vertices(&self) -> Vec<VertexId<I>> {
        self.vertex_ids().filter(|&v| self.is_selected(v)).collect()
    }

    /// Number of selected vertices.
    pub fn num_selected(&self) -> usize {
        self.vertices.iter().filter(|v| v.selected).count()
    }

    /// Mark each edge selected iff both its endpoints are selected.
    pub fn flush_edge_selection(&mut self) {
        for e in 0..self.edges.len() {
            let [a, b] = self.edges[e].vertices;
            self.edges[e].selected =
                self.vertices[a.index()].selected && self.vertices[b.index()].selected;
        }
    }

    /// Whether selection edits are currently accepted.
    #[inline]
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Lock or unlock the mesh for selection edits.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    // ==================== Construction ====================

    /// Add a new unselected vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    /// Add an edge between two existing vertices and return its ID.
    ///
    /// If the two vertices are already connected the existing edge is
    /// returned and no edge is added.
    pub fn add_edge(&mut self, v0: VertexId<I>, v1: VertexId<I>) -> Result<EdgeId<I>> {
        let next = self.edges.len();
        for v in [v0, v1] {
            if v.index() >= self.vertices.len() {
                return Err(MeshError::InvalidVertexIndex {
                    edge: next,
                    vertex: v.index(),
                });
            }
        }
        if v0 == v1 {
            return Err(MeshError::DegenerateEdge { edge: next });
        }
        if let Some(existing) = self.find_edge(v0, v1) {
            return Ok(existing);
        }

        let id = EdgeId::new(next);
        self.edges.push(Edge {
            vertices: [v0, v1],
            selected: false,
        });
        self.vertices[v0.index()].edges.push(id);
        self.vertices[v1.index()].edges.push(id);
        Ok(id)
    }

    // ==================== Geometry ====================

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?;
        let mut min = first.position;
        let mut max = first.position;

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Validation ====================

    /// Check that incident lists and edge endpoints agree.
    pub fn is_valid(&self) -> bool {
        for (ei, edge) in self.edges.iter().enumerate() {
            let id = EdgeId::new(ei);
            for v in edge.vertices {
                if v.index() >= self.vertices.len() || !self.vertex(v).edges.contains(&id) {
                    return false;
                }
            }
            if edge.vertices[0] == edge.vertices[1] {
                return false;
            }
        }

        for (vi, vertex) in self.vertices.iter().enumerate() {
            let id = VertexId::new(vi);
            for &e in &vertex.edges {
                if e.index() >= self.edges.len() || !self.edge(e).vertices.contains(&id) {
                    return false;
                }
            }
        }

        true
    }
}

impl<I: MeshIndex> MeshGraph<I> for EdgeMesh<I> {
    #[inline]
    fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    fn position(&self, v: VertexId<I>) -> Point3<f64> {
        self.vertices[v.index()].position
    }

    #[inline]
    fn is_selected(&self, v: VertexId<I>) -> bool {
        self.vertices[v.index()].selected
    }

    #[inline]
    fn set_selected(&mut self, v: VertexId<I>, selected: bool) {
        self.vertices[v.index()].selected = selected;
    }

    #[inline]
    fn incident_edges(&self, v: VertexId<I>) -> &[EdgeId<I>] {
        &self.vertices[v.index()].edges
    }

    #[inline]
    fn edge_vertices(&self, e: EdgeId<I>) -> [VertexId<I>; 2] {
        self.edges[e.index()].vertices
    }

    #[inline]
    fn is_edge_selected(&self, e: EdgeId<I>) -> bool {
        self.edges[e.index()].selected
    }

    fn is_editable(&self) -> bool {
        self.editable
    }
}
