//! Mesh construction utilities.
//!
//! This module provides functions for building [`EdgeMesh`]es from the
//! element lists found in mesh files: explicit edge pairs, polylines (OBJ `l`
//! records) and polygon faces, whose boundaries become edges.

use std::collections::HashSet;

use nalgebra::Point3;

use super::edge_mesh::EdgeMesh;
use super::index::{MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a mesh from vertex positions and explicit edges.
///
/// Edges are created in the given order; a repeated pair (in either
/// direction) is ignored. All vertices start unselected.
///
/// # Example
/// ```
/// use loopspan::mesh::{build_from_edges, EdgeMesh};
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ];
/// let edges = vec![[0, 1], [1, 2]];
///
/// let mesh: EdgeMesh = build_from_edges(&positions, &edges).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_edges(), 2);
/// ```
pub fn build_from_edges<I: MeshIndex>(
    positions: &[Point3<f64>],
    edges: &[[usize; 2]],
) -> Result<EdgeMesh<I>> {
    if positions.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (ei, edge) in edges.iter().enumerate() {
        for &vi in edge {
            if vi >= positions.len() {
                return Err(MeshError::InvalidVertexIndex { edge: ei, vertex: vi });
            }
        }
        if edge[0] == edge[1] {
            return Err(MeshError::DegenerateEdge { edge: ei });
        }
    }

    let mut mesh = EdgeMesh::with_capacity(positions.len(), edges.len());
    for &p in positions {
        mesh.add_vertex(p);
    }
    for &[a, b] in edges {
        mesh.add_edge(VertexId::new(a), VertexId::new(b))?;
    }

    Ok(mesh)
}

/// Build a mesh from vertex positions and polylines.
///
/// Every pair of consecutive indices in a polyline becomes an edge. A
/// polyline that repeats its first index at the end is closed.
///
/// # Example
/// ```
/// use loopspan::mesh::{build_from_polylines, EdgeMesh};
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ];
/// let closed = vec![vec![0, 1, 2, 0]];
///
/// let mesh: EdgeMesh = build_from_polylines(&positions, &closed).unwrap();
/// assert_eq!(mesh.num_edges(), 3);
/// ```
pub fn build_from_polylines<I: MeshIndex>(
    positions: &[Point3<f64>],
    polylines: &[Vec<usize>],
) -> Result<EdgeMesh<I>> {
    let edges: Vec<[usize; 2]> = polylines
        .iter()
        .flat_map(|line| line.windows(2).map(|w| [w[0], w[1]]))
        .collect();
    build_from_edges(positions, &edges)
}

/// Build a mesh from vertex positions and polygon faces.
///
/// Only the boundary edges of each polygon are stored, de-duplicated and in
/// first-seen order. Faces with fewer than two distinct vertices contribute
/// nothing.
pub fn build_from_faces<I: MeshIndex>(
    positions: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<EdgeMesh<I>> {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut edges = Vec::new();

    for face in faces {
        let n = face.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let a = face[i];
            let b = face[(i + 1) % n];
            if a == b {
                continue;
            }
            if seen.insert((a.min(b), a.max(b))) {
                edges.push([a, b]);
            }
            // A two-vertex "face" is a single edge, not a closed pair.
            if n == 2 {
                break;
            }
        }
    }

    build_from_edges(positions, &edges)
}

/// Convert a mesh back to positions and edge pairs.
pub fn to_edge_list<I: MeshIndex>(mesh: &EdgeMesh<I>) -> (Vec<Point3<f64>>, Vec<[usize; 2]>) {
    let positions = mesh.vertices.iter().map(|v| v.position).collect();
    let edges = mesh
        .edges
        .iter()
        .map(|e| [e.vertices[0].index(), e.vertices[1].index()])
        .collect();
    (positions, edges)
}
