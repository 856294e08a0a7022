//! Corner angles and the sharp-corner filter.
//!
//! Two angles are used by the selection pipeline:
//!
//! - the **interior angle** at a vertex between its two edges, in `[0, π]`:
//!   `π` for a straight continuation, `0` for an edge folded back on itself;
//! - the **turning angle**, `180° − interior`, i.e. how far a path deviates
//!   from going straight on.
//!
//! [`deselect_sharp_vertices`] is the final pipeline stage: it drops every
//! selected two-edge vertex whose interior angle is below a threshold.

use std::f64::consts::{PI, TAU};

use log::debug;
use nalgebra::Point3;

use crate::mesh::{MeshGraph, MeshIndex, VertexId};

/// Edges shorter than this have no direction.
const MIN_EDGE_LENGTH: f64 = 1e-12;

/// Interior angle at `vertex` between the directions towards `a` and `b`.
///
/// Returns the angle in radians in `[0, π]`, or `None` if either direction
/// has zero length.
pub fn interior_angle(vertex: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> Option<f64> {
    let to_a = a - vertex;
    let to_b = b - vertex;
    let len_a = to_a.norm();
    let len_b = to_b.norm();
    if len_a < MIN_EDGE_LENGTH || len_b < MIN_EDGE_LENGTH {
        return None;
    }

    let cos = (to_a.dot(&to_b) / (len_a * len_b)).clamp(-1.0, 1.0);
    let angle = cos.acos();
    // acos never exceeds π; reflex readings would be folded back into range.
    Some(if angle > PI { TAU - angle } else { angle })
}

/// Turning angle at `vertex` on the path `prev -> vertex -> next`, in degrees.
///
/// Zero for a straight continuation and for degenerate (zero-length) edges.
pub fn turning_angle(prev: &Point3<f64>, vertex: &Point3<f64>, next: &Point3<f64>) -> f64 {
    interior_angle(vertex, prev, next)
        .map(|a| (180.0 - a.to_degrees()).max(0.0))
        .unwrap_or(0.0)
}

/// Interior angle between the two edges of a degree-2 vertex, in radians.
///
/// `None` if the vertex does not have exactly two incident edges or one of
/// them has zero length.
pub fn vertex_angle<I, G>(graph: &G, v: VertexId<I>) -> Option<f64>
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let edges = graph.incident_edges(v);
    if edges.len() != 2 {
        return None;
    }
    let a = graph.position(graph.other_vertex(edges[0], v));
    let b = graph.position(graph.other_vertex(edges[1], v));
    interior_angle(&graph.position(v), &a, &b)
}

/// Deselect every selected two-edge vertex whose interior angle is strictly
/// below `deselect_angle` (degrees).
///
/// `selection` holds one flag per vertex and is updated in place; the graph is
/// only read. Vertices with a zero-length edge are left unchanged. Returns the
/// number of vertices deselected.
pub fn deselect_sharp_vertices<I, G>(graph: &G, selection: &mut [bool], deselect_angle: f64) -> usize
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let threshold = deselect_angle.to_radians();
    let mut deselected = 0;

    for (i, selected) in selection.iter_mut().enumerate() {
        if !*selected {
            continue;
        }
        let v = VertexId::<I>::new(i);
        if let Some(angle) = vertex_angle(graph, v) {
            if angle < threshold {
                *selected = false;
                deselected += 1;
            }
        }
    }

    debug!(
        "angle filter: {} vertices below {:.2} degrees deselected",
        deselected, deselect_angle
    );
    deselected
}
