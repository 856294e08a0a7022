//! Reconstruction of vertex loops from a selection.
//!
//! The selected vertices of degree one or two (the *candidates*) form a set of
//! simple paths and cycles along the mesh edges. [`build_loops`] recovers them
//! as ordered vertex sequences:
//!
//! 1. Candidates are split into *terminals* (degree 1, or a neighbour that is
//!    not selected) and *interior* vertices (both neighbours selected).
//! 2. A walk is started from every terminal, in ascending id order, that is
//!    not already part of a loop. A walk steps onto any selected neighbour it
//!    has not visited yet. A selected vertex with more than two edges (a
//!    junction) is stepped onto but never continues the walk, so it becomes
//!    the loop's far end. Each open loop is then oriented so its lower
//!    endpoint (by position, then id) comes first.
//! 3. Candidates left over lie on cycles or on paths whose two ends are
//!    selected junctions. The lowest remaining id starts a walk that runs
//!    until the cycle closes. If it stops at a junction instead, the walk
//!    continues from the start in the other direction and the result is an
//!    open loop. This repeats until no candidate remains.
//!
//! Every walk is capped at the number of candidates it could possibly visit;
//! junctions at the ends of a walk do not count. An inconsistent graph (e.g.
//! an edge listed by only one of its endpoints) can make a walk run past the
//! cap; the loop is then truncated, the overflow is logged and recorded in
//! [`LoopSet::overflows`], and reconstruction carries on with the next loop.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};

use crate::error::MeshError;
use crate::mesh::{MeshGraph, MeshIndex, VertexId};

/// Whether a loop is a path or a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// A path with two distinct ends (or a single vertex).
    Open,
    /// A cycle: the last vertex is adjacent to the first.
    Closed,
}

/// An ordered sequence of distinct vertices along mesh edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLoop<I: MeshIndex = u32> {
    vertices: Vec<VertexId<I>>,
    kind: LoopKind,
}

impl<I: MeshIndex> VertexLoop<I> {
    /// Create a loop from an ordered vertex list.
    pub fn new(vertices: Vec<VertexId<I>>, kind: LoopKind) -> Self {
        Self { vertices, kind }
    }

    /// The vertices in traversal order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId<I>] {
        &self.vertices
    }

    /// Open or closed.
    #[inline]
    pub fn kind(&self) -> LoopKind {
        self.kind
    }

    /// Whether this loop is a cycle.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.kind == LoopKind::Closed
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the loop has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// First vertex.
    #[inline]
    pub fn first(&self) -> Option<VertexId<I>> {
        self.vertices.first().copied()
    }

    /// Last vertex.
    #[inline]
    pub fn last(&self) -> Option<VertexId<I>> {
        self.vertices.last().copied()
    }

    /// The loop vertex following position `i`, wrapping around for cycles.
    pub fn successor(&self, i: usize) -> Option<VertexId<I>> {
        if i + 1 < self.vertices.len() {
            Some(self.vertices[i + 1])
        } else if self.is_closed() && self.vertices.len() > 1 {
            Some(self.vertices[0])
        } else {
            None
        }
    }

    fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

/// The loops reconstructed from one selection.
#[derive(Debug, Default)]
pub struct LoopSet<I: MeshIndex = u32> {
    loops: Vec<VertexLoop<I>>,
    overflows: Vec<MeshError>,
}

impl<I: MeshIndex> LoopSet<I> {
    /// All loops: open loops first, then cycles, each in construction order.
    #[inline]
    pub fn loops(&self) -> &[VertexLoop<I>] {
        &self.loops
    }

    /// Number of loops.
    #[inline]
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    /// Whether no loop was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Iterate over the loops.
    pub fn iter(&self) -> std::slice::Iter<'_, VertexLoop<I>> {
        self.loops.iter()
    }

    /// Number of open loops.
    pub fn num_open(&self) -> usize {
        self.loops.iter().filter(|l| !l.is_closed()).count()
    }

    /// Number of closed loops.
    pub fn num_closed(&self) -> usize {
        self.loops.iter().filter(|l| l.is_closed()).count()
    }

    /// Traversal overflows hit while building, one
    /// [`MeshError::LoopTraversalOverflow`] per truncated loop.
    #[inline]
    pub fn overflows(&self) -> &[MeshError] {
        &self.overflows
    }

    /// Consume the set, returning the loops.
    pub fn into_loops(self) -> Vec<VertexLoop<I>> {
        self.loops
    }
}

impl<'a, I: MeshIndex> IntoIterator for &'a LoopSet<I> {
    type Item = &'a VertexLoop<I>;
    type IntoIter = std::slice::Iter<'a, VertexLoop<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.loops.iter()
    }
}

/// Whether a vertex takes part in loop reconstruction.
#[inline]
pub fn is_candidate<I, G>(graph: &G, v: VertexId<I>) -> bool
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    graph.is_selected(v) && matches!(graph.degree(v), 1 | 2)
}

/// Whether a candidate vertex can start or end an open loop.
pub fn is_terminal<I, G>(graph: &G, v: VertexId<I>) -> bool
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let edges = graph.incident_edges(v);
    edges.len() == 1
        || edges
            .iter()
            .any(|&e| !graph.is_selected(graph.other_vertex(e, v)))
}

/// The next vertex of a walk from `v`.
///
/// Tries the far end of the first incident edge, then of the second, and
/// returns the first that is selected and not yet in `visited`. Vertices with
/// more than two edges never continue a walk.
fn next_vertex<I, G>(graph: &G, v: VertexId<I>, visited: &HashSet<VertexId<I>>) -> Option<VertexId<I>>
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let edges = graph.incident_edges(v);
    if edges.len() > 2 {
        return None;
    }
    edges
        .iter()
        .map(|&e| graph.other_vertex(e, v))
        .find(|&n| !visited.contains(&n) && graph.is_selected(n))
}

/// Extend `path` from its last vertex until no unvisited selected neighbour
/// remains or more than `limit` candidates are on the path.
///
/// `start` only identifies the walk in the overflow error.
fn extend<I, G>(
    graph: &G,
    start: VertexId<I>,
    path: &mut Vec<VertexId<I>>,
    visited: &mut HashSet<VertexId<I>>,
    limit: usize,
) -> Option<MeshError>
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let mut walked = path.iter().filter(|&&v| is_candidate(graph, v)).count();

    while let Some(next) = path.last().and_then(|&v| next_vertex(graph, v, visited)) {
        path.push(next);
        visited.insert(next);

        if is_candidate(graph, next) {
            walked += 1;
            if walked > limit {
                let err = MeshError::LoopTraversalOverflow {
                    start: start.index(),
                    limit,
                };
                warn!("{}; keeping the first {} vertices", err, path.len());
                return Some(err);
            }
        }
    }

    None
}

/// An open loop, oriented so that its lower endpoint comes first.
fn open_loop<I, G>(graph: &G, path: Vec<VertexId<I>>) -> VertexLoop<I>
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let mut open = VertexLoop::new(path, LoopKind::Open);
    if let (Some(first), Some(last)) = (open.first(), open.last()) {
        if endpoint_order(graph, first, last) == Ordering::Greater {
            open.reverse();
        }
    }
    open
}

/// Total order on positions used to orient open loops; ties fall back to id.
fn endpoint_order<I, G>(graph: &G, a: VertexId<I>, b: VertexId<I>) -> Ordering
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let pa = graph.position(a);
    let pb = graph.position(b);
    (0..3)
        .map(|i| pa[i].partial_cmp(&pb[i]).unwrap_or(Ordering::Equal))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.cmp(&b))
}

fn is_adjacent<I, G>(graph: &G, a: VertexId<I>, b: VertexId<I>) -> bool
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    graph
        .incident_edges(a)
        .iter()
        .any(|&e| graph.other_vertex(e, a) == b)
}

/// Reconstruct the open and closed loops formed by the selected vertices.
///
/// The result is deterministic for a given graph: starts are taken in
/// ascending id order and open loops are oriented by endpoint position.
///
/// # Example
///
/// ```
/// use loopspan::prelude::*;
/// use loopspan::algo::loops::{build_loops, LoopKind};
/// use nalgebra::Point3;
///
/// // A selected square outline: one cycle.
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh: EdgeMesh = build_from_polylines(&positions, &[vec![0, 1, 2, 3, 0]]).unwrap();
/// mesh.select_all();
///
/// let loops = build_loops(&mesh);
/// assert_eq!(loops.len(), 1);
/// assert_eq!(loops.loops()[0].kind(), LoopKind::Closed);
/// assert_eq!(loops.loops()[0].len(), 4);
/// ```
pub fn build_loops<I, G>(graph: &G) -> LoopSet<I>
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let candidates: Vec<VertexId<I>> = (0..graph.num_vertices())
        .map(VertexId::new)
        .filter(|&v| is_candidate(graph, v))
        .collect();
    let terminals: Vec<VertexId<I>> = candidates
        .iter()
        .copied()
        .filter(|&v| is_terminal(graph, v))
        .collect();

    debug!(
        "loop builder: {} candidates, {} terminals",
        candidates.len(),
        terminals.len()
    );

    let mut set = LoopSet {
        loops: Vec::new(),
        overflows: Vec::new(),
    };
    let mut consumed: HashSet<VertexId<I>> = HashSet::new();

    // Open loops, one walk per unconsumed terminal.
    let limit = candidates.len();
    for &start in &terminals {
        if consumed.contains(&start) {
            continue;
        }
        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        let overflow = extend(graph, start, &mut path, &mut visited, limit);
        consumed.extend(path.iter().copied());
        set.overflows.extend(overflow);
        set.loops.push(open_loop(graph, path));
    }

    // Whatever is left lies on cycles or between two selected junctions.
    let mut remaining: BTreeSet<VertexId<I>> = candidates
        .iter()
        .copied()
        .filter(|v| !consumed.contains(v))
        .collect();

    while let Some(&start) = remaining.iter().next() {
        let limit = remaining.len();
        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        let mut overflow = extend(graph, start, &mut path, &mut visited, limit);

        let closes = path.len() >= 3
            && path
                .last()
                .is_some_and(|&last| is_adjacent(graph, last, start));
        let lp = if closes {
            VertexLoop::new(path, LoopKind::Closed)
        } else if overflow.is_none() {
            // Stopped at a junction: pick up the rest of the path behind the start.
            path.reverse();
            overflow = extend(graph, start, &mut path, &mut visited, limit);
            open_loop(graph, path)
        } else {
            VertexLoop::new(path, LoopKind::Open)
        };

        for v in lp.vertices() {
            remaining.remove(v);
        }
        set.overflows.extend(overflow);
        set.loops.push(lp);
    }

    debug!(
        "loop builder: {} open and {} closed loops, {} overflows",
        set.num_open(),
        set.num_closed(),
        set.overflows.len()
    );

    set
}
