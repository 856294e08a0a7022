//! Distance and turning-angle budgets along a loop.
//!
//! Walking a loop from its first vertex, two running totals are kept: the
//! length travelled and the sum of turning angles passed. A vertex stays
//! selected while both totals are strictly below their budgets. The vertex at
//! which either budget is reached or exceeded is left unselected and both
//! totals restart from zero there, so the loop is cut into runs no longer than
//! the distance budget.
//!
//! With a straight chain of unit edges and a budget of 3.5, vertices
//! `1, 2, 3` are kept, `4` breaks, `5, 6, 7` are kept, `8` breaks, and so on.

use log::trace;

use super::angle::turning_angle;
use super::loops::VertexLoop;
use crate::mesh::{MeshGraph, MeshIndex};

/// Budgets for [`segment_loop`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentBudget {
    /// Cumulative distance budget.
    pub edge_length: f64,

    /// Cumulative turning-angle budget in degrees; `None` disables it.
    pub gradual_angle: Option<f64>,

    /// Whether the first and last loop vertices are forced unselected.
    pub exclude_endpoints: bool,
}

/// Apply the distance/angle budgets to one loop.
///
/// `selection` holds one flag per mesh vertex and receives the decision for
/// every loop vertex after the first. The first vertex is only written when
/// endpoints are excluded. Returns the number of loop vertices left selected.
pub fn segment_loop<I, G>(
    graph: &G,
    lp: &VertexLoop<I>,
    budget: &SegmentBudget,
    selection: &mut [bool],
) -> usize
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    let vertices = lp.vertices();
    let Some(&first) = vertices.first() else {
        return 0;
    };

    let mut cum_length = 0.0;
    let mut cum_angle = 0.0;
    let mut prev = graph.position(first);

    for (i, &v) in vertices.iter().enumerate().skip(1) {
        let pos = graph.position(v);
        cum_length += (pos - prev).norm();

        if budget.gradual_angle.is_some() {
            if let Some(next) = lp.successor(i) {
                cum_angle += turning_angle(&prev, &pos, &graph.position(next));
            }
        }

        let angle_ok = budget.gradual_angle.map_or(true, |limit| cum_angle < limit);
        if cum_length < budget.edge_length && angle_ok {
            selection[v.index()] = true;
        } else {
            trace!(
                "segment break at {:?} (length {:.4}, angle {:.2})",
                v,
                cum_length,
                cum_angle
            );
            selection[v.index()] = false;
            cum_length = 0.0;
            cum_angle = 0.0;
        }

        prev = pos;
    }

    if budget.exclude_endpoints {
        selection[first.index()] = false;
        if let Some(last) = lp.last() {
            selection[last.index()] = false;
        }
    }

    vertices.iter().filter(|v| selection[v.index()]).count()
}

/// Apply [`segment_loop`] to every loop in turn. Returns the number of loop
/// vertices left selected.
pub fn segment_loops<'a, I, G, L>(
    graph: &G,
    loops: L,
    budget: &SegmentBudget,
    selection: &mut [bool],
) -> usize
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
    L: IntoIterator<Item = &'a VertexLoop<I>>,
{
    loops
        .into_iter()
        .map(|lp| segment_loop(graph, lp, budget, selection))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::loops::LoopKind;
    use crate::mesh::{build_from_polylines, EdgeMesh, VertexId};
    use nalgebra::Point3;

    fn chain(positions: Vec<Point3<f64>>) -> (EdgeMesh, VertexLoop) {
        let line: Vec<usize> = (0..positions.len()).collect();
        let mesh: EdgeMesh = build_from_polylines(&positions, &[line.clone()]).unwrap();
        let lp = VertexLoop::new(line.into_iter().map(VertexId::new).collect(), LoopKind::Open);
        (mesh, lp)
    }

    fn straight(n: usize, spacing: f64) -> (EdgeMesh, VertexLoop) {
        chain((0..n).map(|i| Point3::new(i as f64 * spacing, 0.0, 0.0)).collect())
    }

    fn selected_indices(selection: &[bool]) -> Vec<usize> {
        selection
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }

    fn distance_budget(edge_length: f64) -> SegmentBudget {
        SegmentBudget {
            edge_length,
            gradual_angle: None,
            exclude_endpoints: true,
        }
    }

    #[test]
    fn test_straight_chain_spacing() {
        let (mesh, lp) = straight(10, 1.0);
        let mut selection = vec![false; 10];
        let kept = segment_loop(&mesh, &lp, &distance_budget(3.5), &mut selection);

        assert_eq!(selected_indices(&selection), vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(kept, 6);
    }

    #[test]
    fn test_exact_budget_breaks() {
        // The third vertex reaches exactly 2.0.
        let (mesh, lp) = straight(6, 1.0);
        let mut selection = vec![false; 6];
        segment_loop(&mesh, &lp, &distance_budget(2.0), &mut selection);
        assert_eq!(selected_indices(&selection), vec![1, 3]);
    }

    #[test]
    fn test_endpoints_kept_when_not_excluded() {
        let (mesh, lp) = straight(4, 1.0);
        let mut selection = vec![false; 4];
        let budget = SegmentBudget {
            exclude_endpoints: false,
            ..distance_budget(10.0)
        };
        segment_loop(&mesh, &lp, &budget, &mut selection);
        // The first vertex is never decided by the sweep.
        assert_eq!(selected_indices(&selection), vec![1, 2, 3]);
    }

    #[test]
    fn test_previous_selection_overwritten() {
        let (mesh, lp) = straight(10, 1.0);
        let mut selection = vec![true; 10];
        segment_loop(&mesh, &lp, &distance_budget(3.5), &mut selection);
        assert_eq!(selected_indices(&selection), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_gradual_angle_breaks_on_turns() {
        // A staircase: every interior vertex turns by 90 degrees.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
        ];
        let (mesh, lp) = chain(positions);
        let budget = SegmentBudget {
            edge_length: 100.0,
            gradual_angle: Some(100.0),
            exclude_endpoints: true,
        };
        let mut selection = vec![false; 6];
        segment_loop(&mesh, &lp, &budget, &mut selection);

        // 90 kept, 180 breaks, then 90 kept again, 180 breaks.
        assert_eq!(selected_indices(&selection), vec![1, 3]);
    }

    #[test]
    fn test_turn_equal_to_angle_budget_breaks() {
        // One right-angle corner at vertex 1.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        ];
        let (mesh, lp) = chain(positions);
        let budget = SegmentBudget {
            edge_length: 100.0,
            gradual_angle: Some(90.0),
            exclude_endpoints: true,
        };
        let mut selection = vec![false; 4];
        segment_loop(&mesh, &lp, &budget, &mut selection);
        assert_eq!(selected_indices(&selection), vec![2]);

        let budget = SegmentBudget {
            gradual_angle: Some(90.5),
            ..budget
        };
        let mut selection = vec![false; 4];
        segment_loop(&mesh, &lp, &budget, &mut selection);
        assert_eq!(selected_indices(&selection), vec![1, 2]);
    }

    #[test]
    fn test_disabled_angle_ignores_turns() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let (mesh, lp) = chain(positions);
        let mut selection = vec![false; 5];
        segment_loop(&mesh, &lp, &distance_budget(100.0), &mut selection);
        assert_eq!(selected_indices(&selection), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_vertex_loop() {
        let (mesh, _) = straight(3, 1.0);
        let lp = VertexLoop::new(vec![VertexId::new(1)], LoopKind::Open);
        let mut selection = vec![true; 3];
        let kept = segment_loop(&mesh, &lp, &distance_budget(3.0), &mut selection);
        assert_eq!(kept, 0);
        assert_eq!(selection, vec![true, false, true]);
    }

    #[test]
    fn test_empty_loop() {
        let (mesh, _) = straight(2, 1.0);
        let lp = VertexLoop::new(Vec::new(), LoopKind::Open);
        let mut selection = vec![true; 2];
        assert_eq!(segment_loop(&mesh, &lp, &distance_budget(3.0), &mut selection), 0);
        assert_eq!(selection, vec![true, true]);
    }

    #[test]
    fn test_segment_loops_sums() {
        let (mesh, _) = straight(10, 1.0);
        let a = VertexLoop::new((0..5).map(VertexId::new).collect(), LoopKind::Open);
        let b = VertexLoop::new((5..10).map(VertexId::new).collect(), LoopKind::Open);
        let mut selection = vec![false; 10];
        let kept = segment_loops(&mesh, [&a, &b], &distance_budget(10.0), &mut selection);
        assert_eq!(kept, 6);
        assert_eq!(selected_indices(&selection), vec![1, 2, 3, 6, 7, 8]);
    }
}
