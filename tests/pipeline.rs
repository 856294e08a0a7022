//! End-to-end selection scenarios, including graphs supplied by a host through
//! the `MeshGraph` trait.

use std::io::Write;

use loopspan::algo::loops::is_terminal;
use loopspan::io;
use loopspan::prelude::*;
use nalgebra::Point3;

/// A host-side graph with explicit, possibly inconsistent, incidence lists.
struct ListGraph {
    positions: Vec<Point3<f64>>,
    selected: Vec<bool>,
    edges: Vec<[VertexId; 2]>,
    incident: Vec<Vec<EdgeId>>,
    editable: bool,
    commits: usize,
    fail_commit: bool,
}

impl ListGraph {
    fn new(positions: Vec<Point3<f64>>, edges: &[[usize; 2]], incident: Vec<Vec<usize>>) -> Self {
        let n = positions.len();
        Self {
            positions,
            selected: vec![true; n],
            edges: edges
                .iter()
                .map(|&[a, b]| [VertexId::new(a), VertexId::new(b)])
                .collect(),
            incident: incident
                .into_iter()
                .map(|list| list.into_iter().map(EdgeId::new).collect())
                .collect(),
            editable: true,
            commits: 0,
            fail_commit: false,
        }
    }

    /// A consistent graph: every edge is listed by both endpoints.
    fn consistent(positions: Vec<Point3<f64>>, edges: &[[usize; 2]]) -> Self {
        let mut incident = vec![Vec::new(); positions.len()];
        for (i, &[a, b]) in edges.iter().enumerate() {
            incident[a].push(i);
            incident[b].push(i);
        }
        Self::new(positions, edges, incident)
    }

    fn selected_indices(&self) -> Vec<usize> {
        (0..self.selected.len()).filter(|&i| self.selected[i]).collect()
    }
}

impl MeshGraph for ListGraph {
    fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn position(&self, v: VertexId) -> Point3<f64> {
        self.positions[v.index()]
    }

    fn is_selected(&self, v: VertexId) -> bool {
        self.selected[v.index()]
    }

    fn set_selected(&mut self, v: VertexId, selected: bool) {
        self.selected[v.index()] = selected;
    }

    fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.incident[v.index()]
    }

    fn edge_vertices(&self, e: EdgeId) -> [VertexId; 2] {
        self.edges[e.index()]
    }

    fn is_edge_selected(&self, _e: EdgeId) -> bool {
        true
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        if self.fail_commit {
            return Err(MeshError::invalid_param("commit", "rejected", "host refused the edit"));
        }
        Ok(())
    }
}

fn line(n: usize) -> Vec<Point3<f64>> {
    (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
}

fn chain_edges(n: usize) -> Vec<[usize; 2]> {
    (0..n - 1).map(|i| [i, i + 1]).collect()
}

#[test]
fn test_host_graph_matches_edge_mesh() {
    let mut host = ListGraph::consistent(line(12), &chain_edges(12));
    let mut mesh: EdgeMesh = build_from_edges(&line(12), &chain_edges(12)).unwrap();
    mesh.select_all();

    let options = SpacingOptions::default().with_edge_length(2.5);
    let a = select_spaced_vertices(&mut host, &options).unwrap();
    let b = select_spaced_vertices(&mut mesh, &options).unwrap();

    assert_eq!(a, b);
    let from_mesh: Vec<usize> = mesh.selected_vertices().iter().map(|v| v.index()).collect();
    assert_eq!(host.selected_indices(), from_mesh);
    assert_eq!(host.commits, 1);
}

#[test]
fn test_malformed_graph_overflow_is_recovered() {
    // 0-1-2 is a well-formed chain. Edge 3 (4-0) is listed by vertex 4 but
    // not by vertex 0, and vertex 3 lists edge 2 twice.
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(0.0, 5.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    ];
    let edges = [[0, 1], [1, 2], [3, 4], [4, 0]];
    let incident = vec![vec![0], vec![0, 1], vec![1], vec![2, 2], vec![2, 3]];
    let mut graph = ListGraph::new(positions, &edges, incident);

    let loops = build_loops(&graph);
    assert_eq!(loops.overflows().len(), 1);
    assert!(matches!(
        loops.overflows()[0],
        MeshError::LoopTraversalOverflow { start: 3, limit: 2 }
    ));

    let report = select_spaced_vertices(&mut graph, &SpacingOptions::default()).unwrap();
    assert_eq!(report.overflows, 1);
    assert_eq!(report.loops(), 2);
    // The well-formed chain is still processed.
    assert_eq!(graph.selected_indices(), vec![1]);
}

#[test]
fn test_not_editable_host_untouched() {
    let mut graph = ListGraph::consistent(line(6), &chain_edges(6));
    graph.editable = false;

    let report = select_spaced_vertices(&mut graph, &SpacingOptions::default()).unwrap();
    assert!(report.skipped);
    assert_eq!(graph.selected_indices(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(graph.commits, 0);
}

#[test]
fn test_commit_error_propagates() {
    let mut graph = ListGraph::consistent(line(6), &chain_edges(6));
    graph.fail_commit = true;

    let result = select_spaced_vertices(&mut graph, &SpacingOptions::default());
    assert!(matches!(result, Err(MeshError::InvalidParameter { name: "commit", .. })));
    assert_eq!(graph.commits, 1);
}

#[test]
fn test_junction_ends_chains() {
    // Two arms meeting at a degree-3 vertex 5, plus a stub 5-10.
    let mut positions = line(10);
    positions.push(Point3::new(5.0, 3.0, 0.0));
    let mut edges = chain_edges(10);
    edges.push([5, 10]);

    let mut mesh: EdgeMesh = build_from_edges(&positions, &edges).unwrap();
    mesh.select_all();

    // The junction is selected, so its neighbours are not terminals.
    assert!(!is_terminal(&mesh, VertexId::new(4)));
    assert!(!is_terminal(&mesh, VertexId::new(6)));

    // Every walk runs onto the junction and stops there.
    let loops = build_loops(&mesh);
    let found: Vec<Vec<usize>> = loops
        .iter()
        .map(|l| l.vertices().iter().map(|v| v.index()).collect())
        .collect();
    assert_eq!(
        found,
        vec![vec![0, 1, 2, 3, 4, 5], vec![5, 6, 7, 8, 9], vec![5, 10]]
    );

    let options = SpacingOptions::distance_only(100.0).with_exclude_endpoints(true);
    let report = select_spaced_vertices(&mut mesh, &options).unwrap();
    assert_eq!(report.open_loops, 3);
    assert_eq!(report.overflows, 0);
    let kept: Vec<usize> = mesh.selected_vertices().iter().map(|v| v.index()).collect();
    assert_eq!(kept, vec![1, 2, 3, 4, 6, 7, 8]);
}

#[test]
fn test_ply_round_trip_keeps_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.ply");

    let mut mesh: EdgeMesh = build_from_edges(&line(10), &chain_edges(10)).unwrap();
    mesh.select_all();
    select_spaced_vertices(&mut mesh, &SpacingOptions::default().with_edge_length(3.5)).unwrap();
    io::save(&mesh, &path).unwrap();

    let loaded: EdgeMesh = io::load(&path).unwrap();
    assert_eq!(loaded.num_vertices(), 10);
    assert_eq!(loaded.num_edges(), 9);
    assert_eq!(loaded.selected_vertices(), mesh.selected_vertices());
    for e in mesh.edge_ids() {
        assert_eq!(loaded.edge(e).selected, mesh.edge(e).selected);
    }
    for v in mesh.vertex_ids() {
        assert!((loaded.position(v) - mesh.position(v)).norm() < 1e-10);
    }
}

#[test]
fn test_obj_with_selection_file() {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("outline.obj");
    let sel_path = dir.path().join("picked.txt");

    let mut obj = std::fs::File::create(&obj_path).unwrap();
    for i in 0..8 {
        writeln!(obj, "v {} 0 0", i).unwrap();
    }
    writeln!(obj, "l 1 2 3 4 5 6 7 8").unwrap();
    drop(obj);
    std::fs::write(&sel_path, "0, 1, 2, 3, 4\n").unwrap();

    let mut mesh: EdgeMesh = io::load(&obj_path).unwrap();
    assert_eq!(mesh.num_selected(), 0);
    mesh.select_vertices(io::read_selection(&sel_path).unwrap()).unwrap();

    let report = select_spaced_vertices(&mut mesh, &SpacingOptions::default()).unwrap();
    assert_eq!(report.open_loops, 1);
    let kept: Vec<usize> = mesh.selected_vertices().iter().map(|v| v.index()).collect();
    assert_eq!(kept, vec![1, 2]);

    // OBJ cannot hold the result.
    assert!(matches!(
        io::save(&mesh, dir.path().join("out.obj")),
        Err(MeshError::SaveError { .. })
    ));
}
