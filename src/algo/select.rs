//! Spaced vertex selection along edge loops.
//!
//! [`select_spaced_vertices`] runs the whole pipeline on a [`MeshGraph`]:
//!
//! 1. reconstruct the loops formed by the selected vertices ([`build_loops`]);
//! 2. clear the vertex selection and re-select, loop by loop, the vertices
//!    that fit the distance and turning-angle budgets ([`segment_loop`]);
//! 3. drop selected corners sharper than the deselect angle
//!    ([`deselect_sharp_vertices`]);
//! 4. write the new flags back and [`commit`](MeshGraph::commit).
//!
//! All intermediate state lives in a per-call selection buffer, so the graph
//! only sees the final flags. Edge selection is never modified.
//!
//! # Example
//!
//! ```
//! use loopspan::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions: Vec<_> = (0..10).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
//! let line: Vec<usize> = (0..10).collect();
//! let mut mesh: EdgeMesh = build_from_polylines(&positions, &[line]).unwrap();
//! mesh.select_all();
//!
//! let options = SpacingOptions::default().with_edge_length(3.5);
//! let report = select_spaced_vertices(&mut mesh, &options).unwrap();
//!
//! let kept: Vec<usize> = mesh.selected_vertices().iter().map(|v| v.index()).collect();
//! assert_eq!(kept, vec![1, 2, 3, 5, 6, 7]);
//! assert_eq!(report.selected, 6);
//! ```

use std::fmt;

use log::debug;

use super::angle::deselect_sharp_vertices;
use super::loops::build_loops;
use super::segment::{segment_loops, SegmentBudget};
use crate::error::{MeshError, Result};
use crate::mesh::{MeshGraph, MeshIndex, VertexId};

/// Smallest accepted distance budget.
pub const MIN_EDGE_LENGTH: f64 = 0.0001;

/// Options for [`select_spaced_vertices`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingOptions {
    /// Cumulative distance after which a loop vertex breaks the run.
    pub edge_length: f64,

    /// Cumulative turning angle (degrees) after which a loop vertex breaks
    /// the run. `None` disables the angle budget.
    pub gradual_angle: Option<f64>,

    /// Selected two-edge vertices with an interior angle (degrees) below
    /// this are deselected at the end. `None` disables the filter.
    pub deselect_angle: Option<f64>,

    /// Whether the first and last vertex of every loop end up unselected.
    pub exclude_endpoints: bool,
}

impl Default for SpacingOptions {
    fn default() -> Self {
        Self {
            edge_length: 3.0,
            gradual_angle: Some(110.0),
            deselect_angle: Some(110.0),
            exclude_endpoints: true,
        }
    }
}

impl SpacingOptions {
    /// Distance budget only: no angle budget, no corner filter, loop
    /// endpoints not forced off.
    pub fn distance_only(edge_length: f64) -> Self {
        Self {
            edge_length,
            gradual_angle: None,
            deselect_angle: None,
            exclude_endpoints: false,
        }
    }

    /// Set the distance budget.
    pub fn with_edge_length(mut self, edge_length: f64) -> Self {
        self.edge_length = edge_length;
        self
    }

    /// Set the turning-angle budget in degrees.
    pub fn with_gradual_angle(mut self, degrees: f64) -> Self {
        self.gradual_angle = Some(degrees);
        self
    }

    /// Disable the turning-angle budget.
    pub fn without_gradual_angle(mut self) -> Self {
        self.gradual_angle = None;
        self
    }

    /// Set the corner filter threshold in degrees.
    pub fn with_deselect_angle(mut self, degrees: f64) -> Self {
        self.deselect_angle = Some(degrees);
        self
    }

    /// Disable the corner filter.
    pub fn without_deselect_angle(mut self) -> Self {
        self.deselect_angle = None;
        self
    }

    /// Set whether loop endpoints are forced unselected.
    pub fn with_exclude_endpoints(mut self, exclude: bool) -> Self {
        self.exclude_endpoints = exclude;
        self
    }

    /// Check the values against the ranges a host should enforce.
    ///
    /// The pipeline itself accepts any value; this is for callers taking
    /// options from user input.
    pub fn validate(&self) -> Result<()> {
        if !self.edge_length.is_finite() || self.edge_length < MIN_EDGE_LENGTH {
            return Err(MeshError::invalid_param(
                "edge_length",
                self.edge_length,
                "must be finite and at least 0.0001",
            ));
        }
        if let Some(angle) = self.gradual_angle {
            if angle.is_nan() || angle < 0.0 {
                return Err(MeshError::invalid_param(
                    "gradual_angle",
                    angle,
                    "must be non-negative",
                ));
            }
        }
        if let Some(angle) = self.deselect_angle {
            if !(0.0..360.0).contains(&angle) {
                return Err(MeshError::invalid_param(
                    "deselect_angle",
                    angle,
                    "must be in [0, 360)",
                ));
            }
        }
        Ok(())
    }

    fn budget(&self) -> SegmentBudget {
        SegmentBudget {
            edge_length: self.edge_length,
            gradual_angle: self.gradual_angle,
            exclude_endpoints: self.exclude_endpoints,
        }
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// The graph was not editable; nothing was changed.
    pub skipped: bool,
    /// Open loops reconstructed.
    pub open_loops: usize,
    /// Closed loops reconstructed.
    pub closed_loops: usize,
    /// Loops truncated by the traversal cap.
    pub overflows: usize,
    /// Vertices kept by the distance/angle budgets.
    pub segmented: usize,
    /// Vertices removed by the corner filter.
    pub angle_deselected: usize,
    /// Vertices selected after the run.
    pub selected: usize,
}

impl SelectionReport {
    /// Total number of loops.
    pub fn loops(&self) -> usize {
        self.open_loops + self.closed_loops
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped {
            return write!(f, "skipped (mesh not editable)");
        }
        write!(
            f,
            "{} loops ({} open, {} closed), {} vertices selected ({} kept by spacing, {} removed by angle)",
            self.loops(),
            self.open_loops,
            self.closed_loops,
            self.selected,
            self.segmented,
            self.angle_deselected
        )?;
        if self.overflows > 0 {
            write!(f, ", {} loops truncated", self.overflows)?;
        }
        Ok(())
    }
}

/// Re-select the vertices of the selected edge loops that fit the spacing
/// budgets, then prune sharp corners.
///
/// Returns `Ok` with a skipped report, without touching the graph, if the
/// graph is not editable. The only error is one returned by
/// [`MeshGraph::commit`]; traversal overflows on malformed selections are
/// recovered and counted in the report.
pub fn select_spaced_vertices<I, G>(graph: &mut G, options: &SpacingOptions) -> Result<SelectionReport>
where
    I: MeshIndex,
    G: MeshGraph<I> + ?Sized,
{
    if !graph.is_editable() {
        debug!("selection skipped: mesh is not editable");
        return Ok(SelectionReport {
            skipped: true,
            ..Default::default()
        });
    }

    let loops = build_loops(&*graph);

    let mut selection = vec![false; graph.num_vertices()];
    let segmented = segment_loops(&*graph, &loops, &options.budget(), &mut selection);

    let angle_deselected = match options.deselect_angle {
        Some(angle) => deselect_sharp_vertices(&*graph, &mut selection, angle),
        None => 0,
    };

    for (i, &selected) in selection.iter().enumerate() {
        graph.set_selected(VertexId::new(i), selected);
    }
    graph.commit()?;

    let report = SelectionReport {
        skipped: false,
        open_loops: loops.num_open(),
        closed_loops: loops.num_closed(),
        overflows: loops.overflows().len(),
        segmented,
        angle_deselected,
        selected: selection.iter().filter(|&&s| s).count(),
    };
    debug!("selection: {}", report);
    Ok(report)
}
