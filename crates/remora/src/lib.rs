#![forbid(unsafe_code)]

//! Edge geometry for node-graph diagram renderers.
//!
//! Given two node anchors, a curve kind and the target node's box, the engine
//! computes the visible edge path, the point where it crosses the node
//! boundary, an arrowhead pose, a label anchor, and fan-out offsets for
//! parallel edges. Every entry point is a pure function of its arguments and
//! always produces a result; bad geometry degrades to a nearest-side
//! approximation instead of an error.
//!
//! Hosts with a DOM can inject their native path measurement through
//! [`measure::PathMeasurer`]; the bundled [`measure::FlattenedPathMeasurer`]
//! provides the same contract headlessly.

pub mod boundary;
pub mod curve;
mod fanout;
mod label;
pub mod measure;
pub mod model;
mod pathd;
mod planner;
pub mod rect;
pub mod text;

pub use curve::CubicBezier;
pub use model::{
    ArrowheadPose, BoundaryIntersection, CurveKind, EdgeGeometryResult, EdgeSpec, ParallelEdges,
    Point, Side, Vec2,
};
pub use rect::NodeRect;

use crate::measure::{FlattenedPathMeasurer, PathMeasurer};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use std::sync::Arc;

/// Presentation constants, tuned against the rendered stroke/shadow
/// thickness of the editor's node shapes. They are deliberately not derived
/// from geometry; change them only to match a different visual theme.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Arrowhead back-off along the incoming tangent, per entry side.
    pub offset_top: f64,
    pub offset_bottom: f64,
    pub offset_left: f64,
    pub offset_right: f64,
    /// Perpendicular control-point shift per fan-out slot for curved edges.
    pub bend_amount: f64,
    /// Perpendicular label shift per fan-out slot for step/straight edges.
    pub label_fan_spacing: f64,
    /// Wrap the label once its widest line exceeds this share of the path's
    /// horizontal extent.
    pub wrap_width_ratio: f64,
    /// Minimum control-point reach for curved edges.
    pub min_control_distance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            offset_top: 2.0,
            offset_bottom: -1.5,
            offset_left: 4.0,
            offset_right: 4.0,
            bend_amount: 50.0,
            label_fan_spacing: 25.0,
            wrap_width_ratio: 0.30,
            min_control_distance: 50.0,
        }
    }
}

impl Tuning {
    pub fn side_offset(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.offset_top,
            Side::Bottom => self.offset_bottom,
            Side::Left => self.offset_left,
            Side::Right => self.offset_right,
        }
    }
}

#[derive(Clone)]
pub struct PlanOptions {
    pub path_measurer: Arc<dyn PathMeasurer + Send + Sync>,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub text_style: TextStyle,
    pub tuning: Tuning,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            path_measurer: Arc::new(FlattenedPathMeasurer::default()),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            text_style: TextStyle::default(),
            tuning: Tuning::default(),
        }
    }
}

/// Compute the full geometry for one edge.
///
/// Deterministic in its inputs and total: repeated calls return bit-identical
/// results, and no input can make it fail.
pub fn plan_edge_geometry(spec: &EdgeSpec, options: &PlanOptions) -> EdgeGeometryResult {
    planner::plan(spec, options)
}
