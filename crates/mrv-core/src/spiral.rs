//! Weak-perspective spiral projection.
//!
//! Renders an ordered collection as a pseudo-3-D spiral receding toward
//! the viewport center, a lightweight alternative to a real 3-D graphics
//! pipeline. Angle and radius grow linearly with record index; the
//! perspective divide shrinks later records toward the vanishing point.

use serde::{Deserialize, Serialize};

use crate::constants::{ANGLE_STEP, DEPTH_STEP, FOV, POINT_SIZE, RADIUS_STEP};
use crate::memory::Memory;

/// Drawable surface dimensions at render time.
///
/// Callers must pass the actual surface size, recomputed on resize, not
/// a fixed constant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One projected screen-space point with a back-reference to its source
/// record, for hit-testing and selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Point radius for drawing.
    pub size: f64,
    #[serde(rename = "sourceIndex")]
    pub source_index: usize,
}

/// Projection result: drawable points plus the indices of any records
/// dropped for producing a non-finite scale factor.
#[derive(Debug, Default)]
pub struct ProjectionOutcome {
    pub points: Vec<ProjectedPoint>,
    pub dropped: Vec<usize>,
}

/// Project an ordered memory sequence onto the viewport plane.
///
/// A pure function of input length/order and viewport: identical inputs
/// reproduce identical output. Coordinates depend only on the record
/// index, never on record contents. A record whose perspective divide
/// degenerates is reported in `dropped` instead of emitting NaN or
/// infinite coordinates.
pub fn project(memories: &[Memory], viewport: Viewport) -> ProjectionOutcome {
    let center_x = viewport.width / 2.0;
    let center_y = viewport.height / 2.0;

    let mut outcome = ProjectionOutcome::default();
    for i in 0..memories.len() {
        let fi = i as f64;
        let angle = fi * ANGLE_STEP;
        let radius = RADIUS_STEP * fi;
        let x3 = radius * angle.cos();
        let y3 = radius * angle.sin();
        let z3 = fi * DEPTH_STEP;

        let denom = FOV + z3;
        let scale = FOV / denom;
        if denom <= 0.0 || !scale.is_finite() {
            outcome.dropped.push(i);
            continue;
        }

        outcome.points.push(ProjectedPoint {
            x: center_x + x3 * scale,
            y: center_y + y3 * scale,
            size: POINT_SIZE * scale,
            source_index: i,
        });
    }

    outcome
}
