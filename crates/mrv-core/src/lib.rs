//! Memory replay pipeline: normalization, filtering, and spiral projection.
//!
//! Converts heterogeneous raw replay records into canonical [`Memory`]
//! values, selects subsets by keyword and time range, and projects an
//! ordered collection onto a 2-D plane with a weak-perspective transform
//! for lightweight visualization.
//!
//! Zero I/O: pure data transforms with no opinions about transport or
//! rendering.

pub mod buffer;
pub mod constants;
pub mod filter;
pub mod memory;
pub mod normalize;
pub mod spiral;
pub mod time;

pub use buffer::ReplayBuffer;
pub use constants::{
    ANGLE_STEP, DEPTH_STEP, FOV, NO_CONTENT, POINT_SIZE, RADIUS_STEP, REPLAY_CAPACITY,
};
pub use filter::{FilterSpec, filter_memories};
pub use memory::{Memory, MemoryId, Timestamp};
pub use normalize::{NormalizeOutcome, RawRecord, RejectReason, RejectedRecord, normalize};
pub use spiral::{ProjectedPoint, ProjectionOutcome, Viewport, project};
