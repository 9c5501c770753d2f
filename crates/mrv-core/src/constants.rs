/// Angular step per record, in radians. Governs spiral tightness.
pub const ANGLE_STEP: f64 = 0.3;

/// Radial growth per record, in scene units. Linear, not logarithmic,
/// despite the visual spiral appearance.
pub const RADIUS_STEP: f64 = 5.0;

/// Depth step per record along the view axis, independent of angle/radius.
pub const DEPTH_STEP: f64 = 5.0;

/// Field-of-view constant for the weak-perspective divide.
pub const FOV: f64 = 300.0;

/// Base point radius at zero depth, in pixels.
pub const POINT_SIZE: f64 = 4.0;

/// Placeholder content for records carrying neither tokens nor text.
pub const NO_CONTENT: &str = "(no content)";

/// Replay buffer capacity: most recent payloads kept for the viewer.
pub const REPLAY_CAPACITY: usize = 50;
