//! Motion segments and color classification
//!
//! The segment list is the interpreter's primary output: one entry per
//! renderable straight sub-move, tagged so the host can map it to a
//! rendering style and scrub it on a playback timeline.

use gcodeplay_core::{constants, Position};
use serde::{Deserialize, Serialize};

/// RGB color with channels in [0, 1], the form GPU line renderers take
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a color from raw channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a 24-bit hex value (e.g. `0xAAAAAA`)
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }
}

/// Gray used for rapid (G0) traverses
pub const TRAVEL_COLOR: Color = Color::from_hex(0xAAAAAA);
/// Blue used for feed moves with the laser off
pub const CUT_COLOR: Color = Color::from_hex(0x0000FF);
/// Green used for tessellated arc sub-segments
pub const ARC_COLOR: Color = Color::from_hex(0x00FF00);

/// Map a raw S value onto the laser ramp.
///
/// The value is normalized against the reference intensity and clamped
/// to [0, 1]; the ramp runs from dim red at zero to full red at the
/// reference, saturating above it.
pub fn laser_color(intensity: f64) -> Color {
    let t = (intensity / constants::INTENSITY_REFERENCE).clamp(0.0, 1.0) as f32;
    Color::new(0.5 + 0.5 * t, 0.0, 0.0)
}

/// Classification of one motion segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SegmentKind {
    /// Rapid (G0) positioning move
    Travel,
    /// Feed move with the laser off
    Cut,
    /// Feed move with the laser on
    Laser {
        /// S value in effect at the end of the move
        intensity: f64,
    },
    /// One straight sub-segment of a tessellated G2/G3 arc
    Arc,
}

impl SegmentKind {
    /// True for laser-classified segments
    pub fn is_laser(&self) -> bool {
        matches!(self, Self::Laser { .. })
    }
}

/// One renderable, timeable straight sub-move.
///
/// Segments are append-only and immutable once pushed; `start_time` is
/// filled in by the timeline pass after the whole program has been
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSegment {
    /// Where the move starts
    pub start: Position,
    /// Where the move ends
    pub end: Position,
    /// Classification tag, with mode-specific fields
    #[serde(flatten)]
    pub kind: SegmentKind,
    /// Color at the start point
    pub start_color: Color,
    /// Color at the end point; equal to `start_color` except for laser
    /// gradients
    pub end_color: Color,
    /// Euclidean length in mm
    pub distance: f64,
    /// Traverse time in seconds
    pub duration: f64,
    /// 0-based source line this segment came from
    pub line_index: usize,
    /// Seconds from program start, non-decreasing in list order
    pub start_time: f64,
}
