//! Shared interpreter constants
//!
//! Rates are in mm/min, lengths in mm, matching the G21 default the
//! interpreter assumes throughout.

/// Implied traverse rate for rapid (G0) moves. Rapids never consult the
/// sticky feed word.
pub const RAPID_TRAVERSE_MM_MIN: f64 = 5000.0;

/// Fallback feed rate for cutting moves when no F word has been seen yet.
pub const FEED_FALLBACK_MM_MIN: f64 = 1500.0;

/// Default arc tessellation resolution: mm of radius per sub-segment.
pub const DEFAULT_ARC_TESSELLATION_MM: f64 = 0.05;

/// Minimum sub-segment count for any tessellated arc.
pub const MIN_ARC_STEPS: usize = 5;

/// S value that saturates the laser color ramp.
pub const INTENSITY_REFERENCE: f64 = 1000.0;
