//! Modal machine state tracking
//!
//! Modal values are persistent states that affect all subsequent lines
//! until changed by another word in the same group: a line carrying only
//! coordinates continues the previous motion mode, feed, and intensity.
//!
//! Each interpreter run owns exactly one [`MachineState`]; nothing is
//! shared between runs.

use gcodeplay_core::{constants, Position, Units};
use serde::{Deserialize, Serialize};

use crate::tokenizer::Words;

/// Motion mode - Group 1 (G0=rapid, G1=linear, G2=arc CW, G3=arc CCW)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionMode {
    /// Rapid positioning (G0)
    Rapid,
    /// Linear interpolation (G1)
    Linear,
    /// Clockwise arc (G2)
    ArcCw,
    /// Counter-clockwise arc (G3)
    ArcCcw,
}

impl MotionMode {
    /// Motion mode for a G word, if it selects one
    pub fn from_g(g: f64) -> Option<Self> {
        if g == 0.0 {
            Some(Self::Rapid)
        } else if g == 1.0 {
            Some(Self::Linear)
        } else if g == 2.0 {
            Some(Self::ArcCw)
        } else if g == 3.0 {
            Some(Self::ArcCcw)
        } else {
            None
        }
    }

    /// True for both arc directions
    pub fn is_arc(self) -> bool {
        matches!(self, Self::ArcCw | Self::ArcCcw)
    }

    /// Get a human-readable description of the motion mode
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rapid => "Rapid positioning (G0)",
            Self::Linear => "Linear interpolation (G1)",
            Self::ArcCw => "Clockwise arc (G2)",
            Self::ArcCcw => "Counter-clockwise arc (G3)",
        }
    }
}

/// Distance mode - Group 3 (G90=absolute, G91=incremental)
///
/// The mode switch is tracked so hosts can surface it, but target
/// computation is always absolute: incremental math is intentionally
/// not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Absolute positioning (G90)
    Absolute,
    /// Incremental positioning (G91) - detected, not applied
    Incremental,
}

/// Sticky modal values carried across lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// Active motion mode
    pub motion: MotionMode,
    /// Feed rate in mm/min; 0.0 means no F word seen yet and the
    /// mode-specific fallback applies
    pub feed: f64,
    /// Laser/spindle S value; > 0.0 classifies feed moves as laser
    pub intensity: f64,
    /// Units mode (G20/G21); tracked, no conversion applied
    pub units: Units,
    /// Distance mode (G90/G91); tracked, always treated as absolute
    pub distance: DistanceMode,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            motion: MotionMode::Linear, // G1, matching controller power-on defaults we target
            feed: 0.0,
            intensity: 0.0,
            units: Units::Mm,
            distance: DistanceMode::Absolute,
        }
    }
}

/// Full per-run machine state: position, G92 offset, and modal values
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    /// Current machine position, updated after every executed motion
    pub position: Position,
    /// Accumulated G92 translation; persists until redefined
    pub offset: Position,
    /// Sticky modal values
    pub modal: ModalState,
}

impl MachineState {
    /// Create the state a run starts from: origin, no offset, defaults
    pub fn new() -> Self {
        Self {
            position: Position::ORIGIN,
            offset: Position::ORIGIN,
            modal: ModalState::default(),
        }
    }

    /// Fold one line's words into the modal state.
    ///
    /// Returns the intensity that was current before any S word on this
    /// line applied; the laser color gradient starts from it.
    pub fn apply_modals(&mut self, words: &Words) -> f64 {
        let intensity_before = self.modal.intensity;

        if let Some(g) = words.get('G') {
            if let Some(mode) = MotionMode::from_g(g) {
                self.modal.motion = mode;
            } else if g == 20.0 {
                self.modal.units = Units::Inch;
            } else if g == 21.0 {
                self.modal.units = Units::Mm;
            } else if g == 90.0 {
                self.modal.distance = DistanceMode::Absolute;
            } else if g == 91.0 {
                self.modal.distance = DistanceMode::Incremental;
            }
        }
        if let Some(feed) = words.get('F') {
            self.modal.feed = feed;
        }
        if let Some(intensity) = words.get('S') {
            self.modal.intensity = intensity;
        }

        intensity_before
    }

    /// True when the line is a G92 set-position command
    pub fn is_set_position(words: &Words) -> bool {
        words.get('G') == Some(92.0)
    }

    /// Apply a G92 line: shift the logical coordinate system so the
    /// current physical position reads as the commanded value. Produces
    /// no motion.
    pub fn apply_set_position(&mut self, words: &Words) {
        if let Some(x) = words.get('X') {
            self.offset.x = self.position.x - x;
        }
        if let Some(y) = words.get('Y') {
            self.offset.y = self.position.y - y;
        }
        if let Some(z) = words.get('Z') {
            self.offset.z = self.position.z - z;
        }
    }

    /// Absolute target for a motion line. Axes the line specifies get
    /// the G92 offset applied; unspecified axes hold their position.
    pub fn target(&self, words: &Words) -> Position {
        Position {
            x: words.get('X').map_or(self.position.x, |x| x + self.offset.x),
            y: words.get('Y').map_or(self.position.y, |y| y + self.offset.y),
            z: words.get('Z').map_or(self.position.z, |z| z + self.offset.z),
        }
    }

    /// Effective feed for cutting moves: the sticky F value when set,
    /// otherwise the fixed fallback rate
    pub fn effective_feed(&self) -> f64 {
        if self.modal.feed > 0.0 {
            self.modal.feed
        } else {
            constants::FEED_FALLBACK_MM_MIN
        }
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_motion_mode_is_sticky() {
        let mut state = MachineState::new();
        state.apply_modals(&tokenize("G0 X10"));
        assert_eq!(state.modal.motion, MotionMode::Rapid);

        // Coordinate-only line keeps the previous mode.
        state.apply_modals(&tokenize("X20 Y5"));
        assert_eq!(state.modal.motion, MotionMode::Rapid);

        state.apply_modals(&tokenize("G2 X0 I5"));
        assert!(state.modal.motion.is_arc());
    }

    #[test]
    fn test_feed_and_intensity_are_sticky() {
        let mut state = MachineState::new();
        state.apply_modals(&tokenize("G1 F600 S300"));
        state.apply_modals(&tokenize("X10"));
        assert_eq!(state.modal.feed, 600.0);
        assert_eq!(state.modal.intensity, 300.0);
    }

    #[test]
    fn test_apply_modals_reports_previous_intensity() {
        let mut state = MachineState::new();
        state.apply_modals(&tokenize("S100"));
        let before = state.apply_modals(&tokenize("G1 X5 S700"));
        assert_eq!(before, 100.0);
        assert_eq!(state.modal.intensity, 700.0);
    }

    #[test]
    fn test_g92_offsets_targets() {
        let mut state = MachineState::new();
        state.position = Position::new(10.0, 10.0, 0.0);
        state.apply_set_position(&tokenize("G92 X0 Y0"));
        assert_eq!(state.offset, Position::new(10.0, 10.0, 0.0));

        // Logical zero now maps back to the pre-offset position.
        let target = state.target(&tokenize("G1 X0 Y0"));
        assert_eq!(target, Position::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn test_g92_only_touches_present_axes() {
        let mut state = MachineState::new();
        state.position = Position::new(5.0, 6.0, 7.0);
        state.apply_set_position(&tokenize("G92 Z0"));
        assert_eq!(state.offset, Position::new(0.0, 0.0, 7.0));
    }

    #[test]
    fn test_unspecified_axes_hold_position() {
        let mut state = MachineState::new();
        state.position = Position::new(1.0, 2.0, 3.0);
        let target = state.target(&tokenize("G1 Y9"));
        assert_eq!(target, Position::new(1.0, 9.0, 3.0));
    }

    #[test]
    fn test_units_and_distance_mode_detected() {
        let mut state = MachineState::new();
        state.apply_modals(&tokenize("G20"));
        assert_eq!(state.modal.units, Units::Inch);
        state.apply_modals(&tokenize("G91"));
        assert_eq!(state.modal.distance, DistanceMode::Incremental);
        // Targets stay absolute even in G91.
        state.position = Position::new(10.0, 0.0, 0.0);
        let target = state.target(&tokenize("X5"));
        assert_eq!(target.x, 5.0);
    }

    #[test]
    fn test_effective_feed_fallback() {
        let mut state = MachineState::new();
        assert_eq!(state.effective_feed(), constants::FEED_FALLBACK_MM_MIN);
        state.apply_modals(&tokenize("F250"));
        assert_eq!(state.effective_feed(), 250.0);
        // F0 reads as "unset" again.
        state.apply_modals(&tokenize("F0"));
        assert_eq!(state.effective_feed(), constants::FEED_FALLBACK_MM_MIN);
    }
}
