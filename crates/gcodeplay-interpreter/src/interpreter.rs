//! Program interpretation and timeline assembly
//!
//! Drives one full run: every line flows tokenizer -> modal state ->
//! segment generator, then a single forward pass assigns each segment
//! its cumulative start time. A run is synchronous, owns all of its
//! state, and never fails; malformed input degrades to "no segment" or
//! a diagnostic.

use gcodeplay_core::{constants, GcodeError, Position, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::diagnostics::Diagnostic;
use crate::segment::{self, laser_color, MotionSegment, SegmentKind};
use crate::state::{MachineState, MotionMode};
use crate::tokenizer;

/// Summary counters for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgramStats {
    /// Number of source lines in the program text
    pub line_count: usize,
    /// Number of motion segments emitted; always equals the segment
    /// list length
    pub segment_count: usize,
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretResult {
    /// Motion segments in emission order, timeline already assigned
    pub segments: Vec<MotionSegment>,
    /// Per-line validation failures, in source order
    pub diagnostics: Vec<Diagnostic>,
    /// Summary counters
    pub stats: ProgramStats,
}

/// G-code playback interpreter.
///
/// Holds configuration only; each [`interpret`](Interpreter::interpret)
/// call owns its machine state, so independent runs may execute in
/// parallel on independent inputs with no synchronization.
#[derive(Debug, Clone)]
pub struct Interpreter {
    tessellation_mm: f64,
}

impl Interpreter {
    /// Create an interpreter with the default arc tessellation
    /// resolution (0.05 mm of radius per sub-segment)
    pub fn new() -> Self {
        Self {
            tessellation_mm: constants::DEFAULT_ARC_TESSELLATION_MM,
        }
    }

    /// Create an interpreter with a custom tessellation resolution.
    ///
    /// Smaller values produce more sub-segments for a given arc radius.
    /// Rejects non-positive and non-finite values.
    pub fn with_tessellation(tessellation_mm: f64) -> Result<Self> {
        if !tessellation_mm.is_finite() || tessellation_mm <= 0.0 {
            return Err(GcodeError::InvalidTessellation {
                value: tessellation_mm,
            });
        }
        Ok(Self { tessellation_mm })
    }

    /// Active tessellation resolution in mm
    pub fn tessellation(&self) -> f64 {
        self.tessellation_mm
    }

    /// Interpret a full program text.
    ///
    /// Never fails: the worst outcome for a bad line is "no segment" or
    /// one diagnostic, and the result always carries both lists plus
    /// the stats summary. Runs are deterministic; identical input and
    /// resolution yield identical output.
    pub fn interpret(&self, program: &str) -> InterpretResult {
        debug!(bytes = program.len(), "starting g-code interpretation");

        let mut run = Run {
            state: MachineState::new(),
            segments: Vec::new(),
            diagnostics: Vec::new(),
            tessellation_mm: self.tessellation_mm,
        };

        let mut line_count = 0;
        for (index, line) in program.lines().enumerate() {
            line_count = index + 1;
            run.execute_line(index, line);
        }
        run.finalize_timeline();

        let stats = ProgramStats {
            line_count,
            segment_count: run.segments.len(),
        };
        debug!(
            lines = stats.line_count,
            segments = stats.segment_count,
            diagnostics = run.diagnostics.len(),
            "interpretation complete"
        );

        InterpretResult {
            segments: run.segments,
            diagnostics: run.diagnostics,
            stats,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state of one in-flight run
struct Run {
    state: MachineState,
    segments: Vec<MotionSegment>,
    diagnostics: Vec<Diagnostic>,
    tessellation_mm: f64,
}

impl Run {
    /// Apply one source line: modal updates, then offset definition or
    /// motion segment emission
    fn execute_line(&mut self, index: usize, raw: &str) {
        let words = tokenizer::tokenize(raw);
        if words.is_empty() {
            return;
        }

        let intensity_before = self.state.apply_modals(&words);

        if MachineState::is_set_position(&words) {
            self.state.apply_set_position(&words);
            trace!(line = index, offset = %self.state.offset, "set-position offset updated");
            return;
        }

        // Arc lines must name a center offset or radius before a target
        // is even computed; position holds as if no motion occurred.
        if self.state.modal.motion.is_arc()
            && !words.has('I')
            && !words.has('J')
            && !words.has('R')
        {
            let error = GcodeError::MissingArcParameters { line_index: index };
            trace!(line = index, %error, "arc validation failed");
            self.diagnostics.push(Diagnostic::from_error(&error));
            return;
        }

        let target = self.state.target(&words);
        match self.state.modal.motion {
            MotionMode::Rapid => self.emit_rapid(index, target),
            MotionMode::Linear => self.emit_linear(index, target, intensity_before),
            MotionMode::ArcCw | MotionMode::ArcCcw => self.emit_arc(index, target, &words),
        }

        // The exact commanded target, not the last tessellated point,
        // becomes the new position so arcs do not compound float error.
        self.state.position = target;
    }

    /// Emit the single travel segment for a rapid move
    fn emit_rapid(&mut self, index: usize, target: Position) {
        let start = self.state.position;
        let distance = start.distance_to(&target);
        self.segments.push(MotionSegment {
            start,
            end: target,
            kind: SegmentKind::Travel,
            start_color: segment::TRAVEL_COLOR,
            end_color: segment::TRAVEL_COLOR,
            distance,
            duration: traverse_seconds(distance, constants::RAPID_TRAVERSE_MM_MIN),
            line_index: index,
            start_time: 0.0,
        });
    }

    /// Emit the single cut or laser segment for a linear feed move.
    ///
    /// Classification uses the intensity after this line's S word; the
    /// laser gradient runs from the pre-line intensity to it, so a line
    /// without S degenerates to a flat color.
    fn emit_linear(&mut self, index: usize, target: Position, intensity_before: f64) {
        let start = self.state.position;
        let distance = start.distance_to(&target);
        let intensity = self.state.modal.intensity;

        let (kind, start_color, end_color) = if intensity > 0.0 {
            (
                SegmentKind::Laser { intensity },
                laser_color(intensity_before),
                laser_color(intensity),
            )
        } else {
            (SegmentKind::Cut, segment::CUT_COLOR, segment::CUT_COLOR)
        };

        self.segments.push(MotionSegment {
            start,
            end: target,
            kind,
            start_color,
            end_color,
            distance,
            duration: traverse_seconds(distance, self.state.effective_feed()),
            line_index: index,
            start_time: 0.0,
        });
    }

    /// Tessellate a G2/G3 arc into straight sub-segments.
    ///
    /// The sweep is a naive linear interpolation between the start and
    /// end `atan2` angles: arcs that cross the +/-pi branch cut or run
    /// more than half a turn take the short way regardless of commanded
    /// direction. Playback output for existing programs depends on that
    /// behavior, so it is documented here rather than corrected. R-form
    /// arcs pass validation but fall back to a zero I/J center offset.
    fn emit_arc(&mut self, index: usize, target: Position, words: &tokenizer::Words) {
        let from = self.state.position;
        let center_x = from.x + words.get('I').unwrap_or(0.0);
        let center_y = from.y + words.get('J').unwrap_or(0.0);
        let radius = (from.x - center_x).hypot(from.y - center_y);
        let start_angle = (from.y - center_y).atan2(from.x - center_x);
        let end_angle = (target.y - center_y).atan2(target.x - center_x);
        let sweep = end_angle - start_angle;

        let steps = ((radius / self.tessellation_mm).floor() as usize).max(constants::MIN_ARC_STEPS);
        let feed = self.state.effective_feed();
        trace!(line = index, radius, steps, "tessellating arc");

        let mut cursor = from;
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            let angle = start_angle + sweep * t;
            let next = Position {
                x: center_x + radius * angle.cos(),
                y: center_y + radius * angle.sin(),
                z: from.z + (target.z - from.z) * t,
            };
            let distance = cursor.distance_to(&next);
            self.segments.push(MotionSegment {
                start: cursor,
                end: next,
                kind: SegmentKind::Arc,
                start_color: segment::ARC_COLOR,
                end_color: segment::ARC_COLOR,
                distance,
                duration: traverse_seconds(distance, feed),
                line_index: index,
                start_time: 0.0,
            });
            cursor = next;
        }
    }

    /// Timeline accumulator: one forward pass assigning each segment
    /// its cumulative start offset from program start
    fn finalize_timeline(&mut self) {
        let mut running = 0.0;
        for segment in &mut self.segments {
            segment.start_time = running;
            running += segment.duration;
        }
    }
}

/// Seconds to traverse `distance_mm` at `feed_mm_min`; zero-length
/// moves take no time
fn traverse_seconds(distance_mm: f64, feed_mm_min: f64) -> f64 {
    if distance_mm > 0.0 {
        distance_mm / feed_mm_min * 60.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traverse_seconds() {
        assert!((traverse_seconds(10.0, 600.0) - 1.0).abs() < 1e-12);
        assert_eq!(traverse_seconds(0.0, 600.0), 0.0);
        // Rapid rate: 10mm at 5000mm/min.
        assert!((traverse_seconds(10.0, 5000.0) - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_with_tessellation_rejects_bad_resolutions() {
        assert!(Interpreter::with_tessellation(0.05).is_ok());
        assert!(matches!(
            Interpreter::with_tessellation(0.0),
            Err(GcodeError::InvalidTessellation { .. })
        ));
        assert!(Interpreter::with_tessellation(-1.0).is_err());
        assert!(Interpreter::with_tessellation(f64::NAN).is_err());
        assert!(Interpreter::with_tessellation(f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_program_yields_empty_result() {
        let result = Interpreter::new().interpret("");
        assert!(result.segments.is_empty());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.stats.line_count, 0);
        assert_eq!(result.stats.segment_count, 0);
    }
}
