//! # GcodePlay Interpreter
//!
//! Converts a textual G-code program into a time-ordered list of motion
//! segments annotated with geometry, color classification, duration, and
//! cumulative timeline position, suitable for 3D visualization and
//! playback scrubbing.
//!
//! This module provides:
//! - Permissive line tokenization (letter/number words)
//! - Modal state tracking (motion mode, feed, intensity, units)
//! - Motion segment generation with arc tessellation
//! - Timeline accumulation for playback scrubbing
//! - Per-line diagnostics that never abort a run
//!
//! Rendering, camera control, and editor integration are the host's
//! concern; this crate only produces the segment and diagnostic lists.

pub mod diagnostics;
pub mod interpreter;
pub mod segment;
pub mod state;
pub mod tokenizer;

pub use diagnostics::Diagnostic;
pub use interpreter::{InterpretResult, Interpreter, ProgramStats};
pub use segment::{laser_color, Color, MotionSegment, SegmentKind};
pub use state::{DistanceMode, MachineState, ModalState, MotionMode};
pub use tokenizer::{tokenize, Words};
