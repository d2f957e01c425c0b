//! # GcodePlay Core
//!
//! Core types, constants, and errors for the GcodePlay interpreter.
//! Provides the fundamental abstractions shared between the interpreter
//! and any host that consumes its output.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{Position, Units};
pub use error::{GcodeError, Result};
