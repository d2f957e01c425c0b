//! Property tests for the universal run invariants: they must hold for
//! any program text, well-formed or not.

use gcodeplay_interpreter::{tokenize, Interpreter};
use proptest::prelude::*;

/// One plausible program line: moves, modal-only lines, comments,
/// blanks, or printable junk.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (-100.0f64..100.0, -100.0f64..100.0)
            .prop_map(|(x, y)| format!("G0 X{x:.3} Y{y:.3}")),
        (-100.0f64..100.0, 1.0f64..3000.0).prop_map(|(x, f)| format!("G1 X{x:.3} F{f:.1}")),
        (-100.0f64..100.0, -100.0f64..100.0, 0.5f64..20.0)
            .prop_map(|(x, y, i)| format!("G2 X{x:.3} Y{y:.3} I{i:.2}")),
        (-50.0f64..50.0, -50.0f64..50.0).prop_map(|(x, y)| format!("G3 X{x:.3} Y{y:.3}")),
        (0.0f64..1500.0).prop_map(|s| format!("S{s:.0}")),
        (-20.0f64..20.0, -20.0f64..20.0).prop_map(|(x, y)| format!("G92 X{x:.2} Y{y:.2}")),
        Just("; a comment".to_string()),
        Just(String::new()),
        "[ -~]{0,24}",
    ]
}

fn arb_program() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn stats_always_match_the_segment_list(program in arb_program()) {
        let result = Interpreter::new().interpret(&program);
        prop_assert_eq!(result.stats.segment_count, result.segments.len());
    }

    #[test]
    fn start_times_are_monotone_from_zero(program in arb_program()) {
        let result = Interpreter::new().interpret(&program);
        if let Some(first) = result.segments.first() {
            prop_assert_eq!(first.start_time, 0.0);
        }
        for pair in result.segments.windows(2) {
            prop_assert!(
                pair[1].start_time >= pair[0].start_time,
                "start_time regressed: {} -> {}",
                pair[0].start_time,
                pair[1].start_time
            );
        }
    }

    #[test]
    fn durations_are_never_negative(program in arb_program()) {
        let result = Interpreter::new().interpret(&program);
        for seg in &result.segments {
            prop_assert!(seg.duration >= 0.0);
            prop_assert!(seg.distance >= 0.0);
        }
    }

    #[test]
    fn identical_runs_are_bit_identical(program in arb_program()) {
        let interp = Interpreter::new();
        prop_assert_eq!(interp.interpret(&program), interp.interpret(&program));
    }

    #[test]
    fn diagnostics_reference_real_lines(program in arb_program()) {
        let result = Interpreter::new().interpret(&program);
        for diag in &result.diagnostics {
            prop_assert!(diag.line_index < result.stats.line_count);
        }
    }

    #[test]
    fn tokenizer_accepts_anything(line in "\\PC{0,64}") {
        // Must never panic, whatever the input.
        let _ = tokenize(&line);
    }
}
