//! Result normalization
//!
//! Engines report wildly different shapes for "it ran", "it crashed", and
//! "it is still waiting for input". This module folds a raw execution into
//! the one canonical [`ExecutionOutcome`] callers see.
//!
//! The end-of-input heuristic lives here as a named policy
//! ([`is_awaiting_input`]) with an explicit marker allow-list, so it can be
//! extended without touching the normalization control flow.

use crate::engine::{EngineKind, ExecutionOutcome, RawExecution, StageOutput};

/// Stderr substrings that mean "the program ran out of stdin", checked
/// case-insensitively. `EOFError` is Python's end-of-file exception; the
/// bare `eof` marker catches the phrasings other runtimes use.
const EOF_MARKERS: &[&str] = &["unexpected eof", "end of file", "eoferror", "eof"];

/// Signals an engine uses to kill a run that exceeded its resource budget
const KILL_SIGNALS: &[&str] = &["SIGKILL", "SIGXCPU"];

/// Classify stderr text as an end-of-input signal.
///
/// A hit means the program is blocked reading stdin, not that it crashed:
/// the caller should prompt for input and re-invoke with stdin supplied.
pub fn is_awaiting_input(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    EOF_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Convert a raw engine execution into the canonical outcome.
///
/// A run that exits 0 while writing to stderr is reported as a failure
/// carrying the stderr text: stderr content is always surfaced to the user,
/// never silently dropped, even when it is only warnings.
pub fn normalize(raw: &RawExecution, engine: EngineKind) -> ExecutionOutcome {
    let run = match &raw.run {
        Some(run) => run,
        None => {
            // Compile-stage failure is the user's program failing, not a
            // broken engine
            if let Some(compile) = raw.compile.as_ref().filter(|c| c.code != Some(0)) {
                return compile_failure(compile, engine);
            }
            return invalid_response(engine);
        }
    };

    let exit_success = run.code == Some(0);
    let stdout = run.stdout.trim();
    let stderr = run.stderr.trim();
    let elapsed = elapsed_label(run, raw.wall_time_ms);

    if !stderr.is_empty() && is_awaiting_input(stderr) {
        let output = if stdout.is_empty() {
            recover_prompt(stderr).unwrap_or_default()
        } else {
            stdout.to_string()
        };
        return ExecutionOutcome {
            success: false,
            output,
            error_message: String::new(),
            awaiting_input: true,
            engine_used: engine,
            elapsed,
        };
    }

    if !stderr.is_empty() {
        return ExecutionOutcome {
            success: false,
            output: String::new(),
            error_message: format!("Runtime Error:\n{}", stderr),
            awaiting_input: false,
            engine_used: engine,
            elapsed,
        };
    }

    if !stdout.is_empty() {
        return ExecutionOutcome {
            success: exit_success,
            output: stdout.to_string(),
            error_message: String::new(),
            awaiting_input: false,
            engine_used: engine,
            elapsed,
        };
    }

    if exit_success {
        // A legitimately silent run; whether it was interactive is for the
        // caller to decide
        return ExecutionOutcome {
            success: true,
            output: String::new(),
            error_message: String::new(),
            awaiting_input: false,
            engine_used: engine,
            elapsed,
        };
    }

    let error_message = match run.code {
        Some(code) => format!("program exited with code {}", code),
        None => format!(
            "program terminated by signal {}",
            run.signal.as_deref().unwrap_or("unknown")
        ),
    };
    ExecutionOutcome {
        success: false,
        output: String::new(),
        error_message,
        awaiting_input: false,
        engine_used: engine,
        elapsed,
    }
}

fn compile_failure(compile: &StageOutput, engine: EngineKind) -> ExecutionOutcome {
    let detail = if !compile.stderr.trim().is_empty() {
        compile.stderr.trim()
    } else if !compile.stdout.trim().is_empty() {
        compile.stdout.trim()
    } else {
        "compilation failed"
    };
    ExecutionOutcome {
        success: false,
        output: String::new(),
        error_message: format!("Compilation Error:\n{}", detail),
        awaiting_input: false,
        engine_used: engine,
        elapsed: "n/a".to_string(),
    }
}

fn invalid_response(engine: EngineKind) -> ExecutionOutcome {
    ExecutionOutcome {
        success: false,
        output: String::new(),
        error_message: "invalid engine response".to_string(),
        awaiting_input: false,
        engine_used: engine,
        elapsed: "n/a".to_string(),
    }
}

/// Recover a trailing prompt line from stderr, for interpreters that write
/// their input prompt to stderr before hitting end-of-input.
fn recover_prompt(stderr: &str) -> Option<String> {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| looks_like_prompt(line))
        .map(str::to_string)
}

fn looks_like_prompt(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.contains("error") || lower.contains("traceback") {
        return false;
    }
    lower.starts_with("enter ")
        || lower.starts_with("input ")
        || line.ends_with(':')
        || line.ends_with('?')
}

/// Human-readable elapsed time for an outcome.
///
/// A kill signal means the engine enforced its time budget; otherwise the
/// engine's own timing is passed through, and "n/a" is reported when the
/// engine provides none. A number is never fabricated.
fn elapsed_label(run: &StageOutput, wall_time_ms: Option<f64>) -> String {
    let killed = run
        .signal
        .as_deref()
        .is_some_and(|signal| KILL_SIGNALS.contains(&signal));
    if killed {
        return "timed out".to_string();
    }
    match wall_time_ms {
        Some(ms) => format!("{:.0} ms", ms),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_stage(stdout: &str, stderr: &str, code: Option<i32>, signal: Option<&str>) -> RawExecution {
        RawExecution {
            compile: None,
            run: Some(StageOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                code,
                signal: signal.map(str::to_string),
            }),
            wall_time_ms: None,
        }
    }

    #[test]
    fn test_clean_run_is_success() {
        let raw = run_stage("Hello", "", Some(0), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(outcome.success);
        assert_eq!(outcome.output, "Hello");
        assert!(!outcome.awaiting_input);
        assert!(outcome.error_message.is_empty());
        assert_eq!(outcome.engine_used, EngineKind::Primary);
    }

    #[test]
    fn test_stderr_on_zero_exit_is_still_a_failure() {
        // Warning-only runs surface the stderr rather than hiding it
        let raw = run_stage("", "DeprecationWarning: old API", Some(0), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert!(outcome.error_message.contains("Runtime Error:"));
        assert!(outcome.error_message.contains("DeprecationWarning"));
        assert!(!outcome.awaiting_input);
    }

    #[test]
    fn test_eof_stderr_is_awaiting_input_not_error() {
        let stderr = "Traceback (most recent call last):\n  File \"main.py\", line 1, in <module>\nEOFError: EOF when reading a line";
        let raw = run_stage("", stderr, Some(1), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(outcome.awaiting_input);
        assert!(outcome.error_message.is_empty());
        assert!(!outcome.success);
    }

    #[test]
    fn test_eof_classification_ignores_exit_code() {
        let raw = run_stage("", "panic: unexpected EOF", Some(2), None);
        let outcome = normalize(&raw, EngineKind::Secondary);
        assert!(outcome.awaiting_input);
        assert!(outcome.error_message.is_empty());
    }

    #[test]
    fn test_awaiting_input_keeps_partial_stdout() {
        let raw = run_stage("What is your name? ", "EOFError: EOF when reading a line", Some(1), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(outcome.awaiting_input);
        assert_eq!(outcome.output, "What is your name?");
    }

    #[test]
    fn test_awaiting_input_recovers_prompt_from_stderr() {
        let stderr = "Enter a number:\nruntime: unexpected eof";
        let raw = run_stage("", stderr, Some(1), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(outcome.awaiting_input);
        assert_eq!(outcome.output, "Enter a number:");
    }

    #[test]
    fn test_prompt_recovery_skips_error_lines() {
        let stderr = "Traceback (most recent call last):\nEOFError: EOF when reading a line";
        let raw = run_stage("", stderr, Some(1), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(outcome.awaiting_input);
        assert_eq!(outcome.output, "");
    }

    #[test]
    fn test_runtime_error_prefixed() {
        let raw = run_stage("", "ZeroDivisionError: division by zero", Some(1), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert!(outcome.error_message.starts_with("Runtime Error:"));
        assert!(outcome.output.is_empty());
    }

    #[test]
    fn test_nonzero_exit_with_stdout_keeps_output() {
        let raw = run_stage("partial result", "", Some(3), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert_eq!(outcome.output, "partial result");
        assert!(outcome.error_message.is_empty());
    }

    #[test]
    fn test_silent_zero_exit_is_success_not_awaiting() {
        let raw = run_stage("", "", Some(0), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(outcome.success);
        assert!(!outcome.awaiting_input);
        assert!(outcome.output.is_empty());
    }

    #[test]
    fn test_silent_nonzero_exit_reports_code() {
        let raw = run_stage("", "", Some(137), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert_eq!(outcome.error_message, "program exited with code 137");
    }

    #[test]
    fn test_signal_kill_without_code() {
        let raw = run_stage("", "", None, Some("SIGSEGV"));
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert_eq!(outcome.error_message, "program terminated by signal SIGSEGV");
    }

    #[test]
    fn test_timeout_kill_labels_elapsed() {
        let raw = run_stage("partial", "", None, Some("SIGKILL"));
        let outcome = normalize(&raw, EngineKind::Primary);
        assert_eq!(outcome.elapsed, "timed out");
    }

    #[test]
    fn test_elapsed_passes_through_engine_timing() {
        let mut raw = run_stage("Hello", "", Some(0), None);
        raw.wall_time_ms = Some(123.0);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert_eq!(outcome.elapsed, "123 ms");
    }

    #[test]
    fn test_elapsed_never_fabricated() {
        let raw = run_stage("Hello", "", Some(0), None);
        let outcome = normalize(&raw, EngineKind::Primary);
        assert_eq!(outcome.elapsed, "n/a");
    }

    #[test]
    fn test_compile_failure_is_program_level() {
        let raw = RawExecution {
            compile: Some(StageOutput {
                stdout: String::new(),
                stderr: "main.c:3: error: expected ';'".to_string(),
                code: Some(1),
                signal: None,
            }),
            run: None,
            wall_time_ms: None,
        };
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert!(outcome.error_message.starts_with("Compilation Error:"));
        assert!(outcome.error_message.contains("expected ';'"));
        assert!(!outcome.awaiting_input);
    }

    #[test]
    fn test_missing_sections_is_invalid_response() {
        let raw = RawExecution::default();
        let outcome = normalize(&raw, EngineKind::Primary);
        assert!(!outcome.success);
        assert_eq!(outcome.error_message, "invalid engine response");
    }

    #[test]
    fn test_eof_markers() {
        assert!(is_awaiting_input("EOFError: EOF when reading a line"));
        assert!(is_awaiting_input("unexpected EOF while parsing"));
        assert!(is_awaiting_input("read: End of File reached"));
        assert!(!is_awaiting_input("ZeroDivisionError: division by zero"));
        assert!(!is_awaiting_input("segmentation fault"));
    }
}
