//! Execution engine abstraction
//!
//! An engine is a remote sandboxed service that runs submitted source code
//! and reports stdout/stderr/exit status. The orchestrator talks to engines
//! exclusively through the [`ExecutionEngine`] trait so that tests can swap
//! in doubles and new engine protocols can be added without touching the
//! coordination logic.

mod piston;

pub use piston::PistonEngine;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which engine produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Primary,
    Secondary,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Primary => write!(f, "primary"),
            EngineKind::Secondary => write!(f, "secondary"),
        }
    }
}

/// Request to execute code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// The code to execute
    pub source_code: String,
    /// Human-facing language label, e.g. "C# Language"
    pub language_label: String,
    /// Standard input fed to the program
    #[serde(default)]
    pub stdin: String,
    /// Command-line arguments, in order
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExecutionRequest {
    /// Create a new execution request
    pub fn new(source_code: impl Into<String>, language_label: impl Into<String>) -> Self {
        ExecutionRequest {
            source_code: source_code.into(),
            language_label: language_label.into(),
            stdin: String::new(),
            args: Vec::new(),
        }
    }

    /// Set stdin
    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = stdin.into();
        self
    }

    /// Set command-line arguments
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Reject requests that would waste a network round trip
    pub fn validate(&self) -> Result<()> {
        if self.source_code.trim().is_empty() {
            return Err(crate::Error::Validation("source code is empty".to_string()));
        }
        if self.language_label.trim().is_empty() {
            return Err(crate::Error::Validation(
                "language label is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One installed (language, version) pair reported by an engine
#[derive(Debug, Clone, Deserialize)]
pub struct Runtime {
    /// Engine's canonical language id
    pub language: String,
    /// Concrete installed version; never a wildcard
    pub version: String,
    /// Alternate ids the engine accepts for this language
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Output of one process stage (compile or run) on an engine
#[derive(Debug, Clone, Default)]
pub struct StageOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; None when the process was killed by a signal
    pub code: Option<i32>,
    /// Terminating signal name, e.g. "SIGKILL"
    pub signal: Option<String>,
}

/// Engine-neutral view of one execution response.
///
/// Each client maps its own wire format into this shape; the wire structs
/// themselves never leave the client module.
#[derive(Debug, Clone, Default)]
pub struct RawExecution {
    /// Compile stage, present only for compiled languages
    pub compile: Option<StageOutput>,
    /// Run stage; absent when compilation failed before a run could start
    pub run: Option<StageOutput>,
    /// Wall-clock time of the run stage in milliseconds, if the engine reports it
    pub wall_time_ms: Option<f64>,
}

/// Result of a successful run as seen by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// True when the program exited 0 without writing to stderr
    pub success: bool,
    /// Program output (stdout, or a recovered prompt when awaiting input)
    pub output: String,
    /// Error description when the program failed; empty otherwise
    pub error_message: String,
    /// The program is blocked reading stdin, not broken
    pub awaiting_input: bool,
    /// Which engine produced this outcome
    pub engine_used: EngineKind,
    /// Human-readable elapsed time, "timed out", or "n/a"
    pub elapsed: String,
}

/// Trait for remote execution engine clients
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Diagnostic name for this engine instance
    fn name(&self) -> &str;

    /// Fetch the engine's current runtime inventory.
    ///
    /// Called fresh on every orchestration attempt; installed runtimes are
    /// mutable infrastructure state and must never be assumed from a
    /// previous call.
    async fn runtimes(&self) -> Result<Vec<Runtime>>;

    /// Run one piece of source code under an already-resolved runtime.
    ///
    /// `version` must be a concrete version from [`runtimes`](Self::runtimes),
    /// never `"*"`.
    async fn execute(
        &self,
        language: &str,
        version: &str,
        request: &ExecutionRequest,
    ) -> Result<RawExecution>;
}
