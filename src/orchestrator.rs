//! Execution orchestration and engine failover
//!
//! Owns the end-to-end attempt: validate the request, map the language
//! label, resolve a runtime on the primary engine, execute, normalize. When
//! the primary fails at the engine level the whole attempt is repeated once
//! against the secondary engine; program-level failures (compile errors,
//! runtime errors, awaiting-input) are final outcomes and never retried.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{
    EngineKind, ExecutionEngine, ExecutionOutcome, ExecutionRequest, PistonEngine,
};
use crate::error::{Error, Result};
use crate::{language, normalize, runtime};

/// Coordinates one primary and one secondary execution engine.
///
/// Holds no mutable state; a single instance can serve many concurrent
/// requests behind an `Arc`.
pub struct Orchestrator {
    primary: Box<dyn ExecutionEngine>,
    secondary: Box<dyn ExecutionEngine>,
}

impl Orchestrator {
    /// Create an orchestrator over two engine clients.
    ///
    /// Engines are injected so tests can substitute doubles; production
    /// callers normally use [`from_config`](Self::from_config).
    pub fn new(primary: Box<dyn ExecutionEngine>, secondary: Box<dyn ExecutionEngine>) -> Self {
        Orchestrator { primary, secondary }
    }

    /// Create an orchestrator with a Piston client per configured engine
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Orchestrator::new(
            Box::new(PistonEngine::from_config(&config.primary)?),
            Box::new(PistonEngine::from_config(&config.secondary)?),
        ))
    }

    /// Execute one request and return its consolidated outcome.
    ///
    /// Exactly one engine answers a given request. Engine-level failures
    /// (unreachable engine, rejected or unparsable response, no runtimes,
    /// language not in the inventory) move the attempt to the secondary
    /// engine once; if both engines fail that way the error names both
    /// causes. Outcomes describing the user's program failing are returned
    /// as-is from whichever engine produced them.
    ///
    /// Dropping the returned future abandons the local wait only: a run
    /// already dispatched to an engine cannot be aborted remotely and will
    /// finish on the engine's side.
    pub async fn run(&self, request: ExecutionRequest) -> Result<ExecutionOutcome> {
        request.validate()?;

        let language = language::canonical_id(&request.language_label);
        if language.is_empty() {
            return Err(Error::Validation(format!(
                "cannot resolve language label '{}'",
                request.language_label
            )));
        }

        match self
            .attempt(self.primary.as_ref(), EngineKind::Primary, &language, &request)
            .await
        {
            Ok(outcome) => Ok(outcome),
            Err(primary_err) if primary_err.is_engine_failure() => {
                warn!(
                    "Primary engine '{}' failed, switching to secondary: {}",
                    self.primary.name(),
                    primary_err
                );
                match self
                    .attempt(
                        self.secondary.as_ref(),
                        EngineKind::Secondary,
                        &language,
                        &request,
                    )
                    .await
                {
                    Ok(outcome) => Ok(outcome),
                    Err(secondary_err) if secondary_err.is_engine_failure() => {
                        Err(Error::EnginesExhausted {
                            primary: primary_err.to_string(),
                            secondary: secondary_err.to_string(),
                        })
                    }
                    Err(secondary_err) => Err(secondary_err),
                }
            }
            Err(primary_err) => Err(primary_err),
        }
    }

    /// One full attempt against one engine: resolve, execute, normalize
    async fn attempt(
        &self,
        engine: &dyn ExecutionEngine,
        kind: EngineKind,
        language: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecutionOutcome> {
        let inventory = engine.runtimes().await?;
        let selected = runtime::select_runtime(&inventory, language)?;

        debug!(
            "Resolved runtime: engine={}, language={}, version={}",
            engine.name(),
            selected.language,
            selected.version
        );

        let raw = engine
            .execute(&selected.language, &selected.version, request)
            .await?;
        let outcome = normalize::normalize(&raw, kind);

        info!(
            "Execution finished: engine={}, success={}, awaiting_input={}, elapsed={}",
            engine.name(),
            outcome.success,
            outcome.awaiting_input,
            outcome.elapsed
        );

        Ok(outcome)
    }
}
