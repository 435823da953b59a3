//! Piston-protocol execution client
//!
//! Speaks the Piston API: `GET /runtimes` for the installed inventory and
//! `POST /execute` for a single synchronous run. One instance is bound to one
//! base URL; the primary and secondary engines are two instances of this
//! client pointed at different deployments.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::engine::{ExecutionEngine, ExecutionRequest, RawExecution, Runtime, StageOutput};
use crate::error::{Error, Result};

/// Client for one Piston-compatible engine deployment
pub struct PistonEngine {
    /// HTTP client
    client: Client,
    /// Diagnostic name ("primary", "secondary")
    name: String,
    /// Base URL of the engine API, no trailing slash
    base_url: String,
}

/// Piston execute request body
#[derive(Debug, Serialize)]
struct PistonExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<PistonFile<'a>>,
    stdin: &'a str,
    args: &'a [String],
}

/// One source file in a Piston execute request
#[derive(Debug, Serialize)]
struct PistonFile<'a> {
    content: &'a str,
}

/// Piston execute response body
#[derive(Debug, Deserialize)]
struct PistonExecuteResponse {
    compile: Option<PistonStage>,
    run: Option<PistonStage>,
}

/// One process stage in a Piston execute response
#[derive(Debug, Deserialize)]
struct PistonStage {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    code: Option<i32>,
    signal: Option<String>,
    wall_time: Option<f64>,
}

impl From<PistonStage> for StageOutput {
    fn from(stage: PistonStage) -> Self {
        StageOutput {
            stdout: stage.stdout,
            stderr: stage.stderr,
            code: stage.code,
            signal: stage.signal,
        }
    }
}

impl PistonEngine {
    /// Create a new Piston client bound to one engine deployment
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(PistonEngine {
            client,
            name: name.into(),
            base_url: base_url.into(),
        })
    }

    /// Create a client from an engine config section
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(&config.name, &config.base_url, config.timeout_secs)
    }
}

#[async_trait]
impl ExecutionEngine for PistonEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn runtimes(&self) -> Result<Vec<Runtime>> {
        let url = format!("{}/runtimes", self.base_url);

        debug!("Querying runtime inventory: engine={}", self.name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::EngineUnavailable(format!("{}: {}", self.name, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Runtime inventory query failed: engine={}, status={}, body={}",
                self.name, status, body
            );
            return Err(Error::EngineUnavailable(format!(
                "{}: inventory query returned {}: {}",
                self.name, status, body
            )));
        }

        response
            .json::<Vec<Runtime>>()
            .await
            .map_err(|e| Error::InvalidResponse(format!("unparsable runtime inventory: {}", e)))
    }

    async fn execute(
        &self,
        language: &str,
        version: &str,
        request: &ExecutionRequest,
    ) -> Result<RawExecution> {
        let url = format!("{}/execute", self.base_url);
        let body = PistonExecuteRequest {
            language,
            version,
            files: vec![PistonFile {
                content: &request.source_code,
            }],
            stdin: &request.stdin,
            args: &request.args,
        };

        debug!(
            "Dispatching execution: engine={}, language={}, version={}",
            self.name, language, version
        );

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Execution rejected: engine={}, status={}, body={}",
                self.name, status, body
            );
            return Err(Error::ExecutionRejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<PistonExecuteResponse>()
            .await
            .map_err(|e| Error::InvalidResponse(format!("unparsable execute response: {}", e)))?;

        if parsed.compile.is_none() && parsed.run.is_none() {
            return Err(Error::InvalidResponse(
                "response contains neither compile nor run section".to_string(),
            ));
        }

        let wall_time_ms = parsed.run.as_ref().and_then(|run| run.wall_time);

        Ok(RawExecution {
            compile: parsed.compile.map(StageOutput::from),
            run: parsed.run.map(StageOutput::from),
            wall_time_ms,
        })
    }
}
