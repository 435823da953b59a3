//! # CodeRunner
//!
//! Remote code execution orchestration with multi-engine failover.
//!
//! ## Features
//!
//! - **40+ Languages:** Display labels mapped to each engine's canonical ids
//! - **Dynamic Runtime Resolution:** Installed versions queried fresh per run,
//!   never guessed
//! - **Awaiting-Input Detection:** End-of-input crashes reinterpreted as
//!   "this program wants stdin"
//! - **Engine Failover:** One primary → secondary switch on engine-level
//!   failure, without double execution

pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod normalize;
pub mod orchestrator;
pub mod runtime;

pub use config::{Config, EngineConfig};
pub use engine::{EngineKind, ExecutionEngine, ExecutionOutcome, ExecutionRequest};
pub use error::{Error, Result};
pub use orchestrator::Orchestrator;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
