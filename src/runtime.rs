//! Runtime resolution
//!
//! Selects a concrete installed version for a language out of an engine's
//! runtime inventory. The inventory is fetched fresh for every orchestration
//! attempt ([`ExecutionEngine::runtimes`](crate::engine::ExecutionEngine::runtimes));
//! installed runtimes are mutable infrastructure state, so a cached or
//! hard-coded version is never acceptable.

use crate::engine::Runtime;
use crate::error::{Error, Result};

/// Pick the runtime to execute `language` under.
///
/// Matches entries whose canonical id equals the requested id or whose alias
/// set contains it, keeping the engine's own ordering (engines list newest
/// versions first; no semantic version comparison is attempted). Entries
/// with an empty or wildcard version are never selected — a resolved version
/// of `""` or `"*"` must short-circuit before any execution request is sent.
pub fn select_runtime(inventory: &[Runtime], language: &str) -> Result<Runtime> {
    if inventory.is_empty() {
        return Err(Error::NoRuntimesInstalled);
    }

    let matched = inventory.iter().find(|runtime| {
        (runtime.language == language || runtime.aliases.iter().any(|a| a == language))
            && is_concrete_version(&runtime.version)
    });

    match matched {
        Some(runtime) => Ok(runtime.clone()),
        None => Err(Error::LanguageNotSupported {
            language: language.to_string(),
            available: available_languages(inventory),
        }),
    }
}

/// A version an execution request may carry: non-empty and not a wildcard
fn is_concrete_version(version: &str) -> bool {
    let version = version.trim();
    !version.is_empty() && version != "*"
}

/// Deduplicated language list for diagnostics, in engine order
fn available_languages(inventory: &[Runtime]) -> Vec<String> {
    let mut seen = Vec::new();
    for runtime in inventory {
        if !seen.contains(&runtime.language) {
            seen.push(runtime.language.clone());
        }
    }
    seen
}
