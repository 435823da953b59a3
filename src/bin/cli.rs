//! CodeRunner CLI
//!
//! Command-line interface for running source files against the configured
//! execution engines.

use anyhow::Context;
use clap::{Parser, Subcommand};
use coderunner::{Config, ExecutionRequest, Orchestrator, VERSION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coderunner",
    author = "CodeRunner Contributors",
    version = VERSION,
    about = "Remote code execution with multi-engine failover",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a source file on the configured engines
    Run {
        /// Language label, e.g. "python" or "C#"
        language: String,
        /// Path to the source file
        file: PathBuf,
        /// Standard input fed to the program
        #[arg(short, long, default_value = "")]
        stdin: String,
        /// Command-line argument (repeatable)
        #[arg(short, long = "arg")]
        args: Vec<String>,
    },

    /// List the runtimes installed on both engines
    Runtimes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coderunner=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Run {
            language,
            file,
            stdin,
            args,
        } => run_file(&config, &language, &file, stdin, args).await,
        Commands::Runtimes => list_runtimes(&config).await,
    }
}

async fn run_file(
    config: &Config,
    language: &str,
    file: &PathBuf,
    stdin: String,
    args: Vec<String>,
) -> anyhow::Result<()> {
    let source_code = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let orchestrator = Orchestrator::from_config(config)?;
    let request = ExecutionRequest::new(source_code, language)
        .with_stdin(stdin)
        .with_args(args);

    let outcome = orchestrator.run(request).await?;

    if outcome.awaiting_input {
        println!("Program is waiting for input; re-run with --stdin.");
        if !outcome.output.is_empty() {
            println!("Prompt: {}", outcome.output);
        }
    } else if outcome.success {
        println!("{}", outcome.output);
    } else if !outcome.error_message.is_empty() {
        eprintln!("{}", outcome.error_message);
    } else {
        println!("{}", outcome.output);
    }
    eprintln!(
        "[engine: {}, elapsed: {}]",
        outcome.engine_used, outcome.elapsed
    );

    if outcome.success || outcome.awaiting_input {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

async fn list_runtimes(config: &Config) -> anyhow::Result<()> {
    use coderunner::engine::{ExecutionEngine, PistonEngine};

    for engine_config in [&config.primary, &config.secondary] {
        let engine = PistonEngine::from_config(engine_config)?;
        println!("{} ({}):", engine_config.name, engine_config.base_url);
        match engine.runtimes().await {
            Ok(runtimes) => {
                for runtime in runtimes {
                    println!("  {} {}", runtime.language, runtime.version);
                }
            }
            Err(e) => println!("  unavailable: {}", e),
        }
    }
    Ok(())
}
