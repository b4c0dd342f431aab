//! snmposter-check: validate a configuration file and its walk dumps.
//!
//! Part of the snmposter CLI utilities.

use clap::Parser;
use snmposter::config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Validate an agent configuration without starting any agents.
///
/// Exits non-zero on the first unreadable dump, uncoercible record, or
/// configuration error, with the offending file and line on stderr.
#[derive(Debug, Parser)]
#[command(name = "snmposter-check", version, about)]
struct Args {
    /// Configuration file mapping walk dumps to agent addresses.
    #[arg(value_name = "CONFIG")]
    config: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let agents = match config::load_config(&args.config) {
        Ok(agents) => agents,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match config::build_registry(&agents) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for agent in registry.iter() {
        println!("{}: {} entries", agent.address(), agent.len());
    }
    println!("{} agent(s) ok", registry.len());

    ExitCode::SUCCESS
}
