//! snmposter-dump: parse a walk dump and print its normalized records.
//!
//! Part of the snmposter CLI utilities.

use clap::Parser;
use snmposter::walk;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Parse a walk dump and print the records a simulated agent would serve.
#[derive(Debug, Parser)]
#[command(name = "snmposter-dump", version, about)]
struct Args {
    /// Walk dump file to parse.
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    /// Print only the record count.
    #[arg(short, long)]
    count: bool,

    /// Print records as a JSON array instead of dump notation.
    #[arg(long, conflicts_with = "count")]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let records = match walk::load_walk(&args.dump) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.count {
        println!("{}", records.len());
        return ExitCode::SUCCESS;
    }

    if args.json {
        let entries: Vec<_> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "oid": r.oid.to_string(),
                    "type": r.value.tag().as_str(),
                    "value": r.value.to_string(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for record in &records {
        println!(
            "{} = {}: {}",
            record.oid,
            record.value.tag(),
            record.value
        );
    }

    ExitCode::SUCCESS
}
