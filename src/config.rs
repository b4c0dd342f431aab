//! Startup configuration: which dump file runs on which address.
//!
//! The configuration is a row-oriented text file, one `dump-path,address`
//! pair per line; `#` comments and blank lines are skipped. Unlike walk
//! parsing, configuration errors are fatal: a simulator that silently starts
//! with half its agents is worse than one that refuses to start.

use std::collections::HashSet;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConfigErrorKind, Error, Result};
use crate::registry::{Agent, AgentRegistry};
use crate::store::OidStore;
use crate::walk;

/// One configured agent: a walk dump and the address to replay it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub dump: PathBuf,
    pub address: IpAddr,
}

/// Parse configuration text.
///
/// # Examples
///
/// ```
/// use snmposter::config::parse_config;
///
/// let rows = parse_config(
///     "# router snapshots\n\
///      dumps/router1.snmpwalk,172.16.58.10\n\
///      dumps/router2.snmpwalk,172.16.58.11\n",
///     "agents.conf",
/// )
/// .unwrap();
/// assert_eq!(rows.len(), 2);
/// ```
pub fn parse_config(text: &str, origin: impl AsRef<Path>) -> Result<Vec<AgentConfig>> {
    let origin = origin.as_ref();
    let mut configs = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((dump, address_text)) = line.split_once(',') else {
            return Err(Error::Config {
                path: origin.to_path_buf(),
                line: line_no,
                kind: ConfigErrorKind::MissingColumn,
            });
        };

        let dump = dump.trim();
        let address_text = address_text.trim();
        if dump.is_empty() || address_text.is_empty() {
            return Err(Error::Config {
                path: origin.to_path_buf(),
                line: line_no,
                kind: ConfigErrorKind::MissingColumn,
            });
        }

        let address: IpAddr = address_text.parse().map_err(|_| Error::Config {
            path: origin.to_path_buf(),
            line: line_no,
            kind: ConfigErrorKind::InvalidAddress(address_text.into()),
        })?;

        if !seen.insert(address) {
            return Err(Error::Config {
                path: origin.to_path_buf(),
                line: line_no,
                kind: ConfigErrorKind::DuplicateAddress(address),
            });
        }

        configs.push(AgentConfig {
            dump: PathBuf::from(dump),
            address,
        });
    }

    Ok(configs)
}

/// Read and parse a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Vec<AgentConfig>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_config(&text, path)
}

/// Build the full registry from configured agents.
///
/// Each dump is parsed into its store before the agent is registered, so no
/// reader or writer ever sees a half-built store. Any unreadable dump or
/// uncoercible record aborts startup.
pub fn build_registry(configs: &[AgentConfig]) -> Result<AgentRegistry> {
    let mut registry = AgentRegistry::new();

    for config in configs {
        let records = walk::load_walk(&config.dump)?;
        let store = OidStore::from_records(records);

        tracing::info!(
            target: "snmposter::config",
            dump = %config.dump.display(),
            address = %config.address,
            entries = store.len(),
            "starting agent"
        );

        registry.register(Arc::new(Agent::new(config.address, store)));
    }

    Ok(registry)
}
