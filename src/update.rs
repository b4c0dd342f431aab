//! Runtime mutation of agent stores via the control API.
//!
//! The HTTP transport is external; it hands the raw JSON request body to
//! [`UpdateService::apply_json`] and serializes the returned
//! [`UpdateReport`]. The body is a JSON object mapping each agent address to
//! an ordered list of `{oid, type, value}` triples:
//!
//! ```json
//! {
//!     "10.0.0.1": [
//!         {"oid": "1.3.6.1.2.1.1.5.0", "type": "STRING", "value": "renamed"},
//!         {"oid": "1.3.6.1.2.1.2.2.1.10.1", "type": "Counter32", "value": "1234"}
//!     ]
//! }
//! ```
//!
//! Entries go through the same coercion as dump records, so a value mutated
//! at runtime is indistinguishable from one loaded at startup.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::registry::AgentRegistry;
use crate::value::TypeTag;

/// One `{oid, type, value}` triple from an update request.
#[derive(Debug, Clone, Deserialize)]
pub struct VarUpdate {
    pub oid: String,
    #[serde(rename = "type")]
    pub tag: String,
    pub value: String,
}

/// Update request body: address → ordered entries.
pub type UpdateRequest = BTreeMap<String, Vec<VarUpdate>>;

/// What went wrong with one part of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateFailureKind {
    /// The address has no registered agent (or is not an address at all);
    /// none of its entries were applied.
    UnknownAddress,
    /// One entry could not be coerced; the rest of its batch still applied.
    BadEntry,
}

/// One reported failure.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFailure {
    pub kind: UpdateFailureKind,
    pub address: String,
    /// Position of the failing entry within its batch (absent for
    /// address-level failures).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    pub reason: String,
}

/// Outcome of one update request.
///
/// Serializes to JSON for the transport's response body.
#[derive(Debug, Default, Serialize)]
pub struct UpdateReport {
    /// Entries applied to a store.
    pub applied: usize,
    /// Everything that was rejected, in request order.
    pub failures: Vec<UpdateFailure>,
}

impl UpdateReport {
    /// True when every entry in the request was applied.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies update batches to registered agents.
///
/// Holds a shared handle to the registry built at startup; construct one and
/// hand it to the control-API transport.
#[derive(Debug, Clone)]
pub struct UpdateService {
    registry: Arc<AgentRegistry>,
}

impl UpdateService {
    /// Create an update service over a startup-built registry.
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatch a raw JSON request body.
    ///
    /// A body that does not deserialize is the only hard error; everything
    /// past that point is reported per address / per entry in the
    /// [`UpdateReport`].
    pub fn apply_json(&self, body: &[u8]) -> Result<UpdateReport> {
        let request: UpdateRequest =
            serde_json::from_slice(body).map_err(|source| Error::UpdateBody { source })?;
        Ok(self.apply(&request))
    }

    /// Apply an update request.
    ///
    /// Per-address batches are independent: an unknown address fails its
    /// whole batch without touching any store, and within a batch each entry
    /// is applied independently, so one malformed entry does not abort the
    /// rest. Re-applying the same request is idempotent (last write wins).
    pub fn apply(&self, request: &UpdateRequest) -> UpdateReport {
        let mut report = UpdateReport::default();

        for (address_text, entries) in request {
            // Registry keys are addresses, so an unparseable key can never
            // be registered; it reports the same way as an unknown one.
            let agent = address_text
                .parse::<IpAddr>()
                .ok()
                .and_then(|address| self.registry.lookup(address).ok());

            let agent = match agent {
                Some(agent) => agent,
                None => {
                    tracing::warn!(
                        target: "snmposter::update",
                        address = %address_text,
                        entries = entries.len(),
                        "update batch for unknown address dropped"
                    );
                    report.failures.push(UpdateFailure {
                        kind: UpdateFailureKind::UnknownAddress,
                        address: address_text.clone(),
                        index: None,
                        oid: None,
                        reason: format!("no agent registered for {}", address_text),
                    });
                    continue;
                }
            };

            for (index, entry) in entries.iter().enumerate() {
                match coerce_entry(entry) {
                    Ok((oid, value)) => {
                        agent.set(oid, value);
                        report.applied += 1;
                    }
                    Err(reason) => {
                        tracing::warn!(
                            target: "snmposter::update",
                            address = %address_text,
                            oid = %entry.oid,
                            %reason,
                            "update entry rejected"
                        );
                        report.failures.push(UpdateFailure {
                            kind: UpdateFailureKind::BadEntry,
                            address: address_text.clone(),
                            index: Some(index),
                            oid: Some(entry.oid.clone()),
                            reason,
                        });
                    }
                }
            }

            tracing::debug!(
                target: "snmposter::update",
                address = %address_text,
                entries = entries.len(),
                "update batch processed"
            );
        }

        report
    }
}

/// Coerce one update entry into a store record.
fn coerce_entry(entry: &VarUpdate) -> std::result::Result<(Oid, crate::value::Value), String> {
    let oid = Oid::parse_sanitized(&entry.oid).map_err(|e| e.to_string())?;
    let tag = entry.tag.parse::<TypeTag>().map_err(|e| e.to_string())?;
    let value = tag.coerce(&[entry.value.as_str()]).map_err(|e| e.to_string())?;
    Ok((oid, value))
}
