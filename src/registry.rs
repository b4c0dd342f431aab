//! Simulated agents and the address registry.
//!
//! An [`Agent`] pairs one device address with its [`OidStore`] behind a
//! per-agent mutex: protocol reads and control-API writes for the same
//! address serialize on that one lock, while agents for different addresses
//! never contend. The critical sections are a binary search or an insert, so
//! nothing holds the lock across I/O or `.await` points.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::store::OidStore;
use crate::value::Value;

/// One simulated device: an address and its synchronized OID store.
///
/// Created once at startup from a walk dump and registered in the
/// [`AgentRegistry`] for the life of the process.
#[derive(Debug)]
pub struct Agent {
    address: IpAddr,
    store: Mutex<OidStore>,
}

impl Agent {
    /// Create an agent over an already-built store.
    pub fn new(address: IpAddr, store: OidStore) -> Self {
        Self {
            address,
            store: Mutex::new(store),
        }
    }

    /// The device address this agent simulates.
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Exact lookup. The value is cloned out so no reference escapes the lock.
    pub fn get(&self, oid: &Oid) -> Option<Value> {
        self.store.lock().unwrap().get(oid).cloned()
    }

    /// Smallest entry strictly greater than `oid`, for range-walk queries.
    pub fn get_next(&self, oid: &Oid) -> Option<(Oid, Value)> {
        self.store
            .lock()
            .unwrap()
            .get_next(oid)
            .map(|(o, v)| (o.clone(), v.clone()))
    }

    /// Insert or overwrite one entry. Atomic with respect to readers: a
    /// concurrent `get`/`get_next` sees the store either before or after
    /// this write, never mid-insert.
    pub fn set(&self, oid: Oid, value: Value) {
        self.store.lock().unwrap().insert(oid, value);
    }

    /// Number of entries currently in the store.
    pub fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.lock().unwrap().is_empty()
    }

    /// Run a closure against the locked store.
    ///
    /// For callers that need a consistent multi-entry view (summaries,
    /// snapshots) without cloning the whole store.
    pub fn with_store<R>(&self, f: impl FnOnce(&OidStore) -> R) -> R {
        f(&self.store.lock().unwrap())
    }
}

/// Address-to-agent map.
///
/// Populated once at startup and shared immutably afterwards (`Arc` it and
/// hand clones to the protocol responder wiring and the update service);
/// entries are never removed at runtime.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: HashMap<IpAddr, Arc<Agent>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an agent under its address.
    ///
    /// Registration is append-only; registering the same address twice
    /// replaces the entry, which only startup code can do.
    pub fn register(&mut self, agent: Arc<Agent>) {
        self.agents.insert(agent.address(), agent);
    }

    /// Look up the agent for an address.
    pub fn lookup(&self, address: IpAddr) -> Result<&Arc<Agent>> {
        self.agents
            .get(&address)
            .ok_or(Error::UnknownAddress { address })
    }

    /// Check whether an address is registered.
    pub fn contains(&self, address: IpAddr) -> bool {
        self.agents.contains_key(&address)
    }

    /// Iterate over all registered agents.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Agent>> {
        self.agents.values()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
