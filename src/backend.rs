//! Async seam between agents and a protocol responder.
//!
//! The wire protocol lives elsewhere; a responder only needs the read
//! primitives of one agent's store, exposed as an object-safe async trait so
//! responders can hold `Arc<dyn SnmpBackend>` per simulated address.

use std::future::Future;
use std::pin::Pin;

use crate::oid::Oid;
use crate::registry::Agent;
use crate::value::Value;

/// Type alias for boxed async return type (dyn-compatible).
///
/// Async trait methods cannot be object-safe, so backend methods return
/// `BoxFuture` to allow backends to be stored as trait objects.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a GET operation on a specific OID.
#[derive(Debug, Clone, PartialEq)]
pub enum GetResult {
    /// The OID exists and has this value.
    Value(Value),
    /// No entry for this exact OID.
    NoSuchInstance,
}

impl GetResult {
    /// `None` is treated as `NoSuchInstance`.
    pub fn from_option(value: Option<Value>) -> Self {
        match value {
            Some(v) => GetResult::Value(v),
            None => GetResult::NoSuchInstance,
        }
    }
}

impl From<Option<Value>> for GetResult {
    fn from(value: Option<Value>) -> Self {
        GetResult::from_option(value)
    }
}

/// Result of a GETNEXT operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GetNextResult {
    /// The next OID/value pair in ascending identifier order.
    Value(Oid, Value),
    /// No more OIDs after the given one (end of view).
    EndOfMibView,
}

impl GetNextResult {
    /// `None` is treated as `EndOfMibView`.
    pub fn from_option(value: Option<(Oid, Value)>) -> Self {
        match value {
            Some((oid, v)) => GetNextResult::Value(oid, v),
            None => GetNextResult::EndOfMibView,
        }
    }

    /// Returns `true` if this is end of view.
    pub fn is_end_of_mib_view(&self) -> bool {
        matches!(self, GetNextResult::EndOfMibView)
    }

    /// Converts to an `Option<(Oid, Value)>`.
    pub fn into_option(self) -> Option<(Oid, Value)> {
        match self {
            GetNextResult::Value(oid, v) => Some((oid, v)),
            GetNextResult::EndOfMibView => None,
        }
    }
}

/// Read access to one simulated agent, as seen by a protocol responder.
///
/// The `'static` bound is required because backends are stored as
/// `Arc<dyn SnmpBackend>` for the life of the responder; `Send + Sync`
/// because requests may be served concurrently from multiple tasks.
///
/// GETNEXT must return an OID strictly greater than the input, comparing
/// arc-by-arc as unsigned integers (`1.3.6.1.2` < `1.3.6.1.2.1` < `1.3.6.1.3`),
/// so repeated calls enumerate the view in ascending order and terminate.
pub trait SnmpBackend: Send + Sync + 'static {
    /// Handle a GET request for a specific OID.
    fn get<'a>(&'a self, oid: &'a Oid) -> BoxFuture<'a, GetResult>;

    /// Handle a GETNEXT request.
    fn get_next<'a>(&'a self, oid: &'a Oid) -> BoxFuture<'a, GetNextResult>;
}

/// An agent's store is itself a backend: lookups clone the value out of the
/// lock, so the returned future never holds it.
impl SnmpBackend for Agent {
    fn get<'a>(&'a self, oid: &'a Oid) -> BoxFuture<'a, GetResult> {
        Box::pin(async move { GetResult::from_option(Agent::get(self, oid)) })
    }

    fn get_next<'a>(&'a self, oid: &'a Oid) -> BoxFuture<'a, GetNextResult> {
        Box::pin(async move { GetNextResult::from_option(Agent::get_next(self, oid)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::store::OidStore;
    use std::sync::Arc;

    fn backend() -> Arc<dyn SnmpBackend> {
        let mut store = OidStore::new();
        store.insert(oid!(1, 3, 6, 1, 1), Value::Integer(1));
        store.insert(oid!(1, 3, 6, 1, 2), Value::Counter32(2));
        Arc::new(Agent::new("10.0.0.1".parse().unwrap(), store))
    }

    #[tokio::test]
    async fn test_get_through_trait_object() {
        let backend = backend();

        let result = backend.get(&oid!(1, 3, 6, 1, 1)).await;
        assert_eq!(result, GetResult::Value(Value::Integer(1)));

        let result = backend.get(&oid!(1, 3, 6, 1, 9)).await;
        assert_eq!(result, GetResult::NoSuchInstance);
    }

    #[tokio::test]
    async fn test_get_next_through_trait_object() {
        let backend = backend();

        let result = backend.get_next(&oid!(1, 3, 6, 1, 1)).await;
        assert_eq!(
            result,
            GetNextResult::Value(oid!(1, 3, 6, 1, 2), Value::Counter32(2))
        );

        let result = backend.get_next(&oid!(1, 3, 6, 1, 2)).await;
        assert!(result.is_end_of_mib_view());
    }

    #[tokio::test]
    async fn test_walk_terminates() {
        let backend = backend();

        let mut cursor = oid!(1, 3);
        let mut seen = Vec::new();
        while let GetNextResult::Value(oid, _) = backend.get_next(&cursor).await {
            assert!(oid > cursor);
            cursor = oid.clone();
            seen.push(oid);
        }
        assert_eq!(seen, vec![oid!(1, 3, 6, 1, 1), oid!(1, 3, 6, 1, 2)]);
    }
}
