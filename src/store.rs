//! Ordered OID store backing one simulated agent.

use crate::oid::Oid;
use crate::value::Value;
use crate::walk::Record;

/// Ordered mapping from [`Oid`] to [`Value`].
///
/// Entries are kept sorted by identifier so point lookups and GETNEXT-style
/// "smallest key strictly greater than X" queries are both O(log n), and
/// iteration always runs in ascending identifier order regardless of how the
/// entries were inserted.
///
/// Keys are unique; inserting an existing key overwrites its value (last
/// write wins).
#[derive(Debug, Clone, Default)]
pub struct OidStore {
    /// Entries are kept sorted by OID.
    entries: Vec<(Oid, Value)>,
}

impl OidStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Build a store from parsed records.
    ///
    /// Walk dumps arrive in walk (ascending) order, so the common case is a
    /// series of appends; out-of-order and duplicate records are still
    /// handled, with the last occurrence of a key winning.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record.oid, record.value);
        }
        store
    }

    /// Insert an OID-value pair, maintaining sorted order.
    ///
    /// If the OID already exists, its value is replaced.
    pub fn insert(&mut self, oid: Oid, value: Value) {
        match self.entries.binary_search_by(|(o, _)| o.cmp(&oid)) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (oid, value)),
        }
    }

    /// Get the value for an exact OID match.
    pub fn get(&self, oid: &Oid) -> Option<&Value> {
        match self.entries.binary_search_by(|(o, _)| o.cmp(oid)) {
            Ok(idx) => Some(&self.entries[idx].1),
            Err(_) => None,
        }
    }

    /// Get the entry with the smallest OID strictly greater than the given one.
    ///
    /// This is the range-walk primitive: repeated `get_next` calls starting
    /// from any identifier enumerate the rest of the store in ascending
    /// order. Returns `None` when no greater key exists (end of view).
    pub fn get_next(&self, oid: &Oid) -> Option<(&Oid, &Value)> {
        match self.entries.binary_search_by(|(o, _)| o.cmp(oid)) {
            Ok(idx) => {
                // Exact match, return the next one
                self.entries.get(idx + 1).map(|(o, v)| (o, v))
            }
            Err(idx) => {
                // No exact match, return the entry at insertion point
                self.entries.get(idx).map(|(o, v)| (o, v))
            }
        }
    }

    /// Get the number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all OID-value pairs in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&Oid, &Value)> {
        self.entries.iter().map(|(o, v)| (o, v))
    }
}

impl FromIterator<Record> for OidStore {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn record(oid: Oid, v: i32) -> Record {
        Record {
            oid,
            value: Value::Integer(v),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = OidStore::new();

        store.insert(oid!(1, 3, 6, 1, 2), Value::Integer(100));
        store.insert(oid!(1, 3, 6, 1, 1), Value::Integer(50));
        store.insert(oid!(1, 3, 6, 1, 3), Value::Integer(150));

        assert_eq!(store.get(&oid!(1, 3, 6, 1, 1)), Some(&Value::Integer(50)));
        assert_eq!(store.get(&oid!(1, 3, 6, 1, 2)), Some(&Value::Integer(100)));
        assert_eq!(store.get(&oid!(1, 3, 6, 1, 3)), Some(&Value::Integer(150)));
        assert_eq!(store.get(&oid!(1, 3, 6, 1, 4)), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut store = OidStore::new();

        store.insert(oid!(1, 3, 6, 1, 1), Value::Integer(50));
        store.insert(oid!(1, 3, 6, 1, 1), Value::Integer(100));

        assert_eq!(store.get(&oid!(1, 3, 6, 1, 1)), Some(&Value::Integer(100)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_next() {
        let mut store = OidStore::new();

        store.insert(oid!(1, 3, 6, 1, 1), Value::Integer(50));
        store.insert(oid!(1, 3, 6, 1, 2), Value::Integer(100));
        store.insert(oid!(1, 3, 6, 1, 3), Value::Integer(150));

        // Before first
        let next = store.get_next(&oid!(1, 3, 6, 1, 0)).unwrap();
        assert_eq!(next.0, &oid!(1, 3, 6, 1, 1));

        // Exact match returns the following entry
        let next = store.get_next(&oid!(1, 3, 6, 1, 1)).unwrap();
        assert_eq!(next.0, &oid!(1, 3, 6, 1, 2));

        // Between entries
        let next = store.get_next(&oid!(1, 3, 6, 1, 1, 5)).unwrap();
        assert_eq!(next.0, &oid!(1, 3, 6, 1, 2));

        // At and after last
        assert!(store.get_next(&oid!(1, 3, 6, 1, 3)).is_none());
        assert!(store.get_next(&oid!(1, 3, 6, 1, 4)).is_none());
    }

    #[test]
    fn test_get_next_numeric_segments() {
        let mut store = OidStore::new();
        store.insert(oid!(1, 9), Value::Integer(9));
        store.insert(oid!(1, 10), Value::Integer(10));

        // Hierarchical ordering: 1.10 follows 1.9
        let next = store.get_next(&oid!(1, 9)).unwrap();
        assert_eq!(next.0, &oid!(1, 10));
    }

    #[test]
    fn test_from_records_sorted_regardless_of_input_order() {
        let store = OidStore::from_records(vec![
            record(oid!(1, 3, 6, 3), 3),
            record(oid!(1, 3, 6, 1), 1),
            record(oid!(1, 3, 6, 2), 2),
        ]);

        let keys: Vec<_> = store.iter().map(|(o, _)| o.clone()).collect();
        assert_eq!(keys, vec![oid!(1, 3, 6, 1), oid!(1, 3, 6, 2), oid!(1, 3, 6, 3)]);
    }

    #[test]
    fn test_from_records_last_write_wins() {
        let store = OidStore::from_records(vec![
            record(oid!(1, 3, 6, 1), 1),
            record(oid!(1, 3, 6, 1), 2),
        ]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&oid!(1, 3, 6, 1)), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_empty_store() {
        let store = OidStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.get_next(&oid!(1, 3, 6, 1)).is_none());
    }
}
