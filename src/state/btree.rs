/*
 * Copyright 2018 Bitwise IO, Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! Provides a simple, in-memory ledger backed by `std::collections::BTreeMap`.

use std::collections::BTreeMap;
use std::ops::Bound::{self, Excluded, Included, Unbounded};
use std::sync::{Arc, RwLock};

use crate::handler::{ChaincodeStub, ContextError, KeyValue, StateQueryIterator};

/// An ordered collection of key-value pairs that represents the ledger.
pub type Ledger = BTreeMap<String, Vec<u8>>;

/// An in-memory implementation of `ChaincodeStub`.
///
/// Clones share the same underlying ledger, so a stub can be handed to a chaincode while the
/// caller keeps a handle for inspection. Writes are visible to subsequent reads immediately;
/// there is no transaction isolation.
#[derive(Debug, Clone, Default)]
pub struct BTreeStub {
    ledger: Arc<RwLock<Ledger>>,
}

impl BTreeStub {
    /// Create a new, empty BTreeStub.
    pub fn new() -> Self {
        BTreeStub::default()
    }

    /// Create a BTreeStub holding the given entries.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        BTreeStub {
            ledger: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    /// Returns the number of keys currently set.
    pub fn len(&self) -> Result<usize, ContextError> {
        Ok(self
            .ledger
            .read()
            .map_err(|_| ContextError::StorageError("Ledger lock poisoned".into()))?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool, ContextError> {
        Ok(self.len()? == 0)
    }
}

fn lower_bound(key: &str) -> Bound<String> {
    if key.is_empty() {
        Unbounded
    } else {
        Included(key.to_string())
    }
}

fn upper_bound(key: &str) -> Bound<String> {
    if key.is_empty() {
        Unbounded
    } else {
        Excluded(key.to_string())
    }
}

impl ChaincodeStub for BTreeStub {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| ContextError::StorageError("Ledger lock poisoned".into()))?;
        Ok(ledger.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), ContextError> {
        if key.is_empty() {
            return Err(ContextError::InvalidKey(
                "key must not be an empty string".into(),
            ));
        }
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| ContextError::StorageError("Ledger lock poisoned".into()))?;
        ledger.insert(key.to_string(), value);
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateQueryIterator>, ContextError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| ContextError::StorageError("Ledger lock poisoned".into()))?;

        // BTreeMap::range panics on an inverted range
        let entries = if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
            Vec::new()
        } else {
            ledger
                .range::<String, _>((lower_bound(start_key), upper_bound(end_key)))
                .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
                .collect()
        };

        Ok(Box::new(BTreeRangeIterator::new(entries)))
    }
}

/// A cursor over a snapshot of the entries matched by a range query.
pub struct BTreeRangeIterator {
    entries: std::vec::IntoIter<KeyValue>,
    peeked: Option<KeyValue>,
    closed: bool,
}

impl BTreeRangeIterator {
    fn new(entries: Vec<KeyValue>) -> Self {
        let mut entries = entries.into_iter();
        let peeked = entries.next();
        BTreeRangeIterator {
            entries,
            peeked,
            closed: false,
        }
    }
}

impl StateQueryIterator for BTreeRangeIterator {
    fn has_next(&self) -> bool {
        !self.closed && self.peeked.is_some()
    }

    fn next(&mut self) -> Result<KeyValue, ContextError> {
        if self.closed {
            return Err(ContextError::CursorError("iterator is closed".into()));
        }
        let entry = self
            .peeked
            .take()
            .ok_or_else(|| ContextError::CursorError("no more entries".into()))?;
        self.peeked = self.entries.next();
        Ok(entry)
    }

    fn close(&mut self) -> Result<(), ContextError> {
        self.closed = true;
        self.peeked = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_stub(keys: &[&str]) -> BTreeStub {
        BTreeStub::with_entries(
            keys.iter()
                .map(|key| (key.to_string(), format!("value_{}", key).into_bytes())),
        )
    }

    fn collect_keys(stub: &BTreeStub, start: &str, end: &str) -> Vec<String> {
        let mut iterator = stub.get_state_by_range(start, end).unwrap();
        let mut keys = Vec::new();
        while iterator.has_next() {
            keys.push(iterator.next().unwrap().key().to_string());
        }
        iterator.close().unwrap();
        keys
    }

    #[test]
    fn test_get_and_put() {
        let stub = BTreeStub::new();
        assert!(stub.is_empty().unwrap());
        assert_eq!(None, stub.get_state("a").unwrap());

        stub.put_state("a", b"value_a".to_vec()).unwrap();
        assert_eq!(Some(b"value_a".to_vec()), stub.get_state("a").unwrap());

        stub.put_state("a", b"value_b".to_vec()).unwrap();
        assert_eq!(Some(b"value_b".to_vec()), stub.get_state("a").unwrap());
        assert_eq!(1, stub.len().unwrap());

        // clones see the same ledger
        let other = stub.clone();
        other.put_state("b", vec![]).unwrap();
        assert_eq!(Some(vec![]), stub.get_state("b").unwrap());
    }

    #[test]
    fn test_put_rejects_empty_key() {
        let stub = BTreeStub::new();
        match stub.put_state("", b"value".to_vec()) {
            Err(ContextError::InvalidKey(_)) => (),
            res => panic!("Expected InvalidKey, got {:?}", res),
        }
        assert!(stub.is_empty().unwrap());
    }

    /// Range queries include the start key, exclude the end key, and treat empty bounds as
    /// open.
    #[test]
    fn test_range_bounds() {
        let stub = make_stub(&["000", "001", "150", "998", "999", "a"]);

        assert_eq!(
            vec!["001", "150", "998"],
            collect_keys(&stub, "001", "999")
        );
        assert_eq!(
            vec!["000", "001", "150"],
            collect_keys(&stub, "", "151")
        );
        assert_eq!(vec!["999", "a"], collect_keys(&stub, "999", ""));
        assert_eq!(6, collect_keys(&stub, "", "").len());
        assert!(collect_keys(&stub, "500", "200").is_empty());
        assert!(collect_keys(&stub, "150", "150").is_empty());
    }

    #[test]
    fn test_iterator_close() {
        let stub = make_stub(&["001", "002"]);
        let mut iterator = stub.get_state_by_range("001", "999").unwrap();
        assert!(iterator.has_next());
        assert_eq!("001", iterator.next().unwrap().key());

        iterator.close().unwrap();
        assert!(!iterator.has_next());
        match iterator.next() {
            Err(ContextError::CursorError(_)) => (),
            res => panic!("Expected CursorError, got {:?}", res),
        }
    }

    /// Writes made after a range query is opened are not seen by its cursor.
    #[test]
    fn test_iterator_snapshot() {
        let stub = make_stub(&["001"]);
        let mut iterator = stub.get_state_by_range("001", "999").unwrap();
        stub.put_state("002", b"value_002".to_vec()).unwrap();

        assert_eq!("001", iterator.next().unwrap().key());
        assert!(!iterator.has_next());
    }
}
