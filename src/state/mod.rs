/*
 * Copyright 2018 Bitwise IO, Inc.
 * Copyright 2019 Cargill Incorporated
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

//! Methods for interacting with ledger state.
//!
//! Ledger state is owned by the host and reached through a `ChaincodeStub`. This module provides
//! an in-memory stub, and a guard that ties the lifetime of a range query cursor to a scope.

pub mod btree;

use crate::handler::{ContextError, KeyValue, StateQueryIterator};

/// Owns a range query cursor and closes it when dropped.
///
/// Every exit from the scope holding the guard, including early returns through `?`, releases
/// the cursor. A failure to close is logged, as there is no caller left to report it to.
pub struct ClosingIterator {
    inner: Box<dyn StateQueryIterator>,
}

impl ClosingIterator {
    pub fn new(inner: Box<dyn StateQueryIterator>) -> Self {
        ClosingIterator { inner }
    }

    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    pub fn next_entry(&mut self) -> Result<KeyValue, ContextError> {
        self.inner.next()
    }
}

impl Drop for ClosingIterator {
    fn drop(&mut self) {
        if let Err(err) = self.inner.close() {
            warn!("Unable to close range query iterator: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct FlagIterator {
        closed: Arc<AtomicBool>,
    }

    impl StateQueryIterator for FlagIterator {
        fn has_next(&self) -> bool {
            true
        }

        fn next(&mut self) -> Result<KeyValue, ContextError> {
            Err(ContextError::CursorError("broken".into()))
        }

        fn close(&mut self) -> Result<(), ContextError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn read_first(iterator: &mut ClosingIterator) -> Result<KeyValue, ContextError> {
        let entry = iterator.next_entry()?;
        Ok(entry)
    }

    #[test]
    fn test_closes_on_early_return() {
        let closed = Arc::new(AtomicBool::new(false));
        {
            let mut iterator = ClosingIterator::new(Box::new(FlagIterator {
                closed: closed.clone(),
            }));
            assert!(iterator.has_next());
            assert!(read_first(&mut iterator).is_err());
            assert!(!closed.load(Ordering::SeqCst));
        }
        assert!(closed.load(Ordering::SeqCst));
    }
}
