/*
 * Copyright 2017 Bitwise IO, Inc.
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

//! Traits for invoking a chaincode against a host ledger.
//!
//! The Chaincode trait provides the interface for implementing smart contracts. Chaincodes must
//! be stateless and deterministic. Each invocation is handed, along with the requested function
//! and its arguments, a ChaincodeStub implementation which provides access to reading and writing
//! ledger state.

mod error;

pub use crate::handler::error::{ChaincodeError, ContextError};

/// A single ledger entry, as yielded by a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: String, value: Vec<u8>) -> Self {
        KeyValue { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.key, self.value)
    }
}

/// A cursor over the results of a range query.
///
/// Cursors hold host resources; callers must call `close` once they are done, whether or not the
/// iteration completed.
pub trait StateQueryIterator {
    /// has_next returns true while the cursor has entries left to yield.
    fn has_next(&self) -> bool;

    /// next returns the next entry in key order.
    fn next(&mut self) -> Result<KeyValue, ContextError>;

    /// close releases the resources held by the cursor. Once closed, a cursor yields no more
    /// entries.
    fn close(&mut self) -> Result<(), ContextError>;
}

pub trait ChaincodeStub {
    /// get_state queries the ledger for the value stored at the given key. If the key is not set,
    /// None is returned.
    ///
    /// # Arguments
    ///
    /// * `key` - the key to fetch
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError>;

    /// put_state requests that the provided key is set in the ledger to the given value.
    ///
    /// # Arguments
    ///
    /// * `key` - key under which to store the data
    /// * `value` - the data to store at the key
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), ContextError>;

    /// get_state_by_range returns a cursor over the entries whose keys fall in the half-open
    /// interval `[start_key, end_key)`, in lexicographic key order. An empty bound leaves that
    /// side of the interval open.
    ///
    /// # Arguments
    ///
    /// * `start_key` - the first key to include
    /// * `end_key` - the first key to exclude
    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateQueryIterator>, ContextError>;
}

/// A request to run one named chaincode function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    function: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new<F: Into<String>>(function: F, args: Vec<String>) -> Self {
        Invocation {
            function: function.into(),
            args,
        }
    }

    /// Splits a host-style argument list, where the first element names the function and the
    /// remainder are its parameters. An empty list yields an empty function name.
    pub fn from_args(mut args: Vec<String>) -> Self {
        if args.is_empty() {
            return Invocation::new(String::new(), args);
        }
        let function = args.remove(0);
        Invocation::new(function, args)
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// The outcome of an invocation as seen by the host: either a payload or a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(Vec<u8>),
    Error(String),
}

impl Response {
    pub fn is_success(&self) -> bool {
        match self {
            Response::Success(_) => true,
            Response::Error(_) => false,
        }
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success(payload) => Some(payload.as_slice()),
            Response::Error(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(message) => Some(message.as_str()),
        }
    }
}

impl From<Result<Vec<u8>, ChaincodeError>> for Response {
    fn from(result: Result<Vec<u8>, ChaincodeError>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(err) => Response::Error(err.to_string()),
        }
    }
}

pub trait Chaincode: Send {
    /// init is called once when the chaincode is instantiated on the ledger.
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    /// invoke is the single method through which all business logic of the chaincode is
    /// reached. The host calls it once per transaction with the requested function, its
    /// arguments, and a stub scoped to that transaction.
    fn invoke(&self, invocation: &Invocation, stub: &mut dyn ChaincodeStub) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_from_args() {
        let invocation = Invocation::from_args(vec!["queryVehicle".into(), "001".into()]);
        assert_eq!("queryVehicle", invocation.function());
        assert_eq!(vec!["001".to_string()], invocation.args().to_vec());

        let empty = Invocation::from_args(vec![]);
        assert_eq!("", empty.function());
        assert!(empty.args().is_empty());
    }

    #[test]
    fn test_response_from_result() {
        let result: Result<Vec<u8>, ChaincodeError> = Ok(b"payload".to_vec());
        let success = Response::from(result);
        assert!(success.is_success());
        assert_eq!(Some(&b"payload"[..]), success.payload());
        assert_eq!(None, success.message());

        let result: Result<Vec<u8>, ChaincodeError> =
            Err(ChaincodeError::UnknownFunction("drive".into()));
        let failure = Response::from(result);
        assert!(!failure.is_success());
        assert_eq!(None, failure.payload());
        assert_eq!(
            Some("Invalid Smart Contract function name: drive"),
            failure.message()
        );
    }
}
