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
use std::error::Error;

use crate::protocol::ConversionError;

#[derive(Debug)]
pub enum ChaincodeError {
    /// Returned when a function is invoked with the wrong number of arguments.
    InvalidArgumentCount { expected: usize, actual: usize },
    /// Returned when the invoked function name is not handled by the chaincode.
    UnknownFunction(String),
    /// Returned when a range query could not be opened or advanced.
    IterationError(ContextError),
    /// Returned when a single key read or write against the ledger fails.
    StoreError(ContextError),
    /// Returned when a record could not be converted to or from its stored form.
    SerializationError(ConversionError),
    /// Returned when an internal error occurs during invocation processing.
    InternalError(String),
}

impl Error for ChaincodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChaincodeError::InvalidArgumentCount { .. } => None,
            ChaincodeError::UnknownFunction(_) => None,
            ChaincodeError::IterationError(err) => Some(err),
            ChaincodeError::StoreError(err) => Some(err),
            ChaincodeError::SerializationError(err) => Some(err),
            ChaincodeError::InternalError(_) => None,
        }
    }
}

impl std::fmt::Display for ChaincodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ChaincodeError::InvalidArgumentCount { expected, actual } => write!(
                f,
                "Incorrect number of arguments. Expecting {}, received {}",
                expected, actual
            ),
            ChaincodeError::UnknownFunction(ref name) => {
                write!(f, "Invalid Smart Contract function name: {}", name)
            }
            ChaincodeError::IterationError(ref err) => write!(f, "IterationError: {}", err),
            ChaincodeError::StoreError(ref err) => write!(f, "StoreError: {}", err),
            ChaincodeError::SerializationError(ref err) => {
                write!(f, "SerializationError: {}", err)
            }
            ChaincodeError::InternalError(ref s) => write!(f, "InternalError: {}", s),
        }
    }
}

impl From<ContextError> for ChaincodeError {
    fn from(context_error: ContextError) -> Self {
        ChaincodeError::StoreError(context_error)
    }
}

impl From<ConversionError> for ChaincodeError {
    fn from(conversion_error: ConversionError) -> Self {
        ChaincodeError::SerializationError(conversion_error)
    }
}

#[derive(Debug)]
pub enum ContextError {
    /// Returned when the ledger refuses a key
    InvalidKey(String),
    /// Returned when the underlying ledger could not be read or written
    StorageError(String),
    /// Returned when a range query cursor fails
    CursorError(String),
}

impl Error for ContextError {}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ContextError::InvalidKey(ref s) => write!(f, "InvalidKey: {}", s),
            ContextError::StorageError(ref s) => write!(f, "StorageError: {}", s),
            ContextError::CursorError(ref s) => write!(f, "CursorError: {}", s),
        }
    }
}
