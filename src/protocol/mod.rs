// Copyright 2019 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Native types for the records kept on the ledger, and their conversion to and from the JSON
//! bytes stored by the host.

pub mod query;
pub mod vehicle;

use std::error::Error as StdError;

pub trait FromBytes<T>: Sized {
    fn from_bytes(bytes: &[u8]) -> Result<T, ConversionError>;
}

pub trait IntoBytes: Sized {
    fn into_bytes(self) -> Result<Vec<u8>, ConversionError>;
}

#[derive(Debug)]
pub enum ConversionError {
    SerializationError(String),
    DeserializationError(String),
}

impl StdError for ConversionError {}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ConversionError::SerializationError(ref s) => {
                write!(f, "SerializationError: {}", s)
            }
            ConversionError::DeserializationError(ref s) => {
                write!(f, "DeserializationError: {}", s)
            }
        }
    }
}
