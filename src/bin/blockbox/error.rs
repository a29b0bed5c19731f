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
// limitations under the License

use std::error::Error;
use std::fmt;

use clap::Error as ClapError;

#[derive(Debug)]
pub enum BlockboxError {
    /// An error was detected by `clap`.
    ClapError(ClapError),
    /// An argument passed on the command line did not conform to the expected format.
    InvalidArgument(String),
    /// The chaincode answered an invocation with an error response.
    InvocationFailed { function: String, message: String },
    /// A failure occurred within the runner itself.
    Internal(String),
}

impl Error for BlockboxError {}

impl fmt::Display for BlockboxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockboxError::ClapError(err) => f.write_str(&err.message),
            BlockboxError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BlockboxError::InvocationFailed { function, message } => {
                write!(f, "{} failed: {}", function, message)
            }
            BlockboxError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<ClapError> for BlockboxError {
    fn from(err: ClapError) -> Self {
        Self::ClapError(err)
    }
}
