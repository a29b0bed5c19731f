/*
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

//! A sample chaincode that keeps vehicle records, with static attributes and time-series
//! telemetry, in a ledger owned by a host platform.
//!
//! The chaincode itself is stateless. Every read and write goes through the
//! [`ChaincodeStub`](handler::ChaincodeStub) the host hands to each invocation; the
//! [`state::btree`] module provides an in-memory stub for running the chaincode without a peer.

pub mod families;
pub mod handler;
pub mod protocol;
pub mod state;

#[macro_use]
extern crate log;
