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

//! Defines the vehicle family implementation of `Chaincode`.
//!
//! The following are the functions that can be invoked on the [`VehicleChaincode`], with a
//! brief explanation of what they do:
//!
//! queryVehicle - Return the record stored under the single given key
//! queryAllVehicles - Return every record in the vehicle key range as a JSON array
//! initLedger - Write the seeded sample vehicles

pub mod seed;

use std::error::Error as StdError;

use crate::handler::{Chaincode, ChaincodeError, ChaincodeStub, Invocation, Response};
use crate::protocol::query::{QueryResult, QueryResultList};
use crate::protocol::IntoBytes;
use crate::state::ClosingIterator;

pub const QUERY_VEHICLE: &str = "queryVehicle";
pub const QUERY_ALL_VEHICLES: &str = "queryAllVehicles";
pub const INIT_LEDGER: &str = "initLedger";

const DEFAULT_RANGE_START: &str = "001";
const DEFAULT_RANGE_END: &str = "999";

/// A sample vehicle written by `initLedger`: the key it is stored under and the seed its
/// timestamps are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedVehicle {
    id: String,
    seed: String,
}

impl SeedVehicle {
    pub fn new<I: Into<String>, S: Into<String>>(id: I, seed: S) -> Self {
        SeedVehicle {
            id: id.into(),
            seed: seed.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

fn default_seeds() -> Vec<SeedVehicle> {
    vec![SeedVehicle::new("001", "rand1"), SeedVehicle::new("002", "rand2")]
}

/// The chaincode for the vehicle family.
#[derive(Debug, Clone)]
pub struct VehicleChaincode {
    range_start: String,
    range_end: String,
    seeds: Vec<SeedVehicle>,
}

impl Default for VehicleChaincode {
    fn default() -> Self {
        VehicleChaincode {
            range_start: DEFAULT_RANGE_START.to_string(),
            range_end: DEFAULT_RANGE_END.to_string(),
            seeds: default_seeds(),
        }
    }
}

impl VehicleChaincode {
    pub fn new() -> Self {
        VehicleChaincode::default()
    }

    /// Returns the half-open key range scanned by `queryAllVehicles`.
    pub fn key_range(&self) -> (&str, &str) {
        (&self.range_start, &self.range_end)
    }

    pub fn seeds(&self) -> &[SeedVehicle] {
        &self.seeds
    }

    /// Runs the requested function, returning its payload or a typed error.
    ///
    /// # Arguments
    ///
    /// * `invocation` - The function to run and its arguments
    /// * `stub` - The host's access to ledger state for this transaction
    pub fn execute(
        &self,
        invocation: &Invocation,
        stub: &mut dyn ChaincodeStub,
    ) -> Result<Vec<u8>, ChaincodeError> {
        debug!(
            "Vehicle chaincode invoked: {} {:?}",
            invocation.function(),
            invocation.args()
        );

        match invocation.function() {
            QUERY_VEHICLE => self.query_vehicle(invocation.args(), stub),
            INIT_LEDGER => self.init_ledger(stub),
            QUERY_ALL_VEHICLES => self.query_all_vehicles(stub),
            function => {
                warn!("Rejected invocation of unknown function {}", function);
                Err(ChaincodeError::UnknownFunction(function.to_string()))
            }
        }
    }

    fn query_vehicle(
        &self,
        args: &[String],
        stub: &mut dyn ChaincodeStub,
    ) -> Result<Vec<u8>, ChaincodeError> {
        if args.len() != 1 {
            warn!(
                "Rejected {}: expected 1 argument, received {}",
                QUERY_VEHICLE,
                args.len()
            );
            return Err(ChaincodeError::InvalidArgumentCount {
                expected: 1,
                actual: args.len(),
            });
        }

        // a missing key is indistinguishable from an empty record
        Ok(stub.get_state(&args[0])?.unwrap_or_default())
    }

    fn init_ledger(&self, stub: &mut dyn ChaincodeStub) -> Result<Vec<u8>, ChaincodeError> {
        for seed_vehicle in &self.seeds {
            let vehicle = seed::generate_vehicle(seed_vehicle.id(), seed_vehicle.seed())?;
            let id = vehicle.id().to_string();
            stub.put_state(&id, vehicle.into_bytes()?)?;
            info!(
                "Added vehicle {} from seed {}",
                id,
                seed_vehicle.seed()
            );
        }

        Ok(Vec::new())
    }

    fn query_all_vehicles(&self, stub: &mut dyn ChaincodeStub) -> Result<Vec<u8>, ChaincodeError> {
        let mut iterator = ClosingIterator::new(
            stub.get_state_by_range(&self.range_start, &self.range_end)
                .map_err(ChaincodeError::IterationError)?,
        );

        let mut results = QueryResultList::new();
        while iterator.has_next() {
            let entry = iterator
                .next_entry()
                .map_err(ChaincodeError::IterationError)?;
            results.push(QueryResult::from_key_value(entry)?);
        }

        let payload = results.into_bytes()?;
        debug!(
            "- {}:\n{}",
            QUERY_ALL_VEHICLES,
            String::from_utf8_lossy(&payload)
        );

        Ok(payload)
    }
}

impl Chaincode for VehicleChaincode {
    fn init(&self, _stub: &mut dyn ChaincodeStub) -> Response {
        Response::Success(Vec::new())
    }

    fn invoke(&self, invocation: &Invocation, stub: &mut dyn ChaincodeStub) -> Response {
        Response::from(self.execute(invocation, stub))
    }
}

#[derive(Debug)]
pub enum VehicleChaincodeBuildError {
    InvalidField(String),
}

impl StdError for VehicleChaincodeBuildError {}

impl std::fmt::Display for VehicleChaincodeBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            VehicleChaincodeBuildError::InvalidField(ref s) => write!(f, "Invalid field: {}", s),
        }
    }
}

/// Builder used to create a VehicleChaincode
#[derive(Default, Clone, Debug)]
pub struct VehicleChaincodeBuilder {
    range_start: Option<String>,
    range_end: Option<String>,
    seeds: Option<Vec<SeedVehicle>>,
}

impl VehicleChaincodeBuilder {
    pub fn new() -> Self {
        VehicleChaincodeBuilder::default()
    }

    /// Sets the half-open key range scanned by `queryAllVehicles`. Defaults to `["001", "999")`.
    pub fn with_key_range(mut self, start: String, end: String) -> VehicleChaincodeBuilder {
        self.range_start = Some(start);
        self.range_end = Some(end);
        self
    }

    /// Sets the vehicles written by `initLedger`. Defaults to `001` from `rand1` and `002` from
    /// `rand2`. Seeds sharing an id are written in order, so the last one wins.
    pub fn with_seeds(mut self, seeds: Vec<SeedVehicle>) -> VehicleChaincodeBuilder {
        self.seeds = Some(seeds);
        self
    }

    pub fn build(self) -> Result<VehicleChaincode, VehicleChaincodeBuildError> {
        let range_start = self
            .range_start
            .unwrap_or_else(|| DEFAULT_RANGE_START.to_string());
        let range_end = self
            .range_end
            .unwrap_or_else(|| DEFAULT_RANGE_END.to_string());
        let seeds = self.seeds.unwrap_or_else(default_seeds);

        if !range_start.is_empty() && !range_end.is_empty() && range_start > range_end {
            return Err(VehicleChaincodeBuildError::InvalidField(format!(
                "key range start {} is after its end {}",
                range_start, range_end
            )));
        }

        if seeds.is_empty() {
            return Err(VehicleChaincodeBuildError::InvalidField(
                "at least one seed vehicle is required".into(),
            ));
        }

        if let Some(seed_vehicle) = seeds.iter().find(|seed_vehicle| seed_vehicle.id().is_empty())
        {
            return Err(VehicleChaincodeBuildError::InvalidField(format!(
                "seed vehicle with seed {} has an empty id",
                seed_vehicle.seed()
            )));
        }

        Ok(VehicleChaincode {
            range_start,
            range_end,
            seeds,
        })
    }
}
