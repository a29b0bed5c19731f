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

#[macro_use]
extern crate log;

mod error;

use clap::{App, AppSettings, Arg};
use log::LevelFilter;

use blockbox::families::vehicle::{VehicleChaincode, INIT_LEDGER};
use blockbox::handler::{Chaincode, Invocation, Response};
use blockbox::state::btree::BTreeStub;

use crate::error::BlockboxError;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    match run() {
        Ok(()) => (),
        Err(BlockboxError::ClapError(err)) => err.exit(),
        Err(e) => {
            error!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), BlockboxError> {
    let app = App::new(APP_NAME)
        .version(VERSION)
        .author("Cargill")
        .about("Runs the vehicle chaincode against an in-memory ledger")
        .setting(AppSettings::TrailingVarArg)
        .arg(
            Arg::with_name("verbose")
                .help("Log verbosely")
                .short("v")
                .multiple(true),
        )
        .arg(
            Arg::with_name("skip_init")
                .long("skip-init")
                .help("Do not seed the ledger with initLedger before the invocation"),
        )
        .arg(
            Arg::with_name("function")
                .index(1)
                .required(true)
                .help("The chaincode function to invoke"),
        )
        .arg(
            Arg::with_name("args")
                .index(2)
                .multiple(true)
                .help("Arguments passed to the function"),
        );

    let matches = app.get_matches_safe()?;

    let logger = simple_logger::SimpleLogger::new()
        // Switch to UTC timestamps, as local timestamps are not stable, by default.
        .with_utc_timestamps();
    let logger = match matches.occurrences_of("verbose") {
        0 => logger.with_level(LevelFilter::Warn),
        1 => logger.with_level(LevelFilter::Info),
        2 => logger.with_level(LevelFilter::Debug),
        _ => logger.with_level(LevelFilter::Trace),
    };
    logger
        .init()
        .map_err(|err| BlockboxError::Internal(format!("Failed to create logger: {}", err)))?;

    let function = matches
        .value_of("function")
        .ok_or_else(|| BlockboxError::InvalidArgument("missing argument 'function'".into()))?;
    let args: Vec<String> = matches
        .values_of("args")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();

    let chaincode = VehicleChaincode::new();
    let mut stub = BTreeStub::new();

    payload_of("init", chaincode.init(&mut stub))?;

    if !matches.is_present("skip_init") && function != INIT_LEDGER {
        let response = chaincode.invoke(&Invocation::new(INIT_LEDGER, vec![]), &mut stub);
        payload_of(INIT_LEDGER, response)?;
    }

    let response = chaincode.invoke(&Invocation::new(function, args), &mut stub);
    let payload = payload_of(function, response)?;
    info!("{} returned {} bytes", function, payload.len());

    println!("{}", String::from_utf8_lossy(&payload));

    Ok(())
}

fn payload_of(function: &str, response: Response) -> Result<Vec<u8>, BlockboxError> {
    match response {
        Response::Success(payload) => Ok(payload),
        Response::Error(message) => Err(BlockboxError::InvocationFailed {
            function: function.to_string(),
            message,
        }),
    }
}
