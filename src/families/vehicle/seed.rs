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

//! Deterministic generation of sample vehicles.
//!
//! A seed string is hashed with 64-bit FNV-1 and the hash seeds an HC-128 generator, which draws
//! the manufacture and last-update timestamps. Every other field carries a fixed sample value.
//! The generator is built fresh on each call, so generation never depends on earlier calls.

use chrono::{DateTime, TimeZone, Utc};
use rand::prelude::*;
use rand_hc::Hc128Rng;

use crate::handler::ChaincodeError;
use crate::protocol::vehicle::{
    Location, StaticInfo, SystemWarning, Tracking, TrackingInfo, Vehicle, VehicleBuilder,
};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Exclusive upper bound, in Unix seconds, of the generated timestamps.
pub const MAX_TIMESTAMP_SECS: i64 = 1_567_515_734;

/// Hashes the given bytes with 64-bit FNV-1 (multiply, then xor).
pub fn fnv1_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        hash.wrapping_mul(FNV_PRIME) ^ u64::from(*byte)
    })
}

fn random_timestamp(rng: &mut Hc128Rng) -> Result<DateTime<Utc>, ChaincodeError> {
    let secs = rng.gen_range(0, MAX_TIMESTAMP_SECS);
    Utc.timestamp_opt(secs, 0).single().ok_or_else(|| {
        ChaincodeError::InternalError(format!("Generated timestamp {} is out of range", secs))
    })
}

/// Generates the sample vehicle for the given id and seed.
///
/// The seed only determines the two timestamps; the same seed always yields the same vehicle.
pub fn generate_vehicle(id: &str, seed: &str) -> Result<Vehicle, ChaincodeError> {
    let mut rng = Hc128Rng::seed_from_u64(fnv1_64(seed.as_bytes()));

    let make_date = random_timestamp(&mut rng)?;
    let update_date = random_timestamp(&mut rng)?;

    let tracking_info = TrackingInfo {
        mil_time: vec![Tracking::new(update_date, 300)],
        battery_charge_level: vec![Tracking::new(update_date, 40.0)],
        battery_charging_status: vec![Tracking::new(update_date, "charging".to_string())],
        charges: vec![Tracking::new(update_date, 30)],
        coolant_temp: vec![Tracking::new(update_date, 60.5)],
        engine_load: vec![Tracking::new(update_date, 400.0)],
        engine_runtime: vec![Tracking::new(update_date, 259)],
        fuel_level: vec![Tracking::new(update_date, 80.6)],
        kilowatt_km: vec![Tracking::new(update_date, 300)],
        location: vec![Tracking::new(
            update_date,
            Location::new("location", 30.0, 30.0),
        )],
        lock_status: vec![Tracking::new(update_date, false)],
        outside_temp: vec![Tracking::new(update_date, 40.0)],
        rpm: vec![Tracking::new(update_date, 3000)],
        speed: vec![Tracking::new(update_date, 80)],
        throttle_pos: vec![Tracking::new(update_date, 30.0)],
    };

    let static_info = StaticInfo {
        brand: "VW".into(),
        consumption: 30.0,
        displacement: 40,
        engine: "e".into(),
        make: make_date,
        model: "Polo".into(),
        weight: 2000,
    };

    let oil_pressure = SystemWarning::new("Oil Pressure", update_date, true);
    let low_fuel = SystemWarning::new("Low Fuel Indicator", update_date, false);
    let abs_break = SystemWarning::new("ABS Break", update_date, false);
    let high_rpm = SystemWarning::new("High RPM", update_date, true);

    VehicleBuilder::new()
        .with_id(id.to_string())
        .with_department("ABC".into())
        .with_vin("VW-01-NM".into())
        .with_picture("Picture1".into())
        .with_static_info(static_info)
        .with_tracking_info(tracking_info)
        .with_system_warnings(vec![
            oil_pressure.clone(),
            high_rpm.clone(),
            oil_pressure,
        ])
        .with_system_errors(vec![low_fuel, abs_break, high_rpm])
        .build()
        .map_err(|err| ChaincodeError::InternalError(format!("Unable to build vehicle: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1_64() {
        assert_eq!(0xcbf2_9ce4_8422_2325, fnv1_64(b""));
        assert_eq!(0xaf63_bd4c_8601_b7be, fnv1_64(b"a"));
        assert_eq!(0x340d_8765_a4dd_a9c2, fnv1_64(b"foobar"));
        assert_eq!(0x5c6a_7336_71cc_9cb1, fnv1_64(b"rand1"));
    }

    /// The same seed yields the same vehicle on every call.
    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_vehicle("001", "rand1").unwrap();
        let second = generate_vehicle("001", "rand1").unwrap();
        assert_eq!(first, second);
    }

    /// The seed only moves the timestamps; the id comes from the caller.
    #[test]
    fn test_seed_moves_timestamps_only() {
        let first = generate_vehicle("001", "rand1").unwrap();
        let second = generate_vehicle("002", "rand2").unwrap();

        assert_eq!("001", first.id());
        assert_eq!("002", second.id());
        assert_ne!(first.static_info().make, second.static_info().make);
        assert_ne!(
            first.tracking_info().speed[0].timestamp,
            second.tracking_info().speed[0].timestamp
        );
        assert_eq!(first.vin(), second.vin());
        assert_eq!(
            first.tracking_info().speed[0].value,
            second.tracking_info().speed[0].value
        );
    }

    #[test]
    fn test_sample_values() {
        let vehicle = generate_vehicle("001", "rand1").unwrap();
        let update_date = vehicle.tracking_info().speed[0].timestamp;
        let make_date = vehicle.static_info().make;

        for date in &[update_date, make_date] {
            assert!(date.timestamp() >= 0);
            assert!(date.timestamp() < MAX_TIMESTAMP_SECS);
        }

        assert_eq!("ABC", vehicle.department());
        assert_eq!("VW-01-NM", vehicle.vin());
        assert_eq!("Picture1", vehicle.picture());
        assert_eq!("Polo", vehicle.static_info().model);
        assert_eq!(2000, vehicle.static_info().weight);

        let tracking = vehicle.tracking_info();
        assert_eq!(3000, tracking.rpm[0].value);
        assert_eq!(60.5, tracking.coolant_temp[0].value);
        assert_eq!("charging", tracking.battery_charging_status[0].value);
        assert_eq!(30.0, tracking.location[0].value.latitude());
        assert!(!tracking.lock_status[0].value);
        assert_eq!(update_date, tracking.throttle_pos[0].timestamp);

        let warnings: Vec<(&str, bool)> = vehicle
            .system_warnings()
            .iter()
            .map(|w| (w.cause.as_str(), w.critical))
            .collect();
        assert_eq!(
            vec![("Oil Pressure", true), ("High RPM", true), ("Oil Pressure", true)],
            warnings
        );

        let errors: Vec<(&str, bool)> = vehicle
            .system_errors()
            .iter()
            .map(|w| (w.cause.as_str(), w.critical))
            .collect();
        assert_eq!(
            vec![
                ("Low Fuel Indicator", false),
                ("ABS Break", false),
                ("High RPM", true)
            ],
            errors
        );
        assert!(vehicle
            .system_errors()
            .iter()
            .all(|w| w.date == update_date));
    }
}
