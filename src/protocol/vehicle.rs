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

use std::error::Error as StdError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::protocol::{ConversionError, FromBytes, IntoBytes};

/// A timestamped sample on one telemetry channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracking<T> {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "v")]
    pub value: T,
}

impl<T> Tracking<T> {
    pub fn new(timestamp: DateTime<Utc>, value: T) -> Self {
        Tracking { timestamp, value }
    }
}

pub type IntTracking = Tracking<i64>;
pub type FloatTracking = Tracking<f32>;
pub type StringTracking = Tracking<String>;
pub type BoolTracking = Tracking<bool>;
pub type GeoTracking = Tracking<Location>;

/// A GeoJSON-style point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type")]
    pub geo_json_type: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl Location {
    pub fn new<S: Into<String>>(geo_json_type: S, longitude: f64, latitude: f64) -> Self {
        Location {
            geo_json_type: geo_json_type.into(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// The telemetry channels recorded for a vehicle. Samples within a channel are expected in
/// non-decreasing timestamp order; nothing here enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub mil_time: Vec<IntTracking>,
    pub battery_charge_level: Vec<FloatTracking>,
    pub battery_charging_status: Vec<StringTracking>,
    pub charges: Vec<IntTracking>,
    pub coolant_temp: Vec<FloatTracking>,
    pub engine_load: Vec<FloatTracking>,
    pub engine_runtime: Vec<IntTracking>,
    pub fuel_level: Vec<FloatTracking>,
    #[serde(rename = "kilowattKM")]
    pub kilowatt_km: Vec<IntTracking>,
    pub location: Vec<GeoTracking>,
    pub lock_status: Vec<BoolTracking>,
    pub outside_temp: Vec<FloatTracking>,
    pub rpm: Vec<IntTracking>,
    pub speed: Vec<IntTracking>,
    pub throttle_pos: Vec<FloatTracking>,
}

/// Descriptive attributes that do not change over a vehicle's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticInfo {
    pub brand: String,
    pub consumption: f32,
    pub displacement: i64,
    pub engine: String,
    /// Manufacture date
    pub make: DateTime<Utc>,
    pub model: String,
    pub weight: i64,
}

impl Default for StaticInfo {
    fn default() -> Self {
        StaticInfo {
            brand: String::new(),
            consumption: 0.0,
            displacement: 0,
            engine: String::new(),
            make: DateTime::<Utc>::from(std::time::UNIX_EPOCH),
            model: String::new(),
            weight: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemWarning {
    pub cause: String,
    pub date: DateTime<Utc>,
    pub critical: bool,
}

impl SystemWarning {
    pub fn new<S: Into<String>>(cause: S, date: DateTime<Utc>, critical: bool) -> Self {
        SystemWarning {
            cause: cause.into(),
            date,
            critical,
        }
    }
}

/// Native implementation of a vehicle record, as stored on the ledger under its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    department: String,
    vin: String,
    picture: String,
    #[serde(rename = "staticInfo")]
    static_info: StaticInfo,
    #[serde(rename = "trackingInfo")]
    tracking_info: TrackingInfo,
    #[serde(rename = "warnings")]
    system_warnings: Vec<SystemWarning>,
    #[serde(rename = "errors")]
    system_errors: Vec<SystemWarning>,
}

impl Vehicle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    pub fn picture(&self) -> &str {
        &self.picture
    }

    pub fn static_info(&self) -> &StaticInfo {
        &self.static_info
    }

    pub fn tracking_info(&self) -> &TrackingInfo {
        &self.tracking_info
    }

    pub fn system_warnings(&self) -> &[SystemWarning] {
        &self.system_warnings
    }

    pub fn system_errors(&self) -> &[SystemWarning] {
        &self.system_errors
    }
}

impl FromBytes<Vehicle> for Vehicle {
    fn from_bytes(bytes: &[u8]) -> Result<Vehicle, ConversionError> {
        serde_json::from_slice(bytes).map_err(|err| {
            ConversionError::DeserializationError(format!(
                "Unable to get Vehicle from bytes: {}",
                err
            ))
        })
    }
}

impl IntoBytes for Vehicle {
    fn into_bytes(self) -> Result<Vec<u8>, ConversionError> {
        serde_json::to_vec(&self).map_err(|err| {
            ConversionError::SerializationError(format!(
                "Unable to get bytes from Vehicle: {}",
                err
            ))
        })
    }
}

#[derive(Debug)]
pub enum VehicleBuildError {
    MissingField(String),
}

impl StdError for VehicleBuildError {}

impl std::fmt::Display for VehicleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            VehicleBuildError::MissingField(ref s) => write!(f, "'{}' field is required", s),
        }
    }
}

/// Builder used to create a Vehicle
#[derive(Default, Clone, Debug)]
pub struct VehicleBuilder {
    id: Option<String>,
    department: Option<String>,
    vin: Option<String>,
    picture: Option<String>,
    static_info: Option<StaticInfo>,
    tracking_info: Option<TrackingInfo>,
    system_warnings: Vec<SystemWarning>,
    system_errors: Vec<SystemWarning>,
}

impl VehicleBuilder {
    pub fn new() -> Self {
        VehicleBuilder::default()
    }

    pub fn with_id(mut self, id: String) -> VehicleBuilder {
        self.id = Some(id);
        self
    }

    pub fn with_department(mut self, department: String) -> VehicleBuilder {
        self.department = Some(department);
        self
    }

    pub fn with_vin(mut self, vin: String) -> VehicleBuilder {
        self.vin = Some(vin);
        self
    }

    pub fn with_picture(mut self, picture: String) -> VehicleBuilder {
        self.picture = Some(picture);
        self
    }

    pub fn with_static_info(mut self, static_info: StaticInfo) -> VehicleBuilder {
        self.static_info = Some(static_info);
        self
    }

    pub fn with_tracking_info(mut self, tracking_info: TrackingInfo) -> VehicleBuilder {
        self.tracking_info = Some(tracking_info);
        self
    }

    pub fn with_system_warnings(mut self, system_warnings: Vec<SystemWarning>) -> VehicleBuilder {
        self.system_warnings = system_warnings;
        self
    }

    pub fn with_system_errors(mut self, system_errors: Vec<SystemWarning>) -> VehicleBuilder {
        self.system_errors = system_errors;
        self
    }

    pub fn build(self) -> Result<Vehicle, VehicleBuildError> {
        let id = self
            .id
            .ok_or_else(|| VehicleBuildError::MissingField("id".to_string()))?;

        Ok(Vehicle {
            id,
            department: self.department.unwrap_or_default(),
            vin: self.vin.unwrap_or_default(),
            picture: self.picture.unwrap_or_default(),
            static_info: self.static_info.unwrap_or_default(),
            tracking_info: self.tracking_info.unwrap_or_default(),
            system_warnings: self.system_warnings,
            system_errors: self.system_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use serde_json::Value;

    fn timestamp(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn make_vehicle() -> Vehicle {
        let date = timestamp(1_500_000_000);
        let tracking_info = TrackingInfo {
            speed: vec![Tracking::new(date, 80)],
            location: vec![Tracking::new(date, Location::new("location", 30.0, 31.5))],
            lock_status: vec![Tracking::new(date, true)],
            ..Default::default()
        };

        VehicleBuilder::new()
            .with_id("042".into())
            .with_department("ABC".into())
            .with_vin("VW-01-NM".into())
            .with_static_info(StaticInfo {
                brand: "VW".into(),
                make: timestamp(1_000_000_000),
                ..Default::default()
            })
            .with_tracking_info(tracking_info)
            .with_system_warnings(vec![SystemWarning::new("High RPM", date, true)])
            .build()
            .expect("Unable to build vehicle")
    }

    /// Verify the JSON field names of a stored vehicle record.
    #[test]
    fn test_vehicle_json_layout() {
        let bytes = make_vehicle().into_bytes().expect("Unable to serialize");
        let json: Value = serde_json::from_slice(&bytes).expect("Not valid JSON");

        assert_eq!("042", json["id"]);
        assert_eq!("ABC", json["department"]);
        assert_eq!("VW-01-NM", json["vin"]);
        assert_eq!("", json["picture"]);
        assert_eq!("VW", json["staticInfo"]["brand"]);
        assert_eq!("2001-09-09T01:46:40Z", json["staticInfo"]["make"]);
        assert_eq!(80, json["trackingInfo"]["speed"][0]["v"]);
        assert_eq!(
            "2017-07-14T02:40:00Z",
            json["trackingInfo"]["speed"][0]["t"]
        );
        assert_eq!(
            "location",
            json["trackingInfo"]["location"][0]["v"]["type"]
        );
        assert_eq!(
            31.5,
            json["trackingInfo"]["location"][0]["v"]["coordinates"][1]
        );
        assert_eq!(true, json["trackingInfo"]["lockStatus"][0]["v"]);
        assert!(json["trackingInfo"]["milTime"].is_array());
        assert!(json["trackingInfo"]["kilowattKM"].is_array());
        assert!(json["trackingInfo"]["throttlePos"].is_array());
        assert_eq!("High RPM", json["warnings"][0]["cause"]);
        assert_eq!(true, json["warnings"][0]["critical"]);
        assert_eq!(0, json["errors"].as_array().map(Vec::len).unwrap_or(1));
    }

    #[test]
    fn test_vehicle_from_bytes() {
        let vehicle = make_vehicle();
        let bytes = vehicle.clone().into_bytes().expect("Unable to serialize");
        let parsed = Vehicle::from_bytes(&bytes).expect("Unable to deserialize");

        assert_eq!(vehicle, parsed);
        assert_eq!(30.0, parsed.tracking_info().location[0].value.longitude());
        assert_eq!(31.5, parsed.tracking_info().location[0].value.latitude());

        match Vehicle::from_bytes(b"{\"id\": 1}") {
            Err(ConversionError::DeserializationError(_)) => (),
            res => panic!("Expected DeserializationError, got {:?}", res),
        }
    }

    #[test]
    fn test_vehicle_builder_requires_id() {
        match VehicleBuilder::new().with_vin("VW-01-NM".into()).build() {
            Err(VehicleBuildError::MissingField(field)) => assert_eq!("id", field),
            res => panic!("Expected MissingField, got {:?}", res),
        }
    }
}
