// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::*;
use serde_json::{Map, Value};

use crate::telematics::{FetchError, HUMIDITY_PATH, TEMPERATURE_PATH};

/// One entry of the sensor history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorHistoryPoint {
    /// Unix timestamp in milliseconds.
    pub time_ms: i64,

    /// `(humidity percent, ambient temperature in millidegrees Celsius)`.
    /// A sensor that did not report leaves `null`.
    pub series: (Option<f64>, Option<f64>),
}

impl SensorHistoryPoint {
    pub fn humidity_percent(&self) -> Option<f64> {
        self.series.0
    }

    pub fn ambient_millidegrees(&self) -> Option<f64> {
        self.series.1
    }
}

#[derive(Deserialize, Debug)]
pub struct HistoryResponse {
    pub results: Vec<SensorHistoryPoint>,
}

/// A fleet vehicle. Only the display fields are typed; the rest of the record is
/// kept as it came. Missing or `null` display fields read as empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VehicleRecord {
    #[serde(default, deserialize_with = "deserialize_display_text")]
    pub year: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub make: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub model: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VehicleRecord {
    /// `"{year} {make} {model}"`, as shown in the live status header.
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// A string, a number rendered as text, or empty for `null`.
fn deserialize_display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

#[derive(Deserialize, Debug)]
pub struct VehiclesResponse {
    pub data: Vec<VehicleRecord>,
}

/// Door status payload. The upstream shape is not interpreted: any truthy
/// value means the door is closed.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct DoorStatus(pub Value);

impl DoorStatus {
    pub fn is_closed(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(closed) => *closed,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureReading {
    /// Millidegrees Celsius. Usually whole, but any JSON number is accepted.
    pub ambient_temperature: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TemperatureResponse {
    pub sensors: Vec<TemperatureReading>,
}

impl TemperatureResponse {
    /// Ambient temperature of the first sensor, in millidegrees Celsius.
    pub fn ambient_millidegrees(&self) -> Result<f64, FetchError> {
        self.sensors
            .first()
            .map(|sensor| sensor.ambient_temperature)
            .ok_or(FetchError::MissingField {
                path: TEMPERATURE_PATH,
                field: "sensors[0].ambientTemperature",
            })
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct HumidityReading {
    /// Relative humidity in percent.
    pub humidity: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct HumidityResponse {
    pub sensors: Vec<HumidityReading>,
}

impl HumidityResponse {
    pub fn humidity_percent(&self) -> Result<f64, FetchError> {
        self.sensors
            .first()
            .map(|sensor| sensor.humidity)
            .ok_or(FetchError::MissingField {
                path: HUMIDITY_PATH,
                field: "sensors[0].humidity",
            })
    }
}

#[test]
fn test_history_point_decodes_series_pair() {
    let json = r#"{ "results": [ { "timeMs": 1700000000000, "series": [45.5, 21500] } ] }"#;
    let history = serde_json::from_str::<HistoryResponse>(json).unwrap();

    assert_eq!(history.results.len(), 1);
    assert_eq!(history.results[0].time_ms, 1_700_000_000_000);
    assert_eq!(history.results[0].humidity_percent(), Some(45.5));
    assert_eq!(history.results[0].ambient_millidegrees(), Some(21_500.0));
}

#[test]
fn test_history_keeps_points_with_null_readings() {
    let json = r#"{ "results": [
        { "timeMs": 1700000000000, "series": [45.5, 21500] },
        { "timeMs": 1700000060000, "series": [null, 21750] },
        { "timeMs": 1700000120000, "series": [46.0, null] }
    ] }"#;
    let history = serde_json::from_str::<HistoryResponse>(json).unwrap();

    assert_eq!(history.results.len(), 3);
    assert_eq!(history.results[1].humidity_percent(), None);
    assert_eq!(history.results[1].ambient_millidegrees(), Some(21_750.0));
    assert_eq!(history.results[2].humidity_percent(), Some(46.0));
    assert_eq!(history.results[2].ambient_millidegrees(), None);
}

#[test]
fn test_vehicle_year_accepts_string_or_number() {
    let json = r#"{ "data": [
        { "id": "212014918086169", "year": "2019", "make": "Ford", "model": "Transit" },
        { "year": 2021, "make": "Freightliner", "model": "M2" }
    ] }"#;
    let vehicles = serde_json::from_str::<VehiclesResponse>(json).unwrap();

    assert_eq!(vehicles.data[0].title(), "2019 Ford Transit");
    assert_eq!(vehicles.data[0].extra["id"], "212014918086169");
    assert_eq!(vehicles.data[1].title(), "2021 Freightliner M2");
}

#[test]
fn test_null_vehicle_fields_read_as_empty() {
    let json = r#"{ "data": [
        { "year": "2019", "make": "Ford", "model": "Transit" },
        { "year": null, "make": null, "model": "M2" },
        { "model": null }
    ] }"#;
    let vehicles = serde_json::from_str::<VehiclesResponse>(json).unwrap();

    assert_eq!(vehicles.data.len(), 3);
    assert_eq!(vehicles.data[0].title(), "2019 Ford Transit");
    assert_eq!(vehicles.data[1].year, "");
    assert_eq!(vehicles.data[1].make, "");
    assert_eq!(vehicles.data[1].model, "M2");
    assert_eq!(vehicles.data[2], VehicleRecord::default());
}

#[test]
fn test_door_status_truthiness() {
    use serde_json::json;

    let closed = [json!(true), json!(1), json!(-0.5), json!("closed"), json!({}), json!([])];
    for value in closed {
        assert!(DoorStatus(value.clone()).is_closed(), "{value}");
    }

    let open = [json!(null), json!(false), json!(0), json!(0.0), json!("")];
    for value in open {
        assert!(!DoorStatus(value.clone()).is_closed(), "{value}");
    }
}

#[test]
fn test_empty_sensor_lists_are_missing_fields() {
    let temperature = serde_json::from_str::<TemperatureResponse>(r#"{ "sensors": [] }"#).unwrap();
    assert!(matches!(
        temperature.ambient_millidegrees(),
        Err(FetchError::MissingField { path: TEMPERATURE_PATH, .. })
    ));

    let humidity = serde_json::from_str::<HumidityResponse>(r#"{ "sensors": [] }"#).unwrap();
    assert!(matches!(
        humidity.humidity_percent(),
        Err(FetchError::MissingField { path: HUMIDITY_PATH, .. })
    ));
}

#[test]
fn test_first_sensor_wins() {
    let json = r#"{ "sensors": [ { "ambientTemperature": 23000 }, { "ambientTemperature": 1 } ] }"#;
    let temperature = serde_json::from_str::<TemperatureResponse>(json).unwrap();
    assert_eq!(temperature.ambient_millidegrees().unwrap(), 23_000.0);
}

#[test]
fn test_fractional_temperature_decodes() {
    let json = r#"{ "sensors": [ { "ambientTemperature": 23000.0 } ] }"#;
    let temperature = serde_json::from_str::<TemperatureResponse>(json).unwrap();
    assert_eq!(temperature.ambient_millidegrees().unwrap(), 23_000.0);

    let json = r#"{ "sensors": [ { "ambientTemperature": 21437.5 } ] }"#;
    let temperature = serde_json::from_str::<TemperatureResponse>(json).unwrap();
    assert_eq!(temperature.ambient_millidegrees().unwrap(), 21_437.5);
}
