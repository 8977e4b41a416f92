// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;

use crate::telematics::{
    DoorStatus, FetchError, HistoryResponse, HumidityResponse, SensorHistoryPoint,
    TelematicsSource, TemperatureResponse, VehicleRecord, VehiclesResponse, DOOR_STATUS_PATH,
    HISTORY_PATH, HUMIDITY_PATH, TEMPERATURE_PATH, VEHICLES_PATH,
};

/// Serves a bundled snapshot of proxy responses, for running without a proxy.
#[derive(Clone, Debug)]
pub struct DummyTelematicsSource {
    history: Vec<SensorHistoryPoint>,
    vehicles: Vec<VehicleRecord>,
    door_status: DoorStatus,
    temperature: TemperatureResponse,
    humidity: HumidityResponse,
}

fn parse<T: DeserializeOwned>(path: &'static str, json: &str) -> Result<T, FetchError> {
    serde_json::from_str::<T>(json).map_err(|source| FetchError::Decode { path, source })
}

impl DummyTelematicsSource {
    pub fn new() -> Result<Self, FetchError> {
        let history: HistoryResponse = parse(HISTORY_PATH, std::include_str!("./dummy/history.json"))?;
        let vehicles: VehiclesResponse = parse(VEHICLES_PATH, std::include_str!("./dummy/vehicles.json"))?;

        Ok(Self {
            history: history.results,
            vehicles: vehicles.data,
            door_status: parse(DOOR_STATUS_PATH, std::include_str!("./dummy/doorStatus.json"))?,
            temperature: parse(TEMPERATURE_PATH, std::include_str!("./dummy/temperature.json"))?,
            humidity: parse(HUMIDITY_PATH, std::include_str!("./dummy/humidity.json"))?,
        })
    }
}

impl TelematicsSource for DummyTelematicsSource {
    async fn history(&self) -> Result<Vec<SensorHistoryPoint>, FetchError> {
        Ok(self.history.clone())
    }

    async fn vehicles(&self) -> Result<Vec<VehicleRecord>, FetchError> {
        Ok(self.vehicles.clone())
    }

    async fn door_status(&self) -> Result<DoorStatus, FetchError> {
        Ok(self.door_status.clone())
    }

    async fn temperature(&self) -> Result<TemperatureResponse, FetchError> {
        Ok(self.temperature.clone())
    }

    async fn humidity(&self) -> Result<HumidityResponse, FetchError> {
        Ok(self.humidity.clone())
    }
}

#[tokio::test]
async fn test_dummy_telematics_source() {
    let source = DummyTelematicsSource::new().unwrap();

    let history = source.history().await.unwrap();
    assert_eq!(history.len(), 8);
    assert!(history.windows(2).all(|pair| pair[0].time_ms < pair[1].time_ms));

    let vehicles = source.vehicles().await.unwrap();
    assert_eq!(vehicles[0].title(), "2019 Ford Transit");

    assert!(source.door_status().await.unwrap().is_closed());
    assert_eq!(source.temperature().await.unwrap().ambient_millidegrees().unwrap(), 23_000.0);
    assert_eq!(source.humidity().await.unwrap().humidity_percent().unwrap(), 45.9);
}
