// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

mod dummytelematicssource;
mod httptelematicssource;
mod records;
mod telematicssource;

#[cfg(test)]
pub(crate) mod testproxy;

pub use records::{
    DoorStatus, HistoryResponse, HumidityReading, HumidityResponse, SensorHistoryPoint,
    TemperatureReading, TemperatureResponse, VehicleRecord, VehiclesResponse,
};
pub use telematicssource::{FetchError, TelematicsSource};

pub use dummytelematicssource::DummyTelematicsSource;
pub use httptelematicssource::HttpTelematicsSource;

/// Sensor history, `{ results: [...] }`.
pub const HISTORY_PATH: &str = "/history";
/// Fleet vehicles, `{ data: [...] }`.
pub const VEHICLES_PATH: &str = "/vehicles";
pub const DOOR_STATUS_PATH: &str = "/doorStatus";
pub const TEMPERATURE_PATH: &str = "/temperature";
pub const HUMIDITY_PATH: &str = "/humidity";
