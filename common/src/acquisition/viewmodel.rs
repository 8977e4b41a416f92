// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::slot::{Slot, SlotStore};
use crate::telematics::{DoorStatus, SensorHistoryPoint, VehicleRecord};

/// The shared view model. Each slot is written by exactly one acquisition
/// sequence; there is no atomicity across slots.
#[derive(Clone, Debug, Default)]
pub struct SensorView {
    pub history: SlotStore<Vec<SensorHistoryPoint>>,
    pub vehicles: SlotStore<Vec<VehicleRecord>>,
    pub door: SlotStore<DoorStatus>,
    /// Degrees Fahrenheit.
    pub temperature: SlotStore<f64>,
    /// Relative humidity in percent.
    pub humidity: SlotStore<f64>,
    /// Wall-clock time of the last completed live reading.
    pub current_time: SlotStore<String>,
}

/// A point-in-time copy of every slot in a [`SensorView`].
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    pub history: Slot<Vec<SensorHistoryPoint>>,
    pub vehicles: Slot<Vec<VehicleRecord>>,
    pub door: Slot<DoorStatus>,
    pub temperature: Slot<f64>,
    pub humidity: Slot<f64>,
    pub current_time: Slot<String>,
}

impl SensorView {
    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            history: self.history.snapshot(),
            vehicles: self.vehicles.snapshot(),
            door: self.door.snapshot(),
            temperature: self.temperature.snapshot(),
            humidity: self.humidity.snapshot(),
            current_time: self.current_time.snapshot(),
        }
    }
}
