// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

pub mod acquisition;
pub mod config;
pub mod convert;
pub mod slot;
pub mod telematics;

pub use acquisition::{Acquisition, Clock, SensorSnapshot, SensorView, Session, SystemClock};
pub use config::{ConfigError, DashboardConfig};
pub use slot::{Slot, SlotStore};
