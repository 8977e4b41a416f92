// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

mod clock;
mod orchestrator;
mod viewmodel;

pub use clock::{Clock, SystemClock};
pub use orchestrator::{Acquisition, Session};
pub use viewmodel::{SensorSnapshot, SensorView};
