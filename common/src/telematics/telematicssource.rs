// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use std::future::Future;

use crate::telematics::{
    DoorStatus, HumidityResponse, SensorHistoryPoint, TemperatureResponse, VehicleRecord,
};

/// Why a read against the telematics proxy did not produce a value.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {path} failed: {source}")]
    Network {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} answered with HTTP status {status}")]
    Status { path: &'static str, status: u16 },

    #[error("could not decode the {path} response: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("the {path} response has no {field}")]
    MissingField {
        path: &'static str,
        field: &'static str,
    },
}

/// Read-only access to the telematics proxy.
///
/// Every call is a fresh round trip; implementations neither retry nor cache.
pub trait TelematicsSource {
    /// Fetches the sensor history, in the order the proxy returns it.
    fn history(&self) -> impl Future<Output = Result<Vec<SensorHistoryPoint>, FetchError>> + Send;

    /// Fetches the fleet's vehicles.
    fn vehicles(&self) -> impl Future<Output = Result<Vec<VehicleRecord>, FetchError>> + Send;

    /// Fetches the current door status.
    fn door_status(&self) -> impl Future<Output = Result<DoorStatus, FetchError>> + Send;

    /// Fetches the current ambient temperature readings.
    fn temperature(&self) -> impl Future<Output = Result<TemperatureResponse, FetchError>> + Send;

    /// Fetches the current humidity readings.
    fn humidity(&self) -> impl Future<Output = Result<HumidityResponse, FetchError>> + Send;
}

impl<T> TelematicsSource for std::sync::Arc<T>
where
    T: TelematicsSource + Send + Sync,
{
    fn history(&self) -> impl Future<Output = Result<Vec<SensorHistoryPoint>, FetchError>> + Send {
        (**self).history()
    }

    fn vehicles(&self) -> impl Future<Output = Result<Vec<VehicleRecord>, FetchError>> + Send {
        (**self).vehicles()
    }

    fn door_status(&self) -> impl Future<Output = Result<DoorStatus, FetchError>> + Send {
        (**self).door_status()
    }

    fn temperature(&self) -> impl Future<Output = Result<TemperatureResponse, FetchError>> + Send {
        (**self).temperature()
    }

    fn humidity(&self) -> impl Future<Output = Result<HumidityResponse, FetchError>> + Send {
        (**self).humidity()
    }
}
