// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::telematics::{
    DoorStatus, FetchError, HistoryResponse, HumidityResponse, SensorHistoryPoint,
    TelematicsSource, TemperatureResponse, VehicleRecord, VehiclesResponse, DOOR_STATUS_PATH,
    HISTORY_PATH, HUMIDITY_PATH, TEMPERATURE_PATH, VEHICLES_PATH,
};

/// Talks to the local telematics proxy over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTelematicsSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTelematicsSource {
    /// Creates a source for the proxy at `base_url`, e.g. `http://localhost:3001`.
    ///
    /// Requests wait forever unless a `timeout` is given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        log::debug!("Telematics proxy at {base_url} (timeout: {timeout:?})");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, FetchError> {
        let url = self.url(path);
        log::debug!("-> GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network { path, source })?;

        let status = response.status();
        log::debug!("<- {status} {url}");
        if !status.is_success() {
            return Err(FetchError::Status {
                path,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Network { path, source })?;
        log::trace!("{path} body: {body}");

        serde_json::from_str::<T>(&body).map_err(|source| FetchError::Decode { path, source })
    }
}

impl TelematicsSource for HttpTelematicsSource {
    async fn history(&self) -> Result<Vec<SensorHistoryPoint>, FetchError> {
        let response = self.get_json::<HistoryResponse>(HISTORY_PATH).await?;
        Ok(response.results)
    }

    async fn vehicles(&self) -> Result<Vec<VehicleRecord>, FetchError> {
        let response = self.get_json::<VehiclesResponse>(VEHICLES_PATH).await?;
        Ok(response.data)
    }

    async fn door_status(&self) -> Result<DoorStatus, FetchError> {
        self.get_json(DOOR_STATUS_PATH).await
    }

    async fn temperature(&self) -> Result<TemperatureResponse, FetchError> {
        self.get_json(TEMPERATURE_PATH).await
    }

    async fn humidity(&self) -> Result<HumidityResponse, FetchError> {
        self.get_json(HUMIDITY_PATH).await
    }
}
