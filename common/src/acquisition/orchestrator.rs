// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

use crate::acquisition::{Clock, SensorView, SystemClock};
use crate::convert::{format_clock_time, millidegrees_to_fahrenheit};
use crate::slot::SlotStore;
use crate::telematics::{FetchError, TelematicsSource};

/// Acquisition that has not been mounted yet.
///
/// Mounting consumes it, so every acquisition populates its view at most once.
pub struct Acquisition<S> {
    source: Arc<S>,
    view: SensorView,
    clock: Arc<dyn Clock>,
    poll_interval: Option<Duration>,
}

/// A mounted acquisition. Owns the running sequences; dropping the session
/// aborts whatever is still in flight.
pub struct Session {
    view: SensorView,
    tasks: JoinSet<()>,
}

impl<S> Acquisition<S>
where
    S: TelematicsSource + Send + Sync + 'static,
{
    pub fn new(source: S, view: SensorView) -> Self {
        Self {
            source: Arc::new(source),
            view,
            clock: Arc::new(SystemClock),
            poll_interval: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Re-runs the live batch (door, temperature, humidity, time) every
    /// `interval`. `None` or a zero interval runs it once.
    pub fn with_poll_interval(mut self, interval: Option<Duration>) -> Self {
        self.poll_interval = interval.filter(|interval| !interval.is_zero());
        self
    }

    /// Starts the history, vehicle and live sequences. They run independently
    /// of each other and may complete in any order.
    ///
    /// # Panics
    ///
    /// If called outside of a tokio runtime.
    pub fn mount(self) -> Session {
        let mut tasks = JoinSet::new();
        log::info!("Mounting acquisition (poll interval: {:?})", self.poll_interval);

        let source = self.source.clone();
        let slot = self.view.history.clone();
        tasks.spawn(async move {
            let result = source.history().await;
            settle(&slot, "history", result);
        });

        let source = self.source.clone();
        let slot = self.view.vehicles.clone();
        tasks.spawn(async move {
            let result = source.vehicles().await;
            settle(&slot, "vehicles", result);
        });

        let source = self.source;
        let view = self.view.clone();
        let clock = self.clock;
        let poll_interval = self.poll_interval;
        tasks.spawn(async move {
            loop {
                if let Err(err) = refresh_live(&*source, &view, &*clock).await {
                    log::error!("Error fetching live data: {err}");
                }
                match poll_interval {
                    Some(interval) => tokio::time::sleep(interval).await,
                    None => break,
                }
            }
        });

        Session {
            view: self.view,
            tasks,
        }
    }
}

/// Publishes `result` into `slot`, or logs the failure and marks the slot.
fn settle<T: Clone>(slot: &SlotStore<T>, name: &str, result: Result<T, FetchError>) {
    match result {
        Ok(value) => {
            log::debug!("{name} updated");
            slot.publish(value);
        }
        Err(err) => {
            log::error!("Error fetching {name} data: {err}");
            slot.fail(err);
        }
    }
}

/// One pass of the live batch. The steps run strictly in order; the first
/// failure marks its own slot and ends the pass.
async fn refresh_live<S: TelematicsSource>(
    source: &S,
    view: &SensorView,
    clock: &dyn Clock,
) -> Result<(), FetchError> {
    let door = source.door_status().await.inspect_err(|err| {
        view.door.fail(err);
    })?;
    view.door.publish(door);

    let temperature = source
        .temperature()
        .await
        .and_then(|response| response.ambient_millidegrees())
        .inspect_err(|err| {
            view.temperature.fail(err);
        })?;
    view.temperature.publish(millidegrees_to_fahrenheit(temperature));

    let humidity = source
        .humidity()
        .await
        .and_then(|response| response.humidity_percent())
        .inspect_err(|err| {
            view.humidity.fail(err);
        })?;
    view.humidity.publish(humidity);

    view.current_time.publish(format_clock_time(&clock.now()));
    Ok(())
}

impl Session {
    pub fn view(&self) -> &SensorView {
        &self.view
    }

    /// Waits until every sequence has finished. With polling enabled the live
    /// sequence never finishes, so neither does this.
    pub async fn settled(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                log::error!("Acquisition sequence ended abnormally: {err}");
            }
        }
    }

    /// Aborts the remaining sequences and waits for them to stop. The view is
    /// not written to afterwards.
    pub async fn shutdown(mut self) {
        let running = self.tasks.len();
        self.tasks.shutdown().await;
        log::info!("Acquisition shut down ({running} sequences were still running)");
    }
}
