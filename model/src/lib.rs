//! Presentation model: turns a [`SensorSnapshot`] into chart datasets and the
//! live status lines. Nothing here is cached; build a new model for every render.

use serde::Serialize;

use sensor_charts_common::convert::{format_est_time, millidegrees_to_fahrenheit};
use sensor_charts_common::telematics::{SensorHistoryPoint, VehicleRecord};
use sensor_charts_common::{SensorSnapshot, Slot};

pub const TEMPERATURE_COLOR: &str = "#064FF0";
pub const HUMIDITY_COLOR: &str = "#FF3030";

pub const TIME_AXIS_TITLE: &str = "Time (HH:MM:SS | EST)";
pub const FAHRENHEIT_AXIS_TITLE: &str = "Degrees Fahrenheit";
pub const PERCENT_AXIS_TITLE: &str = "Percentage (%)";

const LINE_TENSION: f64 = 0.5;

/// Shown for a slot that has not received anything yet.
pub const PENDING_TEXT: &str = "--";
/// Shown for a slot whose fetch failed.
pub const UNAVAILABLE_TEXT: &str = "unavailable";

/// One line of a chart, in the shape Chart.js expects.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    /// `None` is a gap in the line, serialised as `null`.
    pub data: Vec<Option<f64>>,
    pub background_color: String,
    pub border_color: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub tension: f64,
    pub data: ChartData,
}

/// The history converted for display, one entry per point, in the order the
/// proxy returned them. A reading the sensor did not report stays `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistorySeries {
    pub labels: Vec<String>,
    pub temperature_f: Vec<Option<f64>>,
    pub humidity_percent: Vec<Option<f64>>,
}

impl HistorySeries {
    pub fn new(history: &[SensorHistoryPoint]) -> Self {
        if history.windows(2).any(|pair| pair[0].time_ms > pair[1].time_ms) {
            log::warn!("Sensor history is not in chronological order; charting it as received");
        }

        Self {
            labels: history.iter().map(|point| format_est_time(point.time_ms)).collect(),
            temperature_f: history
                .iter()
                .map(|point| point.ambient_millidegrees().map(millidegrees_to_fahrenheit))
                .collect(),
            humidity_percent: history.iter().map(|point| point.humidity_percent()).collect(),
        }
    }

    fn temperature_dataset(&self) -> Dataset {
        Dataset {
            label: "Temperature".into(),
            data: self.temperature_f.clone(),
            background_color: TEMPERATURE_COLOR.into(),
            border_color: TEMPERATURE_COLOR.into(),
        }
    }

    fn humidity_dataset(&self) -> Dataset {
        Dataset {
            label: "Humidity".into(),
            data: self.humidity_percent.clone(),
            background_color: HUMIDITY_COLOR.into(),
            border_color: HUMIDITY_COLOR.into(),
        }
    }

    fn chart(&self, title: &str, y_axis_title: &str, datasets: Vec<Dataset>) -> Chart {
        Chart {
            title: title.into(),
            x_axis_title: TIME_AXIS_TITLE.into(),
            y_axis_title: y_axis_title.into(),
            tension: LINE_TENSION,
            data: ChartData {
                labels: self.labels.clone(),
                datasets,
            },
        }
    }

    /// The combined, temperature and humidity charts, in display order.
    pub fn charts(&self) -> Vec<Chart> {
        vec![
            self.chart(
                "Temperature and Humidity",
                FAHRENHEIT_AXIS_TITLE,
                vec![self.temperature_dataset(), self.humidity_dataset()],
            ),
            self.chart("Temperature", FAHRENHEIT_AXIS_TITLE, vec![self.temperature_dataset()]),
            self.chart("Humidity", PERCENT_AXIS_TITLE, vec![self.humidity_dataset()]),
        ]
    }
}

/// Text of the live status panel.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LiveStatus {
    pub vehicle: String,
    pub time: String,
    pub door: String,
    pub temperature: String,
    pub humidity: String,
}

/// Formats a reading with at most two decimals and no trailing zeros.
pub fn format_reading(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        text => text.to_string(),
    }
}

fn slot_text<T>(slot: &Slot<T>, format: impl FnOnce(&T) -> String) -> String {
    match slot {
        Slot::Pending => PENDING_TEXT.to_string(),
        Slot::Ready(value) => format(value),
        Slot::Failed(_) => UNAVAILABLE_TEXT.to_string(),
    }
}

fn vehicle_title(vehicles: &[VehicleRecord]) -> String {
    vehicles
        .first()
        .map(VehicleRecord::title)
        .unwrap_or_else(|| "no vehicle".to_string())
}

impl From<&SensorSnapshot> for LiveStatus {
    fn from(snapshot: &SensorSnapshot) -> Self {
        Self {
            vehicle: slot_text(&snapshot.vehicles, |vehicles| vehicle_title(vehicles)),
            time: slot_text(&snapshot.current_time, String::clone),
            door: slot_text(&snapshot.door, |door| {
                let text = if door.is_closed() { "Closed" } else { "Open" };
                text.to_string()
            }),
            temperature: slot_text(&snapshot.temperature, |fahrenheit| {
                format!("{} Fahrenheit", format_reading(*fahrenheit))
            }),
            humidity: slot_text(&snapshot.humidity, |percent| format!("{}%", format_reading(*percent))),
        }
    }
}

/// Everything the dashboard displays.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DashboardModel {
    /// State of the history slot; the charts are empty unless it is `ready`.
    pub history: Slot<usize>,
    pub charts: Vec<Chart>,
    pub status: LiveStatus,
}

impl From<&SensorSnapshot> for DashboardModel {
    fn from(snapshot: &SensorSnapshot) -> Self {
        let series = snapshot
            .history
            .ready()
            .map(|history| HistorySeries::new(history))
            .unwrap_or_default();

        Self {
            history: snapshot.history.as_ref().map(Vec::len),
            charts: series.charts(),
            status: snapshot.into(),
        }
    }
}
