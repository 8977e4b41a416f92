use sensor_charts_model::{format_reading, Chart, DashboardModel, PENDING_TEXT, UNAVAILABLE_TEXT};
use sensor_charts_common::Slot;

/// Renders the dashboard as plain text for a terminal.
pub fn render(model: &DashboardModel) -> String {
    let status = &model.status;
    let mut out = format!(
        "Sensor Charts\n\n\
         Live Status Updates for Vehicle: {}\n  \
         At time: {}\n  \
         Door Status: {}\n  \
         Current Temperature: {}\n  \
         Current Humidity: {}\n\n",
        status.vehicle, status.time, status.door, status.temperature, status.humidity,
    );

    match &model.history {
        Slot::Pending => out.push_str(&format!("History: {PENDING_TEXT}\n")),
        Slot::Failed(reason) => out.push_str(&format!("History: {UNAVAILABLE_TEXT} ({reason})\n")),
        Slot::Ready(_) => {
            if let Some(chart) = model.charts.first() {
                out.push_str(&render_table(chart));
            }
        }
    }

    out
}

/// One row per label, one column per dataset. Gaps show as `--`.
fn render_table(chart: &Chart) -> String {
    let mut out = format!("{} ({})\n", chart.title, chart.x_axis_title);
    if chart.data.labels.is_empty() {
        out.push_str("  no readings\n");
        return out;
    }

    out.push_str(&format!("  {: <10}", "Time"));
    for dataset in &chart.data.datasets {
        out.push_str(&format!(" {: >12}", dataset.label));
    }
    out.push('\n');

    for (row, label) in chart.data.labels.iter().enumerate() {
        out.push_str(&format!("  {label: <10}"));
        for dataset in &chart.data.datasets {
            let value = dataset.data.get(row).copied().flatten().map(format_reading);
            out.push_str(&format!(" {: >12}", value.as_deref().unwrap_or(PENDING_TEXT)));
        }
        out.push('\n');
    }

    out
}
