use std::env;
use std::time::Duration;

mod render;

use sensor_charts_common::telematics::{DummyTelematicsSource, HttpTelematicsSource, TelematicsSource};
use sensor_charts_common::{Acquisition, DashboardConfig, SensorView};
use sensor_charts_model::DashboardModel;

fn usage(program: &str) {
    eprintln!("Usage: {program} [once|watch|json] [--dummy] [base-url]");
    eprintln!("    once       fetch everything once and print the dashboard (default)");
    eprintln!("    watch      keep polling the live readings and redraw until Ctrl-C");
    eprintln!("    json       fetch everything once and print the chart model as JSON");
    eprintln!("    --dummy    use bundled sample data instead of the telematics proxy");
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Once,
    Watch,
    Json,
}

/// Our App struct that holds the configuration and the mode it runs in.
///
/// The App mounts an acquisition against a telematics source and renders the
/// view model it fills, either once or on a timer.
struct App {
    config: DashboardConfig,
    mode: Mode,
    dummy: bool,
}

impl App {
    const REDRAW_INTERVAL: Duration = Duration::from_secs(5);
    const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

    /// Create a new App from an already loaded config and the command line
    /// arguments after the program name. A base URL argument overrides the
    /// config. Returns `None` if help was requested.
    fn from_args(
        mut config: DashboardConfig,
        args: impl IntoIterator<Item = String>,
    ) -> anyhow::Result<Option<Self>> {
        let mut mode = Mode::Once;
        let mut dummy = false;

        for arg in args {
            match arg.as_str() {
                "once" => mode = Mode::Once,
                "watch" => mode = Mode::Watch,
                "json" => mode = Mode::Json,
                "--dummy" => dummy = true,
                "-h" | "--help" => return Ok(None),
                url if url.starts_with("http://") || url.starts_with("https://") => {
                    config.base_url = url.to_string();
                }
                _ => anyhow::bail!("unknown argument {arg:?}"),
            }
        }

        Ok(Some(Self { config, mode, dummy }))
    }

    /// Run the App on a single-threaded runtime.
    fn run(&self) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        if self.dummy {
            log::info!("Using bundled sample data");
            runtime.block_on(self.show(DummyTelematicsSource::new()?))
        } else {
            log::info!("Using telematics proxy at {}", self.config.base_url);
            let source = HttpTelematicsSource::new(&self.config.base_url, self.config.request_timeout())?;
            runtime.block_on(self.show(source))
        }
    }

    async fn show<S>(&self, source: S) -> anyhow::Result<()>
    where
        S: TelematicsSource + Send + Sync + 'static,
    {
        let view = SensorView::default();

        let poll_interval = match self.mode {
            Mode::Watch => Some(self.config.poll_interval().unwrap_or(Self::DEFAULT_POLL_INTERVAL)),
            Mode::Once | Mode::Json => None,
        };
        let mut session = Acquisition::new(source, view.clone())
            .with_poll_interval(poll_interval)
            .mount();

        match self.mode {
            Mode::Once => {
                session.settled().await;
                print!("{}", render::render(&DashboardModel::from(&view.snapshot())));
            }
            Mode::Json => {
                session.settled().await;
                let model = DashboardModel::from(&view.snapshot());
                println!("{}", serde_json::to_string_pretty(&model)?);
            }
            Mode::Watch => {
                let mut redraw = tokio::time::interval(Self::REDRAW_INTERVAL);
                loop {
                    tokio::select! {
                        _ = redraw.tick() => {
                            let model = DashboardModel::from(&view.snapshot());
                            println!("[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                            print!("{}", render::render(&model));
                        }
                        result = tokio::signal::ctrl_c() => {
                            result?;
                            break;
                        }
                    }
                }
                session.shutdown().await;
            }
        }

        Ok(())
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "sensor-charts".to_string());
    let config = DashboardConfig::load()?;

    match App::from_args(config, args) {
        Ok(Some(app)) => app.run(),
        Ok(None) => {
            usage(&program);
            Ok(())
        }
        Err(err) => {
            usage(&program);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(config: DashboardConfig, args: &[&str]) -> anyhow::Result<Option<App>> {
        App::from_args(config, args.iter().map(|arg| arg.to_string()))
    }

    fn app(args: &[&str]) -> App {
        parse(DashboardConfig::default(), args).unwrap().unwrap()
    }

    #[test]
    fn defaults_to_fetching_once_from_the_proxy() {
        let app = app(&[]);
        assert_eq!(app.mode, Mode::Once);
        assert!(!app.dummy);
        assert_eq!(app.config, DashboardConfig::default());
    }

    #[test]
    fn mode_words_and_dummy_flag() {
        assert_eq!(app(&["watch"]).mode, Mode::Watch);
        assert_eq!(app(&["json"]).mode, Mode::Json);
        assert_eq!(app(&["watch", "once"]).mode, Mode::Once);

        let app = app(&["--dummy", "json"]);
        assert_eq!(app.mode, Mode::Json);
        assert!(app.dummy);
    }

    #[test]
    fn base_url_argument_overrides_config() {
        let config = DashboardConfig {
            base_url: "http://10.0.0.5:3001".into(),
            poll_interval_secs: Some(60),
            ..Default::default()
        };

        let app = parse(config.clone(), &["watch", "https://proxy.local:8443"])
            .unwrap()
            .unwrap();
        assert_eq!(app.config.base_url, "https://proxy.local:8443");
        assert_eq!(app.config.poll_interval_secs, Some(60));

        let app = parse(config, &["watch"]).unwrap().unwrap();
        assert_eq!(app.config.base_url, "http://10.0.0.5:3001");
    }

    #[test]
    fn help_is_not_an_app() {
        assert!(parse(DashboardConfig::default(), &["--help"]).unwrap().is_none());
        assert!(parse(DashboardConfig::default(), &["json", "-h"]).unwrap().is_none());
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        let cases: [&[&str]; 3] = [&["--verbose"], &["localhost:3001"], &["once", "stream"]];
        for args in cases {
            let err = parse(DashboardConfig::default(), args).err().unwrap();
            assert!(err.to_string().starts_with("unknown argument"), "{err}");
        }
    }
}
