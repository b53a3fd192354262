//! A CLI for polling Zortrax Plus printers the way a home-automation host
//! would: one-shot status and camera fetches, plus a periodic watch loop.

#![deny(missing_docs)]

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use zortrax_api::{Camera, Config, Entity, PrinterConfig, Sensor, Switch};

/// This doc string acts as a help message when the user runs '--help'
/// as do all doc strings on fields.
#[derive(Parser, Debug, Clone)]
#[clap(version = clap::crate_version!(), author = clap::crate_authors!("\n"))]
pub struct Opts {
    /// Print debug info
    #[clap(short, long)]
    pub debug: bool,

    /// Print logs as json
    #[clap(short, long)]
    pub json: bool,

    /// The subcommand to run.
    #[clap(subcommand)]
    pub subcmd: SubCommand,

    /// Path to config file.
    #[clap(short, long, default_value = "zortrax-api.toml")]
    pub config: PathBuf,
}

/// A subcommand for our cli.
#[derive(Parser, Debug, Clone)]
pub enum SubCommand {
    /// Fetch and print the status of the configured printers.
    Status {
        /// Only query the printer with this name.
        #[clap(long)]
        name: Option<String>,
    },

    /// Fetch a camera frame and write it to a file.
    Camera {
        /// Query the printer with this name; defaults to the first
        /// configured one.
        #[clap(long)]
        name: Option<String>,

        /// Where to write the JPEG.
        #[clap(short, long, default_value = "frame.jpg")]
        output: PathBuf,
    },

    /// Poll every entity on a fixed interval, like the host platform would.
    Watch {
        /// Seconds between polls.
        #[clap(long, default_value_t = 10)]
        interval: u64,
    },
}

/// The camera, sensor, and switch entities of one configured printer.
struct Poller {
    camera: Camera,
    sensor: Sensor,
    switch: Switch,
}

impl Poller {
    fn new(printer: &PrinterConfig) -> Self {
        Self {
            camera: Camera::new(printer),
            sensor: Sensor::new(printer),
            switch: Switch::new(printer),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(if opts.debug { "debug" } else { "info" }));

    let (json, plain) = if opts.json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer().pretty()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();

    let config = Config::from_file(&opts.config)?;
    if config.printers.is_empty() {
        bail!("no printers configured in `{}`", opts.config.display());
    }

    if let Err(err) = run_cmd(&opts, &config).await {
        bail!("running cmd `{:?}` failed: {:?}", &opts.subcmd, err);
    }

    Ok(())
}

/// The configured printers a subcommand should talk to.
fn select<'a>(config: &'a Config, name: Option<&str>) -> Result<Vec<&'a PrinterConfig>> {
    match name {
        Some(name) => {
            let printer = config
                .get_printer(name)
                .ok_or_else(|| anyhow::anyhow!("no printer named `{name}` in the config"))?;
            Ok(vec![printer])
        }
        None => Ok(config.printers.iter().collect()),
    }
}

async fn run_cmd(opts: &Opts, config: &Config) -> Result<()> {
    match &opts.subcmd {
        SubCommand::Status { name } => {
            for printer in select(config, name.as_deref())? {
                let mut sensor = Sensor::new(printer);
                match sensor.update().await {
                    Ok(()) => {
                        println!("{}:", sensor.name());
                        if let Some(snapshot) = sensor.attributes() {
                            for (field, value) in snapshot.iter() {
                                println!("  {field}: {value}");
                            }
                        }
                    }
                    Err(err) => println!("{}: unavailable ({err})", sensor.name()),
                }
            }
        }
        SubCommand::Camera { name, output } => {
            let printers = select(config, name.as_deref())?;
            let printer = printers
                .first()
                .ok_or_else(|| anyhow::anyhow!("no printer to query"))?;

            let mut camera = Camera::new(printer);
            camera.update().await?;
            let image = camera
                .image()
                .ok_or_else(|| anyhow::anyhow!("no frame returned"))?;
            tokio::fs::write(output, image).await?;
            println!("wrote {} bytes to {}", image.len(), output.display());
        }
        SubCommand::Watch { interval } => {
            let mut pollers: Vec<Poller> = config.printers.iter().map(Poller::new).collect();
            let mut ticker = tokio::time::interval(Duration::from_secs(*interval));

            loop {
                ticker.tick().await;
                for poller in &mut pollers {
                    // Failures are already folded into availability and
                    // logged; the loop keeps running regardless.
                    let _ = poller.sensor.update().await;
                    let _ = poller.switch.update().await;
                    let _ = poller.camera.update().await;

                    let state = poller.sensor.state().unwrap_or("unavailable");
                    let printing = match poller.switch.is_on() {
                        Some(true) => "on",
                        Some(false) => "off",
                        None => "unavailable",
                    };
                    let frame = match poller.camera.image() {
                        Some(image) => format!("{} bytes", image.len()),
                        None => "unavailable".to_string(),
                    };
                    println!("{}: status={state} printing={printing} camera={frame}", poller.sensor.name());
                }
            }
        }
    }

    Ok(())
}
