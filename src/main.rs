mod config;
mod console;
mod control;
mod display;
mod ephemeris;
mod mount;
mod telemetry;
mod tracker;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::control::ControlState;
use crate::display::{DisplaySink, JsonSink, LogSink};
use crate::ephemeris::Body;
use crate::mount::{Dispatcher, LogMount};
use crate::telemetry::{Decoded, Decoder, SerialSource};
use crate::tracker::{Tracker, TrackerConfig};

#[derive(Parser)]
#[command(name = "lunatrack")]
#[command(about = "GPS-anchored Sun/Moon mount tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track live telemetry and steer the mount
    Run {
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Serial device carrying GPS telemetry (overrides the config file)
        #[arg(long)]
        port: Option<String>,
        /// Baud rate (overrides the config file)
        #[arg(long)]
        baud: Option<u32>,
        /// Pre-select the body to follow (sun or moon)
        #[arg(long)]
        target: Option<String>,
        /// Start with tracking enabled
        #[arg(long)]
        track: bool,
        /// Emit JSON readouts on stdout instead of log lines
        #[arg(long)]
        json: bool,
    },
    /// Decode recorded telemetry sentences from a file ('-' for stdin)
    Decode { file: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            port,
            baud,
            target,
            track,
            json,
        } => run(config, port, baud, target, track, json).await,
        Commands::Decode { file } => decode(&file),
    }
}

async fn run(
    config_path: Option<PathBuf>,
    port: Option<String>,
    baud: Option<u32>,
    target: Option<String>,
    track: bool,
    json: bool,
) -> ExitCode {
    let mut config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(port) = port {
        config.serial.port = port;
    }
    if let Some(baud) = baud {
        config.serial.baud = baud;
    }
    if json {
        config.display.json = true;
    }

    let target = match target.as_deref().map(str::parse::<Body>).transpose() {
        Ok(target) => target,
        Err(_) => {
            eprintln!("Unknown target (expected 'sun' or 'moon')");
            return ExitCode::FAILURE;
        }
    };

    let source = match SerialSource::open(
        &config.serial.port,
        config.serial.baud,
        config.serial.read_timeout,
    ) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (tx, rx) = watch::channel(None);
    let token = CancellationToken::new();
    let control = Arc::new(ControlState::new(target, track));
    let dispatcher = Dispatcher::new(Arc::new(LogMount), control.clone());
    let sink: Box<dyn DisplaySink> = if config.display.json {
        Box::new(JsonSink)
    } else {
        Box::new(LogSink)
    };

    let reader = {
        let token = token.clone();
        thread::spawn(move || telemetry::run_reader(source, tx, token))
    };

    let tracker = Tracker::spawn(
        TrackerConfig {
            recv_timeout: config.tracker.recv_timeout,
            rate_window: config.tracker.rate_window,
        },
        rx,
        control.clone(),
        dispatcher.clone(),
        sink,
        token.clone(),
    );

    // Detached: a blocked stdin read cannot be interrupted, so the console
    // thread is left to die with the process.
    {
        let token = token.clone();
        thread::spawn(move || console::run_console(control, dispatcher, token));
    }

    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("shutdown requested");
                token.cancel();
            }
        });
    }

    tracker.join().await;
    let _ = reader.join();
    log::info!("lunatrack stopped");
    ExitCode::SUCCESS
}

fn decode(path: &str) -> ExitCode {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error reading file: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    let mut decoder = Decoder::new();
    let mut lines = 0usize;
    let mut fixes = 0usize;
    for line in reader.lines() {
        let Ok(line) = line else { break };
        lines += 1;
        if let Decoded::Fix(fix) = decoder.decode(&line) {
            fixes += 1;
            println!(
                "{} lat {:.4} lon {:.4} alt {:.1} m",
                fix.timestamp, fix.latitude_deg, fix.longitude_deg, fix.altitude_m
            );
        }
    }
    println!("{fixes} complete fixes from {lines} lines");

    if fixes == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
