//! SkyRadar CLI - Command-line interface
//!
//! Terminal radar for aircraft around a location, fed by OpenSky, ADS-B
//! Exchange, AirLabs, AviationStack, FlightRadar24, FlightAware or a
//! built-in traffic simulator.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use commands::common::{AlertType, LocationArgs, SourceArgs, SourceCredentials, SourceType};
use commands::config::ConfigCommands;
use commands::lookup::LookupArgs;
use commands::track::TrackArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "skyradar")]
#[command(version = skyradar::VERSION)]
#[command(about = "Watch aircraft entering and leaving the sky around you", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track aircraft around a location on a radar display
    Track {
        /// Latitude of the center in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,

        /// Longitude of the center in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,

        /// Radius of the tracked region in kilometres
        #[arg(long)]
        radius: Option<f64>,

        /// Seconds between polls (minimum 1)
        #[arg(long)]
        update_interval: Option<f64>,

        /// Highlight a callsign (repeatable)
        #[arg(long = "callsign")]
        callsigns: Vec<String>,

        /// Number of simulated aircraft for the mock source
        #[arg(long)]
        mock_aircraft_count: Option<usize>,

        /// Seed for the mock source, for repeatable traffic
        #[arg(long)]
        seed: Option<u64>,

        /// WAV file played when aircraft arrive (implies --alert command)
        #[arg(long)]
        sound_file: Option<PathBuf>,

        /// How to signal arrivals
        #[arg(long, value_enum)]
        alert: Option<AlertType>,

        /// Print text reports instead of the radar display
        #[arg(long)]
        non_interactive: bool,

        /// Debug logging (overridden by RUST_LOG)
        #[arg(long)]
        debug: bool,

        #[command(flatten)]
        source: SourceOptions,
    },

    /// Look up a single aircraft by callsign
    Lookup {
        /// Callsign to search for (case-insensitive)
        label: String,

        /// Debug logging (overridden by RUST_LOG)
        #[arg(long)]
        debug: bool,

        #[command(flatten)]
        source: SourceOptions,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Data source options shared by `track` and `lookup`.
#[derive(Args)]
struct SourceOptions {
    /// Aircraft data source
    #[arg(long, value_enum)]
    source: Option<SourceType>,

    /// OpenSky or FlightAware username
    #[arg(long)]
    username: Option<String>,

    /// OpenSky password
    #[arg(long)]
    password: Option<String>,

    /// API key for the keyed sources
    #[arg(long)]
    api_key: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl From<SourceOptions> for SourceArgs {
    fn from(opts: SourceOptions) -> Self {
        SourceArgs {
            source: opts.source,
            credentials: SourceCredentials {
                username: opts.username,
                password: opts.password,
                api_key: opts.api_key,
            },
            timeout: opts.timeout,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Track {
            latitude,
            longitude,
            radius,
            update_interval,
            callsigns,
            mock_aircraft_count,
            seed,
            sound_file,
            alert,
            non_interactive,
            debug,
            source,
        } => commands::track::run(TrackArgs {
            location: LocationArgs {
                latitude,
                longitude,
                radius,
                update_interval,
                callsigns,
                mock_aircraft_count,
                seed,
            },
            source: source.into(),
            alert,
            sound_file,
            non_interactive,
            debug,
        }),

        Commands::Lookup {
            label,
            debug,
            source,
        } => commands::lookup::run(LookupArgs {
            label,
            source: source.into(),
            debug,
        }),

        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
