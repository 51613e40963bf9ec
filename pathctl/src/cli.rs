//! Module describing all possible commands and sub-commands to the `pathctl` main driver
//!
//! We have three main commands:
//!
//! - `stats`
//! - `sample`
//! - `replay`
//!
//! `stats` display every leg of a mission with its length, bearing and estimated time.
//!
//! `sample` gives the position and heading of the vehicle at a given fraction of the path.
//!
//! `replay` runs the playback clock over the whole mission with a fixed frame rate and dumps every
//! frame, as a table, CSV or JSON lines.
//!
//! `list` and `completion` are utility commands.
//!

use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand, ValueEnum,
};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Hierarchical logging output.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_dir: Option<PathBuf>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `list kinds`
/// `replay [-d SECS] [-s SPEED] [-f FPS] [--seek SECS] [--realtime] [-F FMT] [-o FILE] FILE`
/// `sample -p PROGRESS FILE`
/// `stats FILE`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// List information about formats
    List(ListOpts),
    /// Replay a mission, one line per frame
    Replay(ReplayOpts),
    /// Position and heading at a given progress
    Sample(SampleOpts),
    /// Legs, distances and flight time
    Stats(StatsOpts),
    /// List all package versions
    Version,
}

// ------

#[derive(Debug, Parser)]
pub struct StatsOpts {
    /// Cruise speed in m/s, overrides the configuration
    #[clap(long)]
    pub cruise: Option<f64>,
    /// Mission file (json expected)
    pub file: PathBuf,
}

// ------

#[derive(Debug, Parser)]
pub struct SampleOpts {
    /// Fraction of the path, from 0 to 1
    #[clap(short = 'p', long, allow_negative_numbers = true)]
    pub progress: f64,
    /// Mission file (json expected)
    pub file: PathBuf,
}

// ------

/// Output formats for `replay`.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Parser)]
pub struct ReplayOpts {
    /// Playback duration in seconds
    #[clap(short = 'd', long)]
    pub duration: Option<f64>,
    /// Speed multiplier, between 0.1 and 5
    #[clap(short = 's', long)]
    pub speed: Option<f64>,
    /// Frames per second of playback
    #[clap(short = 'f', long)]
    pub fps: Option<u32>,
    /// Start at this time in seconds
    #[clap(long)]
    pub seek: Option<f64>,
    /// Use the estimated flight time as duration
    #[clap(long, conflicts_with = "duration")]
    pub realtime: bool,
    /// Output format
    #[clap(short = 'F', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Output file, default is stdout
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Mission file (json expected)
    pub file: PathBuf,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(subcommand)]
    pub cmd: ListSubCommand,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum ListSubCommand {
    /// List all waypoint types
    Kinds,
}
