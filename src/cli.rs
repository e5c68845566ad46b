use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "redadeg",
    about = "Log running and cycling workouts pinned to map coordinates"
)]
pub struct Cli {
    /// Directory holding the workout log.
    ///
    /// Default: $XDG_DATA_HOME/redadeg, falling back to ~/.local/share/redadeg.
    #[arg(long, value_name = "DIR", global = true)]
    pub data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Log a running workout.
    Run {
        /// Distance in km.
        #[arg(value_name = "KM")]
        distance: f64,

        /// Duration in minutes.
        #[arg(value_name = "MIN")]
        duration: f64,

        /// Cadence in steps per minute.
        #[arg(value_name = "SPM")]
        cadence: f64,

        /// Latitude of the workout location.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the workout location.
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Log a cycling workout.
    Ride {
        /// Distance in km.
        #[arg(value_name = "KM")]
        distance: f64,

        /// Duration in minutes.
        #[arg(value_name = "MIN")]
        duration: f64,

        /// Elevation gain in metres. May be zero or negative.
        #[arg(value_name = "ELEV", allow_hyphen_values = true)]
        elevation: f64,

        /// Latitude of the workout location.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the workout location.
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// List logged workouts. This is the default when no command is given.
    List {
        /// Group the listing by kind instead of insertion order.
        #[arg(long)]
        by_kind: bool,
    },

    /// Edit the numeric fields of a workout. Kind, coordinates and date are
    /// fixed at creation.
    Edit {
        /// Id of the workout to edit.
        #[arg(value_name = "ID")]
        id: Uuid,

        /// New distance in km.
        #[arg(long, value_name = "KM")]
        km: Option<f64>,

        /// New duration in minutes.
        #[arg(long, value_name = "MIN")]
        min: Option<f64>,

        /// New cadence in steps per minute (running workouts only).
        #[arg(long, value_name = "SPM")]
        spm: Option<f64>,

        /// New elevation gain in metres (cycling workouts only).
        #[arg(long, value_name = "M", allow_hyphen_values = true)]
        elev: Option<f64>,
    },

    /// Delete one workout.
    Delete {
        /// Id of the workout to delete.
        #[arg(value_name = "ID")]
        id: Uuid,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Delete every workout.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
