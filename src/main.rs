#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use redadeg::workout::{Coords, Workout, WorkoutPatch};
use redadeg::{cli, render, slot::Slot, store::WorkoutStore, utils};

#[macro_use]
extern crate redadeg;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let data_dir = cli.data.unwrap_or_else(utils::default_data_dir);
    let slot = Slot::in_dir(&data_dir);
    dlog!("mode=cli slot={}", slot.path().display());

    let mut store = WorkoutStore::open(slot);

    match cli.cmd {
        Some(cli::Cmd::Run {
            distance,
            duration,
            cadence,
            lat,
            lng,
        }) => {
            let workout = Workout::running(distance, duration, Coords(lat, lng), cadence)?;
            println!("{}", render::line(&workout));
            store.add(workout)?;
        }
        Some(cli::Cmd::Ride {
            distance,
            duration,
            elevation,
            lat,
            lng,
        }) => {
            let workout = Workout::cycling(distance, duration, Coords(lat, lng), elevation)?;
            println!("{}", render::line(&workout));
            store.add(workout)?;
        }
        Some(cli::Cmd::Edit {
            id,
            km,
            min,
            spm,
            elev,
        }) => {
            let patch = WorkoutPatch {
                distance_km: km,
                duration_min: min,
                cadence_spm: spm,
                elevation_gain_m: elev,
            };
            let updated = store.update(id, patch)?;
            println!("{}", render::line(updated));
        }
        Some(cli::Cmd::Delete { id, yes }) => {
            if !yes && !render::confirm("Delete this workout? You won't be able to revert it.")? {
                println!("Cancelled. Your workout is still there.");
                return Ok(());
            }

            let removed = store.remove_by_id(id)?;
            println!("Deleted {}.", removed.label());
        }
        Some(cli::Cmd::Clear { yes }) => {
            if store.is_empty() {
                println!("There isn't any workout to delete.");
                return Ok(());
            }

            if !yes && !render::confirm("Delete all workouts? You won't be able to revert this.")? {
                println!("Cancelled. Your workouts are still there.");
                return Ok(());
            }

            let removed = store.remove_all()?;
            println!("Deleted {removed} workouts.");
        }
        Some(cli::Cmd::List { by_kind }) => list(&mut store, by_kind),
        None => list(&mut store, false),
    }

    Ok(())
}

fn list(store: &mut WorkoutStore, by_kind: bool) {
    if store.is_empty() {
        println!("No workouts logged yet.");
        return;
    }

    let view: Vec<&Workout> = if by_kind {
        store.sort_toggle()
    } else {
        store.iter().collect()
    };

    for (i, workout) in view.iter().enumerate() {
        println!("{:>2}  {}", i + 1, render::line(workout));
    }
}
