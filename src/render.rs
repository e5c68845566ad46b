use std::io::{self, Write};

use anyhow::Result;

use crate::workout::{Metrics, Workout};

/// One list line per workout: label, distance, duration, derived metric,
/// variant metric, coordinates, id. Derived metrics get one decimal; raw
/// inputs are shown as entered.
pub fn line(workout: &Workout) -> String {
    let metric = match workout.metrics() {
        Metrics::Running {
            cadence_spm,
            pace_min_per_km,
        } => format!("{pace_min_per_km:.1} min/km  {cadence_spm} spm"),
        Metrics::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => format!("{speed_km_per_h:.1} km/h  {elevation_gain_m} m"),
    };

    let coords = workout.coords();
    format!(
        "{}  {} km  {} min  {metric}  ({:.5}, {:.5})  {}",
        workout.label(),
        workout.distance_km(),
        workout.duration_min(),
        coords.lat(),
        coords.lng(),
        workout.id()
    )
}

/// Prompt before a destructive operation. `y`/`yes` confirms, anything
/// else cancels.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
