use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::ValidationError;

/// A `(lat, lng)` pair as delivered by a map click. Serialized as a
/// two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub const fn lat(self) -> f64 {
        self.0
    }

    pub const fn lng(self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Running,
    Cycling,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    const fn capitalized(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant payload. `pace_min_per_km` and `speed_km_per_h` are derived from
/// distance and duration; they default on revival and are recomputed there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Metrics {
    Running {
        cadence_spm: f64,
        #[serde(default)]
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        #[serde(default)]
        speed_km_per_h: f64,
    },
}

/// A single logged exercise session. `id`, `created_at`, the kind and the
/// coordinates never change after creation; the numeric fields only change
/// through [`Workout::apply`], which revalidates and recomputes the derived
/// metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: Uuid,
    created_at: DateTime<Utc>,
    distance_km: f64,
    duration_min: f64,
    #[serde(rename = "coordinates")]
    coords: Coords,
    #[serde(default)]
    label: String,
    #[serde(flatten)]
    metrics: Metrics,
}

/// Editable numeric fields of an edit request. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutPatch {
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub cadence_spm: Option<f64>,
    pub elevation_gain_m: Option<f64>,
}

impl Workout {
    pub fn running(
        distance_km: f64,
        duration_min: f64,
        coords: Coords,
        cadence_spm: f64,
    ) -> Result<Self, ValidationError> {
        ensure_positive("distance", distance_km)?;
        ensure_positive("duration", duration_min)?;
        ensure_positive("cadence", cadence_spm)?;

        Ok(Self::assemble(
            distance_km,
            duration_min,
            coords,
            Metrics::Running {
                cadence_spm,
                pace_min_per_km: 0.0,
            },
        ))
    }

    /// Elevation gain may be zero or negative (downhill rides); it only has
    /// to be finite.
    pub fn cycling(
        distance_km: f64,
        duration_min: f64,
        coords: Coords,
        elevation_gain_m: f64,
    ) -> Result<Self, ValidationError> {
        ensure_positive("distance", distance_km)?;
        ensure_positive("duration", duration_min)?;
        ensure_finite("elevation", elevation_gain_m)?;

        Ok(Self::assemble(
            distance_km,
            duration_min,
            coords,
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_h: 0.0,
            },
        ))
    }

    fn assemble(distance_km: f64, duration_min: f64, coords: Coords, metrics: Metrics) -> Self {
        let mut workout = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            distance_km,
            duration_min,
            coords,
            label: String::new(),
            metrics,
        };
        workout.recompute();
        workout.label = workout.describe();
        workout
    }

    /// Reconstruct a typed workout from an untyped record, e.g. one read
    /// back from the durable slot. Rejects unknown kinds and out-of-range
    /// numbers instead of blindly copying fields, and recomputes the
    /// derived metric and label so stale stored values cannot drift.
    pub fn revive(record: JsonValue) -> Result<Self, ValidationError> {
        match record.get("kind").and_then(JsonValue::as_str) {
            Some("running" | "cycling") => {}
            Some(other) => {
                return Err(ValidationError::UnknownKind {
                    kind: other.to_string(),
                });
            }
            None => {
                return Err(ValidationError::Malformed(
                    "missing \"kind\" field".to_string(),
                ));
            }
        }

        let mut workout: Self =
            serde_json::from_value(record).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        workout.validate()?;
        workout.recompute();
        workout.label = workout.describe();
        Ok(workout)
    }

    /// Apply an edit in place. The whole candidate state is validated
    /// before anything is written, so a failed edit changes nothing.
    pub(crate) fn apply(&mut self, patch: WorkoutPatch) -> Result<(), ValidationError> {
        let distance_km = patch.distance_km.unwrap_or(self.distance_km);
        let duration_min = patch.duration_min.unwrap_or(self.duration_min);
        ensure_positive("distance", distance_km)?;
        ensure_positive("duration", duration_min)?;

        let metrics = match self.metrics {
            Metrics::Running { cadence_spm, .. } => {
                if patch.elevation_gain_m.is_some() {
                    return Err(ValidationError::FieldMismatch {
                        field: "elevation",
                        kind: Kind::Running,
                    });
                }
                let cadence_spm = patch.cadence_spm.unwrap_or(cadence_spm);
                ensure_positive("cadence", cadence_spm)?;
                Metrics::Running {
                    cadence_spm,
                    pace_min_per_km: 0.0,
                }
            }
            Metrics::Cycling { elevation_gain_m, .. } => {
                if patch.cadence_spm.is_some() {
                    return Err(ValidationError::FieldMismatch {
                        field: "cadence",
                        kind: Kind::Cycling,
                    });
                }
                let elevation_gain_m = patch.elevation_gain_m.unwrap_or(elevation_gain_m);
                ensure_finite("elevation", elevation_gain_m)?;
                Metrics::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: 0.0,
                }
            }
        };

        self.distance_km = distance_km;
        self.duration_min = duration_min;
        self.metrics = metrics;
        self.recompute();
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ensure_positive("distance", self.distance_km)?;
        ensure_positive("duration", self.duration_min)?;
        match self.metrics {
            Metrics::Running { cadence_spm, .. } => ensure_positive("cadence", cadence_spm),
            Metrics::Cycling { elevation_gain_m, .. } => {
                ensure_finite("elevation", elevation_gain_m)
            }
        }
    }

    fn recompute(&mut self) {
        match &mut self.metrics {
            Metrics::Running { pace_min_per_km, .. } => {
                *pace_min_per_km = self.duration_min / self.distance_km;
            }
            Metrics::Cycling { speed_km_per_h, .. } => {
                *speed_km_per_h = self.distance_km / (self.duration_min / 60.0);
            }
        }
    }

    /// `"Running on August 05"` style, from the kind and creation date.
    fn describe(&self) -> String {
        format!(
            "{} on {}",
            self.kind().capitalized(),
            self.created_at.format("%B %d")
        )
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn kind(&self) -> Kind {
        match self.metrics {
            Metrics::Running { .. } => Kind::Running,
            Metrics::Cycling { .. } => Kind::Cycling,
        }
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn metrics(&self) -> Metrics {
        self.metrics
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}
