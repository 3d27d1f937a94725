//! Visibility scanning: fixed-step elevation sampling per ground station,
//! pass extraction, and chronological merging across a station network.
//!
//! Sampling dominates the cost of the whole engine (one propagator query per
//! sample per station), so the per-station scans run on the rayon pool and a
//! cooperative cancellation flag is checked between samples.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use broom_core::time::days_to_seconds;
use broom_propagation::{GroundStation, LookAngles, OrbitPropagator, PropagationError};

/// Passes shorter than this are grazing geometry with no usable engagement
/// window and are dropped (s).
pub const MIN_PASS_DURATION_S: f64 = 30.0;

/// Scan parameters. Defaults: 90-day horizon, 20° threshold, 1-minute step.
#[derive(Debug, Clone)]
pub struct ScanParams {
    pub horizon_days: f64,
    pub min_elevation_deg: f64,
    pub step_minutes: f64,
}

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams {
            horizon_days: 90.0,
            min_elevation_deg: 20.0,
            step_minutes: 1.0,
        }
    }
}

/// One visibility pass over a station, closed and above the minimum duration.
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityPass {
    /// Insertion index of the station in the scanned network.
    pub station_index: usize,
    pub station_name: String,
    /// Seconds since the element epoch.
    pub start_s: f64,
    pub end_s: f64,
    pub duration_s: f64,
    pub max_elevation_deg: f64,
    pub start_azimuth_deg: f64,
}

/// Counters describing what a scan saw besides the emitted passes.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ScanDiagnostics {
    pub samples_evaluated: u64,
    /// Passes dropped for being shorter than the minimum duration.
    pub short_passes_dropped: u32,
    /// Passes still open when the horizon ended. These are discarded by
    /// design, but counted so callers can see the truncation.
    pub truncated_open_passes: u32,
}

impl ScanDiagnostics {
    fn merge(&mut self, other: &ScanDiagnostics) {
        self.samples_evaluated += other.samples_evaluated;
        self.short_passes_dropped += other.short_passes_dropped;
        self.truncated_open_passes += other.truncated_open_passes;
    }
}

/// Result of scanning one station or a whole network.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub passes: Vec<VisibilityPass>,
    pub diagnostics: ScanDiagnostics,
}

/// Scan failures. A propagation failure aborts the station/target pair and is
/// surfaced; it is never reported as an empty pass list.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan cancelled by caller")]
    Cancelled,
    #[error("propagation failed during scan: {0}")]
    Propagation(#[from] PropagationError),
}

/// Anything that can answer a look-angle query at an instant. The seam lets
/// tests drive the scanner with synthetic elevation profiles.
pub trait LookAngleProvider: Sync {
    fn look_angles(
        &self,
        t_s: f64,
        station: &GroundStation,
    ) -> Result<LookAngles, PropagationError>;
}

impl LookAngleProvider for OrbitPropagator {
    fn look_angles(
        &self,
        t_s: f64,
        station: &GroundStation,
    ) -> Result<LookAngles, PropagationError> {
        OrbitPropagator::look_angles(self, t_s, station)
    }
}

/// Scan a single station across the horizon.
pub fn scan<P: LookAngleProvider>(
    provider: &P,
    station: &GroundStation,
    station_index: usize,
    params: &ScanParams,
    cancel: Option<&AtomicBool>,
) -> Result<ScanOutcome, ScanError> {
    let horizon_s = days_to_seconds(params.horizon_days);
    let step_s = params.step_minutes * 60.0;

    let mut passes = Vec::new();
    let mut diagnostics = ScanDiagnostics::default();

    // Open-pass accumulator.
    let mut in_pass = false;
    let mut start_s = 0.0;
    let mut start_azimuth_deg = 0.0;
    let mut max_elevation_deg = f64::NEG_INFINITY;

    let mut t_s = 0.0;
    while t_s <= horizon_s {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(ScanError::Cancelled);
            }
        }

        let angles = provider.look_angles(t_s, station)?;
        diagnostics.samples_evaluated += 1;

        let above = angles.elevation_deg > params.min_elevation_deg;
        if above && !in_pass {
            in_pass = true;
            start_s = t_s;
            start_azimuth_deg = angles.azimuth_deg;
            max_elevation_deg = angles.elevation_deg;
        } else if above {
            max_elevation_deg = max_elevation_deg.max(angles.elevation_deg);
        } else if in_pass {
            in_pass = false;
            let duration_s = t_s - start_s;
            if duration_s > MIN_PASS_DURATION_S {
                passes.push(VisibilityPass {
                    station_index,
                    station_name: station.name.clone(),
                    start_s,
                    end_s: t_s,
                    duration_s,
                    max_elevation_deg,
                    start_azimuth_deg,
                });
            } else {
                diagnostics.short_passes_dropped += 1;
            }
        }

        t_s += step_s;
    }

    if in_pass {
        // Deliberate: a pass cut by the horizon is never emitted, only
        // counted.
        diagnostics.truncated_open_passes += 1;
        warn!(
            "station {}: pass open at horizon end (started at {:.0} s) discarded",
            station.name, start_s
        );
    }

    debug!(
        "station {}: {} passes from {} samples",
        station.name,
        passes.len(),
        diagnostics.samples_evaluated
    );

    Ok(ScanOutcome {
        passes,
        diagnostics,
    })
}

/// Scan every station in the network and merge the passes chronologically.
///
/// Stations are scanned independently in parallel; the merge is a stable
/// sort on start time, so simultaneous passes keep station insertion order.
pub fn scan_network<P: LookAngleProvider>(
    provider: &P,
    stations: &[GroundStation],
    params: &ScanParams,
    cancel: Option<&AtomicBool>,
) -> Result<ScanOutcome, ScanError> {
    let outcomes: Vec<ScanOutcome> = stations
        .par_iter()
        .enumerate()
        .map(|(index, station)| scan(provider, station, index, params, cancel))
        .collect::<Result<_, _>>()?;

    let mut diagnostics = ScanDiagnostics::default();
    let mut passes = Vec::new();
    for outcome in &outcomes {
        diagnostics.merge(&outcome.diagnostics);
        passes.extend(outcome.passes.iter().cloned());
    }
    passes.sort_by(|a, b| {
        a.start_s
            .partial_cmp(&b.start_s)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!(
        "network scan: {} stations, {} passes, {} samples",
        stations.len(),
        passes.len(),
        diagnostics.samples_evaluated
    );

    Ok(ScanOutcome {
        passes,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic provider: elevation is above threshold inside the listed
    /// windows, flat below elsewhere.
    struct WindowProvider {
        windows: Vec<(f64, f64)>,
    }

    impl LookAngleProvider for WindowProvider {
        fn look_angles(
            &self,
            t_s: f64,
            _station: &GroundStation,
        ) -> Result<LookAngles, PropagationError> {
            let inside = self
                .windows
                .iter()
                .any(|&(start, end)| t_s >= start && t_s < end);
            Ok(LookAngles {
                elevation_deg: if inside { 45.0 } else { 5.0 },
                azimuth_deg: 180.0,
                range_km: 1_000.0,
            })
        }
    }

    fn short_params() -> ScanParams {
        ScanParams {
            horizon_days: 600.0 / 86_400.0,
            min_elevation_deg: 20.0,
            // 10-second sampling to resolve sub-minute windows.
            step_minutes: 10.0 / 60.0,
        }
    }

    fn station() -> GroundStation {
        GroundStation::new("test", 0.0, 0.0)
    }

    #[test]
    fn twenty_second_window_is_filtered() {
        let provider = WindowProvider {
            windows: vec![(100.0, 120.0)],
        };
        let outcome = scan(&provider, &station(), 0, &short_params(), None).unwrap();
        assert!(outcome.passes.is_empty());
        assert_eq!(outcome.diagnostics.short_passes_dropped, 1);
    }

    #[test]
    fn forty_second_window_is_kept_with_right_duration() {
        let provider = WindowProvider {
            windows: vec![(100.0, 140.0)],
        };
        let params = short_params();
        let outcome = scan(&provider, &station(), 0, &params, None).unwrap();
        assert_eq!(outcome.passes.len(), 1);
        let pass = &outcome.passes[0];
        let step_s = params.step_minutes * 60.0;
        assert!((pass.duration_s - 40.0).abs() <= step_s + 1e-9);
        assert_eq!(pass.max_elevation_deg, 45.0);
        assert_eq!(pass.start_azimuth_deg, 180.0);
    }

    #[test]
    fn pass_open_at_horizon_is_discarded_but_counted() {
        let provider = WindowProvider {
            windows: vec![(500.0, 10_000.0)],
        };
        let outcome = scan(&provider, &station(), 0, &short_params(), None).unwrap();
        assert!(outcome.passes.is_empty());
        assert_eq!(outcome.diagnostics.truncated_open_passes, 1);
    }

    #[test]
    fn network_merge_is_chronological_and_stable() {
        struct PerStation;
        impl LookAngleProvider for PerStation {
            fn look_angles(
                &self,
                t_s: f64,
                station: &GroundStation,
            ) -> Result<LookAngles, PropagationError> {
                // Station A sees 100..200; station B sees 100..200 and
                // 300..400.
                let windows: &[(f64, f64)] = if station.name == "A" {
                    &[(100.0, 200.0)]
                } else {
                    &[(100.0, 200.0), (300.0, 400.0)]
                };
                let inside = windows.iter().any(|&(s, e)| t_s >= s && t_s < e);
                Ok(LookAngles {
                    elevation_deg: if inside { 40.0 } else { 0.0 },
                    azimuth_deg: 0.0,
                    range_km: 1_000.0,
                })
            }
        }

        let stations = vec![
            GroundStation::new("A", 0.0, 0.0),
            GroundStation::new("B", 10.0, 10.0),
        ];
        let outcome = scan_network(&PerStation, &stations, &short_params(), None).unwrap();
        assert_eq!(outcome.passes.len(), 3);
        // Tie at 100 s keeps insertion order.
        assert_eq!(outcome.passes[0].station_name, "A");
        assert_eq!(outcome.passes[1].station_name, "B");
        assert_eq!(outcome.passes[2].station_name, "B");
        assert!(outcome.passes[2].start_s > outcome.passes[1].start_s);
    }

    #[test]
    fn cancellation_is_observed() {
        let provider = WindowProvider { windows: vec![] };
        let flag = AtomicBool::new(true);
        let err = scan(&provider, &station(), 0, &short_params(), Some(&flag)).unwrap_err();
        assert!(matches!(err, ScanError::Cancelled));
    }
}
