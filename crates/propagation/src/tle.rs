//! Two-line element parsing and the mean orbital elements it yields.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use thiserror::Error;

use broom_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2};

const MINUTES_PER_DAY: f64 = 1_440.0;

/// Mean orbital elements recovered from a TLE set (angles in radians, mean
/// motion in rad/min).
#[derive(Debug, Clone)]
pub struct OrbitalElements {
    pub norad_id: u32,
    /// Full epoch year (e.g. 2024).
    pub epoch_year: i32,
    /// Fractional day of year, 1.0 = Jan 1 00:00 UTC.
    pub epoch_day: f64,
    pub inclination_rad: f64,
    pub raan_rad: f64,
    pub eccentricity: f64,
    pub arg_perigee_rad: f64,
    pub mean_anomaly_rad: f64,
    /// Mean motion (rad/min).
    pub mean_motion_rad_min: f64,
    /// First derivative of mean motion over two (rev/day²).
    pub ndot_over_2: f64,
    /// B* drag term (1/Earth radii).
    pub bstar: f64,
}

impl OrbitalElements {
    /// Orbital period in minutes.
    pub fn period_minutes(&self) -> f64 {
        2.0 * PI / self.mean_motion_rad_min
    }

    /// Semi-major axis recovered from the mean motion (km).
    pub fn semi_major_axis_km(&self) -> f64 {
        let n_rad_s = self.mean_motion_rad_min / 60.0;
        (MU_EARTH_KM3_S2 / (n_rad_s * n_rad_s)).powf(1.0 / 3.0)
    }

    /// Perigee altitude above the mean Earth radius (km).
    pub fn perigee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km() * (1.0 - self.eccentricity) - EARTH_RADIUS_KM
    }

    /// Apogee altitude above the mean Earth radius (km).
    pub fn apogee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km() * (1.0 + self.eccentricity) - EARTH_RADIUS_KM
    }

    /// Epoch as a UTC timestamp. `None` only for a day-of-year the calendar
    /// cannot hold (the parser range-checks, catalog-built elements clamp).
    pub fn epoch_datetime(&self) -> Option<DateTime<Utc>> {
        let doy = self.epoch_day.floor() as u32;
        let frac = self.epoch_day - doy as f64;
        let date = NaiveDate::from_yo_opt(self.epoch_year, doy.max(1))?;
        let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
        let offset_us = (frac * 86_400.0 * 1.0e6) as i64;
        Some(midnight + Duration::microseconds(offset_us))
    }

    /// Build mean elements from a perigee/apogee altitude pair, for catalog
    /// entries that carry orbit geometry instead of TLE strings. The epoch is
    /// taken as "now"; RAAN, argument of perigee, and mean anomaly default to
    /// zero.
    pub fn from_altitudes(
        perigee_alt_km: f64,
        apogee_alt_km: f64,
        inclination_deg: f64,
    ) -> OrbitalElements {
        let r_perigee = EARTH_RADIUS_KM + perigee_alt_km.min(apogee_alt_km);
        let r_apogee = EARTH_RADIUS_KM + perigee_alt_km.max(apogee_alt_km);
        let a = 0.5 * (r_perigee + r_apogee);
        let e = (r_apogee - r_perigee) / (r_apogee + r_perigee);
        let n_rad_s = (MU_EARTH_KM3_S2 / (a * a * a)).sqrt();

        let now = Utc::now();
        let year = now.year();
        let jan1 = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        let epoch_day = 1.0 + (now - jan1).num_seconds() as f64 / 86_400.0;

        OrbitalElements {
            norad_id: 0,
            epoch_year: year,
            epoch_day,
            inclination_rad: inclination_deg.to_radians(),
            raan_rad: 0.0,
            eccentricity: e,
            arg_perigee_rad: 0.0,
            mean_anomaly_rad: 0.0,
            mean_motion_rad_min: n_rad_s * 60.0,
            ndot_over_2: 0.0,
            bstar: 0.0,
        }
    }
}

/// Errors raised while parsing a TLE set.
#[derive(Debug, Error)]
pub enum TleError {
    #[error("TLE line {line} is too short ({length} chars, need 69)")]
    LineTooShort { line: u8, length: usize },
    #[error("TLE line {line} does not start with '{line}'")]
    BadLineNumber { line: u8 },
    #[error("TLE line {line} checksum mismatch (expected {expected}, computed {computed})")]
    ChecksumMismatch { line: u8, expected: u32, computed: u32 },
    #[error("failed to parse TLE field '{field}': {value:?}")]
    BadField { field: &'static str, value: String },
    #[error("epoch day {day} is outside the calendar year")]
    BadEpochDay { day: f64 },
}

/// Parse a standard 69-character two-line element set.
pub fn parse_tle(line1: &str, line2: &str) -> Result<OrbitalElements, TleError> {
    let l1 = check_line(line1, 1)?;
    let l2 = check_line(line2, 2)?;

    let norad_id = field_u32(l1, 2..7, "catalog number")?;
    let epoch_year_2d = field_u32(l1, 18..20, "epoch year")? as i32;
    let epoch_year = if epoch_year_2d < 57 {
        2000 + epoch_year_2d
    } else {
        1900 + epoch_year_2d
    };
    let epoch_day = field_f64(l1, 20..32, "epoch day")?;
    if !(1.0..367.0).contains(&epoch_day) {
        return Err(TleError::BadEpochDay { day: epoch_day });
    }
    let ndot_over_2 = field_f64(l1, 33..43, "ndot/2")?;
    let bstar = implied_decimal(l1, 53..61, "bstar")?;

    let inclination_deg = field_f64(l2, 8..16, "inclination")?;
    let raan_deg = field_f64(l2, 17..25, "raan")?;
    let eccentricity = {
        let digits = slice(l2, 26..33, "eccentricity")?.trim();
        let value = format!("0.{digits}");
        value.parse::<f64>().map_err(|_| TleError::BadField {
            field: "eccentricity",
            value: digits.to_string(),
        })?
    };
    let arg_perigee_deg = field_f64(l2, 34..42, "argument of perigee")?;
    let mean_anomaly_deg = field_f64(l2, 43..51, "mean anomaly")?;
    let mean_motion_rev_day = field_f64(l2, 52..63, "mean motion")?;

    Ok(OrbitalElements {
        norad_id,
        epoch_year,
        epoch_day,
        inclination_rad: inclination_deg.to_radians(),
        raan_rad: raan_deg.to_radians(),
        eccentricity,
        arg_perigee_rad: arg_perigee_deg.to_radians(),
        mean_anomaly_rad: mean_anomaly_deg.to_radians(),
        mean_motion_rad_min: mean_motion_rev_day * 2.0 * PI / MINUTES_PER_DAY,
        ndot_over_2,
        bstar,
    })
}

fn check_line(line: &str, number: u8) -> Result<&str, TleError> {
    if line.len() < 69 {
        return Err(TleError::LineTooShort {
            line: number,
            length: line.len(),
        });
    }
    if !line.starts_with(char::from(b'0' + number)) {
        return Err(TleError::BadLineNumber { line: number });
    }
    verify_checksum(line, number)?;
    Ok(line)
}

/// Mod-10 checksum over the first 68 columns; minus signs count as one.
fn verify_checksum(line: &str, number: u8) -> Result<(), TleError> {
    let mut sum = 0u32;
    for c in line.chars().take(68) {
        match c {
            '0'..='9' => sum += c as u32 - '0' as u32,
            '-' => sum += 1,
            _ => {}
        }
    }
    let computed = sum % 10;
    let expected = line
        .chars()
        .nth(68)
        .and_then(|c| c.to_digit(10))
        .ok_or(TleError::BadField {
            field: "checksum",
            value: line.chars().nth(68).map(String::from).unwrap_or_default(),
        })?;
    if computed != expected {
        return Err(TleError::ChecksumMismatch {
            line: number,
            expected,
            computed,
        });
    }
    Ok(())
}

fn slice<'a>(
    line: &'a str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<&'a str, TleError> {
    line.get(range).ok_or(TleError::BadField {
        field,
        value: String::new(),
    })
}

fn field_u32(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<u32, TleError> {
    let raw = slice(line, range, field)?.trim();
    raw.parse::<u32>().map_err(|_| TleError::BadField {
        field,
        value: raw.to_string(),
    })
}

fn field_f64(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<f64, TleError> {
    let raw = slice(line, range, field)?.trim();
    raw.parse::<f64>().map_err(|_| TleError::BadField {
        field,
        value: raw.to_string(),
    })
}

/// Parse the TLE implied-decimal exponent format, e.g. ` 12345-4` → 0.12345e-4.
fn implied_decimal(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<f64, TleError> {
    let raw = slice(line, range, field)?.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let bad = || TleError::BadField {
        field,
        value: raw.to_string(),
    };

    let (sign, rest) = match raw.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, raw.strip_prefix('+').unwrap_or(raw)),
    };
    // Exponent sign splits mantissa digits from the exponent digit(s).
    let split = rest.rfind(['-', '+']).ok_or_else(bad)?;
    if split == 0 {
        return Err(bad());
    }
    let mantissa_digits = &rest[..split];
    let exponent: i32 = rest[split..].parse().map_err(|_| bad())?;
    let mantissa: f64 = format!("0.{mantissa_digits}").parse().map_err(|_| bad())?;
    Ok(sign * mantissa * 10f64.powi(exponent))
}
