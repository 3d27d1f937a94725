//! Export helpers for CSV and JSON artifacts.

pub mod chronology {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use broom_campaign::{
        BindingConstraint, MissionReport, PassEngagementResult, PassOutcome, SkipReason,
    };

    const HEADER: &str = "pass_index,station,start_s,duration_s,max_elevation_deg,slant_range_km,fluence_j_cm2,pulses,binding_constraint,delta_v_m_s,heating_delta_k,temp_after_k,perigee_alt_km,status,skip_reason";

    fn binding_label(binding: Option<BindingConstraint>) -> &'static str {
        match binding {
            None => "",
            Some(BindingConstraint::Thermal) => "thermal",
            Some(BindingConstraint::LaserSystem) => "laser_system",
        }
    }

    fn reason_label(reason: SkipReason) -> &'static str {
        match reason {
            SkipReason::IntensityTooHigh => "intensity_too_high",
            SkipReason::InsufficientCooldown => "insufficient_cooldown",
            SkipReason::ThermalLimitReached => "thermal_limit_reached",
            SkipReason::MeltingRisk => "melting_risk",
            SkipReason::TempLimitExceeded => "temp_limit_exceeded",
        }
    }

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard chronology CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Serialize one processed pass to CSV, matching the standard header
    /// ordering.
    pub fn write_record(writer: &mut dyn Write, result: &PassEngagementResult) -> io::Result<()> {
        let binding = binding_label(result.binding_constraint);
        let (status, skip_reason) = match result.outcome {
            PassOutcome::Engaged => ("engaged", ""),
            PassOutcome::Skipped { reason } => ("skipped", reason_label(reason)),
        };
        writeln!(
            writer,
            "{},{},{:.1},{:.1},{:.2},{:.3},{:.6},{},{},{:.6},{:.3},{:.2},{:.3},{},{}",
            result.pass_index,
            result.station_name,
            result.start_s,
            result.duration_s,
            result.max_elevation_deg,
            result.slant_range_km,
            result.fluence_j_cm2,
            result.pulses,
            binding,
            result.delta_v_m_s,
            result.heating_delta_k,
            result.temp_after_k,
            result.perigee_alt_km,
            status,
            skip_reason,
        )
    }

    /// Write the full pass chronology of a report as CSV.
    pub fn write_report(writer: &mut dyn Write, report: &MissionReport) -> io::Result<()> {
        write_header(writer)?;
        for result in &report.pass_results {
            write_record(writer, result)?;
        }
        Ok(())
    }
}

pub mod sidecar {
    use std::fs::{self, File};
    use std::io;
    use std::path::{Path, PathBuf};

    use serde_json::to_writer_pretty;

    use broom_campaign::MissionReport;

    /// Sidecar path derived from the CSV output path: `{stem}_report.json`
    /// next to the chronology.
    pub fn report_path(output: &Path) -> PathBuf {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("campaign");
        parent.join(format!("{}_report.json", stem))
    }

    /// Write the full mission report as a pretty-printed JSON sidecar.
    pub fn write_report(path: &Path, report: &MissionReport) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, report)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use broom_campaign::{
        BindingConstraint, PassEngagementResult, PassOutcome, SkipReason,
    };

    fn engaged_result() -> PassEngagementResult {
        PassEngagementResult {
            pass_index: 0,
            station_name: "maui".into(),
            start_s: 1_200.0,
            duration_s: 300.0,
            max_elevation_deg: 62.5,
            slant_range_km: 548.2,
            fluence_j_cm2: 0.51,
            pulses: 3_000,
            binding_constraint: Some(BindingConstraint::LaserSystem),
            delta_v_m_s: 0.85,
            heating_delta_k: 24.0,
            temp_after_k: 274.0,
            perigee_alt_km: 477.1,
            outcome: PassOutcome::Engaged,
        }
    }

    #[test]
    fn chronology_rows_match_the_header_width() {
        let mut buffer = Vec::new();
        chronology::write_header(&mut buffer).unwrap();
        chronology::write_record(&mut buffer, &engaged_result()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert_eq!(
            header.split(',').count(),
            row.split(',').count(),
            "row arity must match the header"
        );
        assert!(row.contains("engaged"));
        assert!(row.contains("laser_system"));
    }

    #[test]
    fn skipped_rows_carry_the_reason_code() {
        let mut result = engaged_result();
        result.pulses = 0;
        result.binding_constraint = None;
        result.outcome = PassOutcome::Skipped {
            reason: SkipReason::IntensityTooHigh,
        };
        let mut buffer = Vec::new();
        chronology::write_record(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("skipped,intensity_too_high"));
    }

    #[test]
    fn sidecar_path_sits_next_to_the_csv() {
        let path = sidecar::report_path(std::path::Path::new("out/campaign.csv"));
        assert_eq!(path, std::path::PathBuf::from("out/campaign_report.json"));
    }
}
