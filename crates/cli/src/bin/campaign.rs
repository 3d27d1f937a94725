use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use laser_broom::campaign::{self, CampaignParams, MissionReport, PassOutcome};
use laser_broom::config::{self, DebrisConfig, LaserSiteConfig};
use laser_broom::export;
use laser_broom::laser::LaserConfig;
use laser_broom::visibility::ScanParams;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plan a pulsed-laser deorbit campaign for one debris target"
)]
struct Cli {
    /// Station catalog (YAML)
    #[arg(long, default_value = "data/scenarios/stations.yaml")]
    stations: PathBuf,

    /// Debris catalog (YAML)
    #[arg(long, default_value = "data/scenarios/debris.yaml")]
    debris: PathBuf,

    /// Laser site definition (TOML file or directory)
    #[arg(long, default_value = "data/scenarios/laser.toml")]
    laser: PathBuf,

    /// Debris entry to plan for (required when the catalog has several)
    #[arg(long)]
    debris_name: Option<String>,

    /// Laser site to use (defaults to the first in the definition)
    #[arg(long)]
    site: Option<String>,

    /// Scan horizon in days
    #[arg(long, default_value_t = 90.0)]
    horizon_days: f64,

    /// Minimum elevation for a usable pass, degrees
    #[arg(long, default_value_t = 20.0)]
    min_elevation: f64,

    /// Scan sampling step in minutes
    #[arg(long, default_value_t = 1.0)]
    step_minutes: f64,

    /// Ambient equilibrium temperature of the target, K
    #[arg(long, default_value_t = campaign::DEFAULT_AMBIENT_TEMP_K)]
    ambient_temp_k: f64,

    /// Output chronology CSV (use '-' for stdout); a JSON report sidecar is
    /// written next to it
    #[arg(long, default_value = "artifacts/campaign.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let station_catalog = config::load_stations(&cli.stations)?;
    let debris_catalog = config::load_debris(&cli.debris)?;
    let sites = config::load_laser_sites(&cli.laser)?;

    let entry = select_debris(&debris_catalog, cli.debris_name.as_deref())?;
    let site = select_site(&sites, cli.site.as_deref())?;
    let laser = laser_from_site(site);
    let stations = campaign::stations_from_config(&station_catalog);

    let params = CampaignParams {
        scan: ScanParams {
            horizon_days: cli.horizon_days,
            min_elevation_deg: cli.min_elevation,
            step_minutes: cli.step_minutes,
        },
        ambient_temp_k: cli.ambient_temp_k,
    };

    let report = campaign::plan_campaign(entry, &stations, &laser, &params)?;
    print_summary(&report, &site.name);

    let mut writer = export::chronology::writer_for_path(&cli.output)?;
    export::chronology::write_report(&mut *writer, &report)?;
    writer.flush()?;

    if cli.output != Path::new("-") {
        let sidecar = export::sidecar::report_path(&cli.output);
        export::sidecar::write_report(&sidecar, &report)?;
        println!(
            "Wrote {} and {}",
            cli.output.display(),
            sidecar.display()
        );
    }

    Ok(())
}

fn select_debris<'a>(
    catalog: &'a [DebrisConfig],
    name: Option<&str>,
) -> anyhow::Result<&'a DebrisConfig> {
    match name {
        Some(wanted) => catalog
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Debris '{}' not found in catalog (available: {})",
                    wanted,
                    catalog
                        .iter()
                        .map(|entry| entry.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }),
        None if catalog.len() == 1 => Ok(&catalog[0]),
        None => Err(anyhow::anyhow!(
            "Catalog has {} entries; pick one with --debris-name",
            catalog.len()
        )),
    }
}

fn select_site<'a>(
    sites: &'a [LaserSiteConfig],
    name: Option<&str>,
) -> anyhow::Result<&'a LaserSiteConfig> {
    match name {
        Some(wanted) => sites
            .iter()
            .find(|site| site.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Laser site '{}' not found", wanted)),
        None => sites
            .first()
            .ok_or_else(|| anyhow::anyhow!("No laser sites defined")),
    }
}

fn laser_from_site(site: &LaserSiteConfig) -> LaserConfig {
    LaserConfig {
        pulse_energy_j: site.pulse_energy_j,
        wavelength_m: site.wavelength_m,
        pulse_duration_s: site.pulse_duration_s,
        aperture_diameter_m: site.aperture_diameter_m,
        beam_quality_m2: site.beam_quality_m2,
        atmospheric_transmission: site.atmospheric_transmission,
        max_rep_rate_hz: site.max_rep_rate_hz,
    }
}

fn print_summary(report: &MissionReport, site_name: &str) {
    println!("=== Campaign Report: {} ===", report.debris_name);
    println!("Laser site     : {site_name}");
    println!(
        "Passes         : {} processed, {} engaged, {} skipped",
        report.passes_processed, report.passes_engaged, report.passes_skipped
    );
    println!(
        "Pulses         : {} ({:.2} GJ delivered)",
        report.total_pulses,
        report.total_energy_j / 1.0e9
    );
    println!("Delta-v        : {:.2} m/s total", report.total_delta_v_m_s);
    match report.completion_pass_index {
        Some(index) => println!(
            "Perigee        : {:.1} -> {:.1} km (re-entry reached at pass {})",
            report.initial_perigee_alt_km, report.final_perigee_alt_km, index
        ),
        None => println!(
            "Perigee        : {:.1} -> {:.1} km (re-entry not reached)",
            report.initial_perigee_alt_km, report.final_perigee_alt_km
        ),
    }
    println!(
        "Duration       : {:.1} days (passive decay baseline: {})",
        report.campaign_duration_days,
        format_lifetime(report.passive_lifetime_days)
    );
    println!(
        "Cost           : ${:.0} (electricity ${:.0}, operations ${:.0})",
        report.cost.total_usd, report.cost.electricity_usd, report.cost.operations_usd
    );
    for comparison in &report.cost.comparisons {
        println!(
            "  vs {:<24}: {:.0}x cheaper ({:.1}% savings)",
            comparison.method, comparison.times_cheaper, comparison.savings_percent
        );
    }

    let skips = report
        .pass_results
        .iter()
        .filter(|result| matches!(result.outcome, PassOutcome::Skipped { .. }))
        .count();
    if skips > 0 {
        println!("Note           : {skips} passes skipped; see the chronology CSV for reasons");
    }
}

fn format_lifetime(days: f64) -> String {
    if !days.is_finite() {
        return "indefinite".to_string();
    }
    if days > 365.25 {
        format!("{:.1} years", days / 365.25)
    } else {
        format!("{days:.0} days")
    }
}
