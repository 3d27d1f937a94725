//! Render the perigee-vs-pass chart from a campaign chronology CSV.

use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render perigee evolution from a campaign chronology CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/perigee.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Debug, Clone)]
struct PassPoint {
    pass_index: usize,
    perigee_alt_km: f64,
    engaged: bool,
}

const REENTRY_ALT_KM: f64 = 200.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let points = read_points(&cli.input)?;
    if points.is_empty() {
        return Err(anyhow::anyhow!("No passes in the provided CSV"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = points.last().map(|p| p.pass_index).unwrap_or(0) as f64;
    let y_max = points
        .iter()
        .map(|p| p.perigee_alt_km)
        .fold(f64::NEG_INFINITY, f64::max)
        * 1.05;
    let y_min = points
        .iter()
        .map(|p| p.perigee_alt_km)
        .fold(f64::INFINITY, f64::min)
        .min(REENTRY_ALT_KM)
        * 0.9;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Perigee evolution".to_string(), caption_font)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..x_max.max(1.0), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Pass number")
        .y_desc("Perigee altitude (km)")
        .label_style(label_font.clone())
        .x_labels(10)
        .y_labels(8)
        .draw()?;

    // Re-entry threshold.
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, REENTRY_ALT_KM), (x_max.max(1.0), REENTRY_ALT_KM)],
        ShapeStyle::from(&RED.mix(0.6)).stroke_width(2),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        "re-entry".to_string(),
        (x_max.max(1.0) * 0.01, REENTRY_ALT_KM * 1.02),
        label_font.clone().color(&RED),
    )))?;

    chart
        .draw_series(LineSeries::new(
            points
                .iter()
                .map(|p| (p.pass_index as f64, p.perigee_alt_km)),
            ShapeStyle::from(&BLUE).stroke_width(2),
        ))?
        .label("perigee")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    // Mark skipped passes so thermal stalls are visible in the curve.
    chart.draw_series(points.iter().filter(|p| !p.engaged).map(|p| {
        Circle::new(
            (p.pass_index as f64, p.perigee_alt_km),
            4,
            ShapeStyle::from(&BLACK).filled(),
        )
    }))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}

fn read_points(path: &str) -> anyhow::Result<Vec<PassPoint>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let index_idx = column(&headers, "pass_index")?;
    let perigee_idx = column(&headers, "perigee_alt_km")?;
    let status_idx = column(&headers, "status")?;

    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let pass_index: usize = record
            .get(index_idx)
            .unwrap_or_default()
            .trim()
            .parse()?;
        let perigee_alt_km: f64 = record
            .get(perigee_idx)
            .unwrap_or_default()
            .trim()
            .parse()?;
        let engaged = record
            .get(status_idx)
            .map(|s| s.trim() == "engaged")
            .unwrap_or(false);
        points.push(PassPoint {
            pass_index,
            perigee_alt_km,
            engaged,
        });
    }
    points.sort_by_key(|p| p.pass_index);
    Ok(points)
}

fn column(headers: &csv::StringRecord, name: &str) -> anyhow::Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}
