//! Magnitude-response rendering command.

use clap::{Args, ValueEnum};
use serde::Serialize;
use zeroeq_core::{ChainSettings, EqParam, FilterChain};
use zeroeq_editor::{CurvePoint, ResponseCurve};

use super::common::{ConfigArgs, EqArgs};

/// Output formats for the curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CurveFormat {
    /// Aligned text, one row per sampled column
    #[default]
    Table,
    /// Comma-separated values, every column
    Csv,
    /// JSON document with settings and every column
    Json,
}

#[derive(Args)]
pub struct CurveArgs {
    #[command(flatten)]
    eq: EqArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Number of columns (curve points), overriding the configuration
    #[arg(short, long)]
    width: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CurveFormat::Table)]
    format: CurveFormat,

    /// Rows printed in table format
    #[arg(long, default_value_t = 31)]
    rows: usize,
}

#[derive(Serialize)]
struct PointReport {
    column: usize,
    freq_hz: f32,
    magnitude_db: f64,
    y: f32,
}

impl PointReport {
    fn new(column: usize, point: &CurvePoint) -> Self {
        Self {
            column,
            freq_hz: point.freq_hz,
            magnitude_db: point.magnitude_db,
            y: point.y,
        }
    }
}

#[derive(Serialize)]
struct CurveReport {
    sample_rate: f32,
    width: usize,
    height: f32,
    min_db: f32,
    max_db: f32,
    active_stages: usize,
    settings: Vec<(&'static str, f32)>,
    peak: Option<PointReport>,
    points: Vec<PointReport>,
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    let mut config = args.config.load()?;
    if let Some(width) = args.width {
        config.curve.width = width;
    }
    config.validate()?;

    let settings = args.eq.to_settings()?;
    let chain = FilterChain::new(&settings, config.sample_rate);
    let curve = ResponseCurve::compute(&chain, &config.curve_layout());
    tracing::debug!(
        width = config.curve.width,
        sample_rate = config.sample_rate,
        active = chain.active_stage_count(),
        "curve computed"
    );

    match args.format {
        CurveFormat::Table => print_table(&settings, &curve, args.rows),
        CurveFormat::Csv => print_csv(&curve),
        CurveFormat::Json => {
            let report = build_report(&settings, &chain, &curve);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn build_report(settings: &ChainSettings, chain: &FilterChain, curve: &ResponseCurve) -> CurveReport {
    let layout = curve.layout();
    CurveReport {
        sample_rate: chain.sample_rate(),
        width: layout.width,
        height: layout.height,
        min_db: layout.min_db,
        max_db: layout.max_db,
        active_stages: chain.active_stage_count(),
        settings: EqParam::ALL
            .iter()
            .map(|&p| (p.descriptor().string_id, settings.get(p)))
            .collect(),
        peak: curve
            .points()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.magnitude_db.total_cmp(&b.magnitude_db))
            .map(|(i, p)| PointReport::new(i, p)),
        points: curve
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| PointReport::new(i, p))
            .collect(),
    }
}

fn print_csv(curve: &ResponseCurve) {
    println!("column,freq_hz,magnitude_db,y");
    for (column, point) in curve.points().iter().enumerate() {
        println!(
            "{column},{:.3},{:.4},{:.2}",
            point.freq_hz, point.magnitude_db, point.y
        );
    }
}

fn print_table(settings: &ChainSettings, curve: &ResponseCurve, rows: usize) {
    for param in EqParam::ALL {
        let desc = param.descriptor();
        println!("  {:18} {}", desc.name, desc.format_value(settings.get(param)));
    }
    println!();
    println!("  {:>10}  {:>9}", "Freq", "dB");
    println!("  {:>10}  {:>9}", "----", "--");

    let points = curve.points();
    if points.is_empty() || rows == 0 {
        return;
    }
    let rows = rows.min(points.len());
    for row in 0..rows {
        // spread rows evenly, always including both ends
        let column = if rows == 1 {
            0
        } else {
            row * (points.len() - 1) / (rows - 1)
        };
        let point = &points[column];
        println!(
            "  {:>10}  {:>9.2}",
            format_freq(point.freq_hz),
            point.magnitude_db
        );
    }

    if let Some(peak) = curve.peak_point() {
        println!();
        println!(
            "  Peak: {:+.2} dB at {}",
            peak.magnitude_db,
            format_freq(peak.freq_hz)
        );
    }
}

fn format_freq(freq_hz: f32) -> String {
    if freq_hz >= 1000.0 {
        format!("{:.2} kHz", freq_hz / 1000.0)
    } else {
        format!("{freq_hz:.1} Hz")
    }
}
