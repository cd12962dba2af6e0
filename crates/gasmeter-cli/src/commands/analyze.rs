//! Full analysis of the recorded readings, optionally narrowed to a range.

use clap::Args;
use gasmeter_core::{analyze, AnalysisReport, ReadingId};
use std::path::Path;

use super::{load_snapshot, money};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// First reading of the range to analyse
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// Last reading of the range to analyse
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnalyzeArgs, data: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mut snapshot) = load_snapshot(data)?;
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let from: ReadingId = from.parse()?;
        let to: ReadingId = to.parse()?;
        snapshot = snapshot.window(from, to)?;
    }

    let report = analyze(&snapshot, &config.anomaly);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let Some(summary) = &report.summary else {
        println!("Not enough readings to analyse (need at least two).");
        return;
    };

    println!(
        "Range:     {} → {} ({:.1} days)",
        summary.start.format("%Y-%m-%d %H:%M"),
        summary.end.format("%Y-%m-%d %H:%M"),
        summary.days
    );
    println!("Usage:     {:.3} m³", summary.usage);
    println!(
        "Cost:      {}  (variable {}, fixed {}, taxes {})",
        money(summary.cost),
        money(summary.breakdown.variable),
        money(summary.breakdown.fixed),
        money(summary.breakdown.total_tax())
    );
    if let Some(monthly) = summary.projected_monthly_cost {
        println!("Monthly:   {} at the range's average rate", money(monthly));
    }

    if let Some((naive, smart)) = report.projection.latest() {
        println!();
        println!("Projected month: {} (all days)", money(naive));
        println!("                 {} (excluding anomalies)", money(smart));
    }

    println!();
    println!(
        "Anomalous days: {} of {}",
        report.anomalous_days(),
        report.anomalies.len()
    );
    for verdict in report.anomalies.iter().filter(|v| v.anomalous) {
        let s = &verdict.signals;
        let mut reasons = Vec::new();
        if s.rate_outlier {
            reasons.push("usage outlier");
        }
        if s.cost_outlier {
            reasons.push("cost outlier");
        }
        if s.recent_deviation {
            reasons.push("unlike recent days");
        }
        if s.temperature_anomaly {
            reasons.push("implausible for temperature");
        }
        println!("  {}  {}", verdict.day, reasons.join(", "));
    }

    println!();
    match &report.regression {
        Some(model) => println!(
            "Temperature model: usage = {:.3} × °C + {:.3}  (R² {:.2}, n={}, {} confidence)",
            model.slope,
            model.intercept,
            model.r_squared,
            model.sample_count,
            model.confidence()
        ),
        None => println!("Temperature model: not enough days with temperature data"),
    }

    if !report.efficiency.is_empty() {
        let avg = report
            .efficiency
            .iter()
            .map(|p| p.usage_per_degree_day)
            .sum::<f64>()
            / report.efficiency.len() as f64;
        println!("Heating efficiency: {avg:.3} m³ per degree-day");
    }

    match (report.forecast.total_predicted_usage, report.forecast.projected_cost) {
        (Some(usage), Some(cost)) => println!(
            "Forecast: {:.3} m³ over {} days, {}",
            usage,
            report.forecast.days.len(),
            money(cost)
        ),
        _ => {
            if let Some(reason) = &report.forecast.unavailable_reason {
                println!("Forecast: unavailable ({reason})");
            }
        }
    }
}
