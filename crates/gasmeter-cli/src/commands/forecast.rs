use gasmeter_core::analyze;
use std::path::Path;

use super::{load_snapshot, money};

pub fn run(json: bool, data: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, snapshot) = load_snapshot(data)?;
    let forecast = analyze(&snapshot, &config.anomaly).forecast;

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    if let Some(reason) = &forecast.unavailable_reason {
        println!("Forecast unavailable: {reason}");
        return Ok(());
    }

    for day in &forecast.days {
        println!(
            "{}  {:>6.1} °C  {:>8.3} m³",
            day.day, day.temperature, day.predicted_usage
        );
    }
    if let (Some(avg), Some(usage), Some(cost), Some(confidence)) = (
        forecast.average_temperature,
        forecast.total_predicted_usage,
        forecast.projected_cost,
        forecast.confidence,
    ) {
        println!();
        println!("Average temperature: {avg:.1} °C");
        println!("Predicted usage:     {usage:.3} m³");
        println!("Projected cost:      {}", money(cost));
        println!("Confidence:          {confidence}");
    }
    Ok(())
}
