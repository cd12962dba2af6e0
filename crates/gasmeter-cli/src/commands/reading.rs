//! Meter reading commands for CLI.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Subcommand;
use gasmeter_core::reading::sorted_by_time;
use gasmeter_core::timeseries::intervals;
use gasmeter_core::{Config, Reading, ReadingId};
use std::path::Path;

use super::{load_data, money};

#[derive(Subcommand)]
pub enum ReadingAction {
    /// Record a meter reading
    Add {
        /// Cumulative meter value in m³
        #[arg(long)]
        value: f64,
        /// When the reading was taken (RFC 3339 or "YYYY-MM-DD HH:MM", UTC); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// List readings with per-interval usage and cost
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a reading
    Delete {
        /// Reading ID
        id: String,
    },
}

pub fn run(action: ReadingAction, data: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReadingAction::Add { value, at } => {
            let timestamp = match at {
                Some(s) => parse_timestamp(&s)?,
                None => Utc::now(),
            };
            let reading = Reading::new(timestamp, value)?;
            let (path, mut file) = load_data(data)?;
            println!("Reading added: {}", reading.id);
            file.add_reading(reading);
            file.save(&path)?;
        }
        ReadingAction::List { json } => {
            let (_, file) = load_data(data)?;
            let readings = sorted_by_time(&file.readings);
            if json {
                println!("{}", serde_json::to_string_pretty(&readings)?);
                return Ok(());
            }
            if readings.is_empty() {
                println!("No readings recorded.");
                return Ok(());
            }

            let tariff = Config::load()?.tariff;
            let rows = intervals(&readings, &tariff);
            println!(
                "{:<36}  {:<20}  {:>10}  {:>8}  {:>6}  {:>8}",
                "ID", "TIMESTAMP", "VALUE", "USAGE", "DAYS", "COST"
            );
            println!(
                "{:<36}  {:<20}  {:>10.3}  {:>8}  {:>6}  {:>8}",
                readings[0].id.to_string(),
                readings[0].timestamp.format("%Y-%m-%d %H:%M").to_string(),
                readings[0].value,
                "-",
                "-",
                "-"
            );
            for row in rows {
                println!(
                    "{:<36}  {:<20}  {:>10.3}  {:>8.3}  {:>6.2}  {:>8}",
                    row.reading_id.to_string(),
                    row.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    row.value,
                    row.usage,
                    row.elapsed_days,
                    money(row.cost)
                );
            }
        }
        ReadingAction::Delete { id } => {
            let id: ReadingId = id.parse()?;
            let (path, mut file) = load_data(data)?;
            if !file.delete_reading(id) {
                return Err(format!("reading not found: {id}").into());
            }
            file.save(&path)?;
            println!("Reading deleted: {id}");
        }
    }
    Ok(())
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| format!("invalid timestamp '{s}' (expected RFC 3339 or YYYY-MM-DD HH:MM)"))?;
    Ok(naive.and_utc())
}
