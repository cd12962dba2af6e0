use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use gasmeter_core::TemperatureStore;
use std::path::Path;

use super::load_data;

#[derive(Subcommand)]
pub enum WeatherAction {
    /// Record the mean temperature of a day (past days are observations, later days forecasts)
    Set {
        /// Day (YYYY-MM-DD)
        date: NaiveDate,
        /// Mean temperature in °C
        #[arg(allow_hyphen_values = true)]
        celsius: f64,
    },
    /// List temperature samples
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: WeatherAction, data: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WeatherAction::Set { date, celsius } => {
            if !celsius.is_finite() {
                return Err(format!("invalid temperature: {celsius}").into());
            }
            let (path, mut file) = load_data(data)?;
            file.set_temperature(date, celsius);
            file.save(&path)?;
            println!("{date}: {celsius:.1} °C");
        }
        WeatherAction::List { json } => {
            let (_, file) = load_data(data)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&file.temperatures)?);
                return Ok(());
            }
            let store = TemperatureStore::from_samples(Utc::now().date_naive(), file.temperatures);
            for (day, celsius) in store.samples() {
                let kind = if store.is_observed(*day) { "observed" } else { "forecast" };
                println!("{day}  {celsius:>6.1} °C  {kind}");
            }
        }
    }
    Ok(())
}
