use clap::Args;
use gasmeter_core::Config;

use super::money;

#[derive(Args)]
pub struct CostArgs {
    /// Consumption in m³
    #[arg(long)]
    usage: f64,
    /// Billing period in days
    #[arg(long)]
    days: f64,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CostArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.days.is_finite() || args.days < 0.0 {
        return Err(format!("invalid number of days: {}", args.days).into());
    }
    let tariff = Config::load()?.tariff;
    let b = tariff.breakdown(args.usage, args.days);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&b)?);
        return Ok(());
    }

    println!("Energy:        {:.2} kWh", b.energy);
    println!("Variable:      {}", money(b.variable));
    println!("Fixed:         {}", money(b.fixed));
    println!("Energy tax:    {}", money(b.tax));
    println!("VAT:           {}", money(b.vat));
    println!("Total:         {}", money(b.total));
    Ok(())
}
