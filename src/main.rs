use clap::Parser;
use flight_picker::{
    logging, resolve_date, AppConfig, DuffelClient, FlightOfferManager, OfferQuery, Outcome,
};
use std::process::ExitCode;
use tracing::info;

/// Find the best flight offer for a one-way trip
#[derive(Parser, Debug)]
#[command(name = "flight-picker", version)]
struct Args {
    /// Departure airport or city IATA code
    #[arg(long)]
    from: String,

    /// Destination airport or city IATA code
    #[arg(long)]
    to: String,

    /// Departure date: YYYY-MM-DD or an expression such as "tomorrow" or "next friday"
    #[arg(long)]
    date: String,

    /// morning, afternoon, evening or night
    #[arg(long)]
    time_of_day: Option<String>,

    /// Preferred airline IATA code
    #[arg(long)]
    airline: Option<String>,

    /// economy, premium_economy, business or first
    #[arg(long)]
    cabin_class: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = AppConfig::from_env()?;
    logging::init_tracing(&config.log_level, config.json_logs)?;

    let departure_date = match resolve_date(&args.date) {
        Outcome::Success { value } => value,
        failure => return report(&failure),
    };

    let mut query = OfferQuery::new(&args.from, &args.to, &departure_date);
    query.time_of_day = args.time_of_day;
    query.airline = args.airline;
    query.cabin_class = args.cabin_class;

    let client = DuffelClient::new(config.client.clone())?;
    let manager = FlightOfferManager::new(client, config.heuristic);

    info!(heuristic = ?config.heuristic, "Searching offers");
    let outcome = manager.get_offer(&query).await;
    report(&outcome)
}

fn report<T: serde::Serialize>(outcome: &Outcome<T>) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
