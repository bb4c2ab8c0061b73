use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use skyroute_core::{
    round2, AirportFilter, AirportGraph, Catalog, RouteError, RoutePlan, RoutePlanner,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan airport routes from a static catalog", long_about = None)]
struct Args {
    /// Airport catalog JSON file
    #[arg(long, global = true, env = "SKYROUTE_CATALOG_PATH", default_value = "data/airports.json")]
    catalog: PathBuf,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route between two airport codes
    Plan {
        origin: String,
        destination: String,

        /// Maximum number of alternative routes
        #[arg(long, default_value_t = skyroute_core::DEFAULT_MAX_ALTERNATIVES)]
        alternatives: usize,
    },
    /// List catalog airports
    Airports {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    match args.command {
        Command::Plan {
            origin,
            destination,
            alternatives,
        } => {
            let planner = RoutePlanner::new(Arc::new(AirportGraph::build(catalog.airports())))
                .with_max_alternatives(alternatives);
            let origin = origin.trim().to_uppercase();
            let destination = destination.trim().to_uppercase();
            let plan = match planner.plan(&origin, &destination) {
                Ok(plan) => plan,
                Err(err @ RouteError::InvalidEndpoint { .. }) => bail!("invalid request: {err}"),
                Err(err) => bail!("{err}"),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&plan_json(&plan))?);
            } else {
                print_plan(&plan);
            }
        }
        Command::Airports {
            country,
            city,
            code,
        } => {
            let filter = AirportFilter {
                country,
                city,
                code,
            };
            let airports = catalog.filter(&filter);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "airports": airports }))?);
            } else {
                for airport in &airports {
                    println!(
                        "{:<5} {:<50} {:>9.4} {:>10.4}  {}",
                        airport.code,
                        airport.name,
                        airport.latitude,
                        airport.longitude,
                        airport.country.as_deref().unwrap_or("-")
                    );
                }
                println!("{} airport(s)", airports.len());
            }
        }
    }

    Ok(())
}

fn plan_json(plan: &RoutePlan) -> serde_json::Value {
    let routes: Vec<_> = plan
        .routes()
        .map(|(path, quote)| {
            json!({
                "path": path.display(),
                "kind": path.kind,
                "distance_km": round2(quote.distance_km),
                "distance_miles": round2(quote.distance_miles),
                "duration_hours": quote.duration.hours,
                "duration_minutes": quote.duration.minutes,
                "total_cost": round2(quote.total_cost),
                "fuel_cost": round2(quote.fuel_cost),
            })
        })
        .collect();
    json!({ "all_routes": routes })
}

fn print_plan(plan: &RoutePlan) {
    for (idx, (path, quote)) in plan.routes().enumerate() {
        let label = if idx == 0 {
            if path.is_fallback() { "Main (fallback)" } else { "Main" }
        } else {
            "Alternative"
        };
        println!("{}: {}", label, path.display());
        println!(
            "  {:.2} km / {:.2} mi, {}h {:02}m, cost {:.2} (fuel {:.2})",
            quote.distance_km,
            quote.distance_miles,
            quote.duration.hours,
            quote.duration.minutes,
            quote.total_cost,
            quote.fuel_cost
        );
    }
}
