use clap::Parser;
use dotenv::dotenv;
use log::{error, info};
use std::path::Path;
use std::process;

mod config;
mod errors;
mod models;
mod services;
mod utils;

use config::{Config, METRICS, REPOS};
use services::aggregator::to_csv_table;
use services::github::GitHubClient;
use services::writer::write_csv;

/// Pulls daily clone and view counts for the tracked repositories and writes
/// them to data-YYYYMMDDHHmm.csv in the current directory.
#[derive(Parser)]
#[command(name = "traffic-stats", version)]
struct Cli {}

async fn run(config: Config) {
    let github_client = match GitHubClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create GitHub client: {:#}", e);
            return;
        }
    };

    let stats = github_client.fetch_all_traffic(&REPOS, &METRICS).await;
    let table = to_csv_table(&stats);
    info!("Aggregated {} series into {} rows", stats.len(), table.len());

    let now = chrono::Local::now().naive_local();
    if let Err(e) = write_csv(&table, Path::new("."), now) {
        error!("{:#}", e);
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let _cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    };

    run(config).await;
}
