use anyhow::Context;
use clap::Parser;
use soc_scraper::cli::{Args, Command};
use soc_scraper::config::Config;
use soc_scraper::logging::setup_logging;
use soc_scraper::soc::{ClientOptions, Endpoints, HttpFetcher, ScheduleClient};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        session = config.enable_session,
        "starting soc-scraper"
    );

    match run(&config, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(
        Endpoints::with_base(&config.base_url),
        config.connection_mode(),
        config.request_timeout,
    )
    .context("Failed to build HTTP client")?;

    let client = ScheduleClient::new(
        fetcher,
        ClientOptions {
            preload_terms: config.preload_terms,
            output_path: Some(config.output_path.clone()),
        },
    )
    .context("Failed to load terms")?;

    match command {
        Command::Terms => {
            let terms = client.get_terms()?;
            println!("{}", serde_json::to_string_pretty(terms)?);
        }
        Command::Departments { term } => {
            let departments = client
                .get_departments(&term)
                .with_context(|| format!("Failed to get departments for {term}"))?;
            println!("{}", serde_json::to_string_pretty(&departments)?);
        }
        Command::Subjects { term } => {
            let subjects = client
                .get_subjects(&term)
                .with_context(|| format!("Failed to get subjects for {term}"))?;
            println!("{}", serde_json::to_string_pretty(&subjects)?);
        }
        Command::Schedule {
            term,
            subjects,
            quiet,
        } => {
            let html = client
                .get_schedule_page(&term, &subjects)
                .with_context(|| format!("Failed to get schedule for {term}"))?;
            if quiet {
                println!("{}", config.output_path.display());
            } else {
                println!("{html}");
            }
        }
    }

    Ok(())
}
