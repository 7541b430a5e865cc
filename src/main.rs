use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

use goaloracle::config::{Command, Config, LogFormat, PredictArgs, ServeArgs};
use goaloracle::dashboard::{self, AppState};
use goaloracle::forecast::{self, MatchInputs, Side, TeamStats};
use goaloracle::render;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialise tracing / logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    config.validate()?;

    match config.command {
        Command::Predict(args) => run_predict(&args),
        Command::Serve(args) => run_serve(args).await,
    }
}

fn run_predict(args: &PredictArgs) -> Result<()> {
    let inputs = MatchInputs {
        team_a: TeamStats::with_rate(Side::TeamA, args.team_a_rate),
        team_b: TeamStats::with_rate(Side::TeamB, args.team_b_rate),
    };
    let prediction = forecast::predict(&inputs, args.model.max_goals)
        .map_err(|e| anyhow::anyhow!("Invalid input detected: {}", e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("{}", render::report(&prediction, args.model.threshold));
    }
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let app = dashboard::router(AppState { model: args.model });
    let addr: SocketAddr = args.addr.parse()?;
    info!(
        "Dashboard listening on http://{} (max goals {}, label threshold {})",
        addr, args.model.max_goals, args.model.threshold
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run dashboard server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}
