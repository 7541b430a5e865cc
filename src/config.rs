use clap::{Parser, Subcommand, ValueEnum};

use crate::engine::DEFAULT_MAX_GOALS;
use crate::forecast::MAX_GOALS_LIMIT;

/// Poisson-based football scoreline predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "goaloracle", version, about)]
pub struct Config {
    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict one match and print the results
    Predict(PredictArgs),
    /// Serve the prediction dashboard over HTTP
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct PredictArgs {
    /// Team A average goals scored (Poisson rate λ)
    #[arg(long, env = "TEAM_A_RATE", default_value = "1.2", allow_negative_numbers = true)]
    pub team_a_rate: f64,

    /// Team B average goals scored (Poisson rate λ)
    #[arg(long, env = "TEAM_B_RATE", default_value = "1.0", allow_negative_numbers = true)]
    pub team_b_rate: f64,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Print the prediction as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Settings shared by every prediction surface.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ModelArgs {
    /// Highest goal count per team covered by the score matrix
    #[arg(long, env = "MAX_GOALS", default_value_t = DEFAULT_MAX_GOALS)]
    pub max_goals: usize,

    /// Heatmap cells at or below this probability are left unlabeled
    #[arg(long, env = "HEATMAP_THRESHOLD", default_value = "0.001")]
    pub threshold: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Predict(args) => args.model.validate(),
            Command::Serve(args) => {
                if args.addr.parse::<std::net::SocketAddr>().is_err() {
                    anyhow::bail!("addr must be a socket address like 0.0.0.0:8080");
                }
                args.model.validate()
            }
        }
    }
}

impl ModelArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_goals > MAX_GOALS_LIMIT {
            anyhow::bail!("max_goals must be at most {}", MAX_GOALS_LIMIT);
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!("threshold must be between 0.0 and 1.0");
        }
        Ok(())
    }
}
