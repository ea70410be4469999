use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::load_config;
use commands::{list_models, run_playground, simulate};

#[derive(Parser)]
#[command(name = "voltcast")]
#[command(about = "Energy price forecasting demo: headless page controller tools")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    ///
    /// Values may also be set through VOLTCAST_* environment variables,
    /// e.g. VOLTCAST_TICK_INTERVAL_MS=1000.
    #[arg(short, long, env = "VOLTCAST_CONFIG", global = true)]
    pub config: Option<String>,

    /// Fixed seed for the price simulator
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a request to the simulated API playground
    ///
    /// Known endpoints:
    ///   /api/v1/price/current
    ///   /api/v1/forecast/24
    ///   /api/v1/models
    Playground {
        /// Endpoint path
        endpoint: String,

        /// Override the artificial response delay
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Run the price simulator and print the ticker after every tick
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value_t = 10)]
        ticks: u32,

        /// Switch to this region before the first tick
        #[arg(short, long)]
        region: Option<String>,

        /// Wait the real tick interval between ticks
        #[arg(long)]
        realtime: bool,
    },
    /// List the forecasting models, or show the metrics of one
    Models {
        /// Model tag, e.g. "transformer" or "ensemble"
        tag: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<String> {
        let mut config = load_config(self.config.as_deref())?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        match self.command {
            Commands::Playground { endpoint, delay_ms } => {
                if let Some(delay_ms) = delay_ms {
                    config.playground_delay_ms = delay_ms;
                }
                run_playground(config, &endpoint).await
            }
            Commands::Simulate { ticks, region, realtime } => {
                simulate(config, ticks, region.as_deref(), realtime).await
            }
            Commands::Models { tag } => list_models(config, tag.as_deref()),
        }
    }
}
