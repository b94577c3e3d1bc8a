use clap::{Parser, Subcommand};
use rent_forecast::models::query::{BedroomType, LocationKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rent-forecast", version, about = "Rent estimates and projections")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP service (default)
    Start,

    /// Estimate and project rent for one location
    Estimate {
        /// City ("Austin, TX"), state ("TX") or zip code
        location: String,

        #[command(flatten)]
        options: QueryOptions,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate several locations and print them side by side
    Compare {
        /// Locations to compare; repeats differing only in case are merged
        #[arg(required = true)]
        locations: Vec<String>,

        #[command(flatten)]
        options: QueryOptions,
    },

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct QueryOptions {
    /// Unit type: studio, 1, 2, 3 or house
    #[arg(short, long, default_value = "1", value_parser = parse_bedrooms)]
    pub bedrooms: BedroomType,

    /// Projection horizon in years
    #[arg(short, long, default_value = "3")]
    pub years: u32,

    /// Interpret the location as a city, state or zip (inferred when omitted)
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<LocationKind>,
}

fn parse_bedrooms(s: &str) -> Result<BedroomType, String> {
    s.parse().map_err(|e: rent_forecast::error::AppError| e.to_string())
}

fn parse_kind(s: &str) -> Result<LocationKind, String> {
    s.parse().map_err(|e: rent_forecast::error::AppError| e.to_string())
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}
