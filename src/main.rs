use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use rent_forecast::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    // The server initializes tracing from its own config after loading it
    if !matches!(command, cli::Commands::Start) {
        init_tracing("warn", false);
    }

    match command {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Estimate {
            location,
            options,
            json,
        } => {
            commands::estimate::execute(&args.config, location, options, json).await?;
        }
        cli::Commands::Compare { locations, options } => {
            commands::compare::execute(&args.config, locations, options).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Rent Forecast v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
