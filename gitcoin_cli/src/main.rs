mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitcoin_api::{ClientConfig, Gitcoin};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "gitcoin")]
#[command(about = "Query bounties from the Gitcoin REST API")]
struct Cli {
    /// Output format: table, markdown, csv or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bounties or look one up by primary key
    Bounties(commands::bounties::BountiesArgs),
    /// List the filters the bounties endpoint accepts
    Fields,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gitcoin=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let config = ClientConfig::from_env();
    let client = Gitcoin::from_config(&config);

    match &cli.command {
        Commands::Bounties(args) => commands::bounties::run(args, &client, &format)?,
        Commands::Fields => commands::fields::run(&client, &format)?,
    }

    Ok(())
}
