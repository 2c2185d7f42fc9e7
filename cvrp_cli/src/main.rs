use clap::{Parser, Subcommand};

use crate::{
    compare::CompareArgs, datasets::DatasetsSubcommands, generate::GenerateSubcommands,
    solve::SolveArgs,
};

mod algorithms;
mod compare;
mod datasets;
mod fleet_args;
mod generate;
mod parsers;
mod solve;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one configuration and print its routes
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Run every algorithm on the same instance and seed
    Compare {
        #[command(flatten)]
        args: CompareArgs,
    },
    Datasets {
        #[command(subcommand)]
        commands: DatasetsSubcommands,
    },
    /// List the algorithm catalog
    Algorithms,
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Solve { args }) => solve::run(args).await?,
        Some(Commands::Compare { args }) => compare::run(args)?,
        Some(Commands::Datasets { commands }) => datasets::run(commands)?,
        Some(Commands::Algorithms) => algorithms::run(),
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}
