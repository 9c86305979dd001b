//! CLI frontend for the Questweave consistency engine and simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qw",
    about = "Questweave: validate and playtest narrative quest graphs",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the whole narrative graph of a project
    Validate {
        /// Project JSON file
        project: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a single quest in the context of its project
    Quest {
        /// Project JSON file
        project: PathBuf,

        /// Quest id
        quest_id: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the validation status of a project
    Status {
        /// Project JSON file
        project: PathBuf,

        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simulate a playthrough of one story arc
    Simulate {
        /// Project JSON file
        project: PathBuf,

        /// Story arc id to play
        #[arg(short, long)]
        arc: String,

        /// Play style: aggressive, diplomatic, exploration, balanced
        #[arg(short, long, default_value = "balanced")]
        style: String,

        /// Simulated play time budget in minutes
        #[arg(short, long, default_value = "60")]
        minutes: u32,

        /// RNG seed for a reproducible run (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Name of the simulated player
        #[arg(short, long)]
        player: Option<String>,

        /// Directory to save the result in
        #[arg(long)]
        store: Option<PathBuf>,

        /// Show the full event log
        #[arg(short, long)]
        verbose: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run many simulation requests in parallel
    Batch {
        /// Project JSON file
        project: PathBuf,

        /// JSON file with an array of simulation requests
        requests: PathBuf,

        /// Directory to save the results in
        #[arg(long)]
        store: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare stored simulation results
    Compare {
        /// Directory holding saved results
        #[arg(long)]
        store: PathBuf,

        /// Result ids (all stored results if omitted)
        ids: Vec<String>,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze one stored simulation result
    Analyze {
        /// Directory holding saved results
        #[arg(long)]
        store: PathBuf,

        /// Result id
        id: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { project, json } => commands::validate::run(&project, json),
        Commands::Quest {
            project,
            quest_id,
            json,
        } => commands::quest::run(&project, &quest_id, json),
        Commands::Status { project, json } => commands::status::run(&project, json),
        Commands::Simulate {
            project,
            arc,
            style,
            minutes,
            seed,
            player,
            store,
            verbose,
            json,
        } => commands::simulate::run(
            &project,
            commands::simulate::Options {
                arc,
                style,
                minutes,
                seed,
                player,
                store,
                verbose,
                json,
            },
        ),
        Commands::Batch {
            project,
            requests,
            store,
            json,
        } => commands::batch::run(&project, &requests, store.as_deref(), json),
        Commands::Compare { store, ids, json } => commands::compare::run(&store, &ids, json),
        Commands::Analyze { store, id, json } => commands::analyze::run(&store, &id, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
