pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::suggest::parse_selection;
use commands::trip::NewTripArgs;
use packwise_core::suggestions::SuggestionSelection;

#[derive(Debug, Parser)]
#[command(
    name = "packwise",
    about = "Packwise packing-list CLI",
    long_about = "Plan trips from master lists, size items with quantity heuristics, and review smart suggestions.",
    after_help = "Examples:\n  packwise templates\n  packwise trip-new --name Crete --start 2026-07-01 --end 2026-07-08 --destination-type beach --template beach-vacation\n  packwise suggest <TRIP_ID>\n  packwise apply <TRIP_ID> add:swimsuit laundry:<ITEM_ID>=4"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List built-in and saved master lists")]
    Templates,
    #[command(about = "Save the built-in master lists into the store for editing")]
    Seed,
    #[command(name = "trip-new", about = "Create a trip, optionally from a master list")]
    TripNew(NewTripArgs),
    #[command(about = "Show pending suggestions for a trip")]
    Suggest { trip_id: String },
    #[command(about = "Apply suggestions by id, optionally with an edited quantity (ID=QTY)")]
    Apply {
        trip_id: String,
        #[arg(value_parser = parse_selection)]
        selections: Vec<SuggestionSelection>,
        #[arg(long, help = "Apply every pending suggestion", conflicts_with = "selections")]
        all: bool,
    },
    #[command(about = "Dismiss a suggestion so it is no longer offered")]
    Dismiss { trip_id: String, suggestion_id: String },
    #[command(about = "Explain heuristic quantities for a trip's items")]
    Explain {
        trip_id: String,
        #[arg(long, help = "Explain a single item")]
        item: Option<String>,
    },
    #[command(about = "Show packing progress for a trip")]
    Progress { trip_id: String },
    #[command(about = "Toggle the packed flag on an item")]
    Pack { trip_id: String, item_id: String },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Templates => commands::templates::run(),
        Command::Seed => commands::seed::run(),
        Command::TripNew(args) => commands::trip::run(args),
        Command::Suggest { trip_id } => commands::suggest::run(trip_id),
        Command::Apply { trip_id, selections, all } => {
            commands::suggest::apply(trip_id, selections, all)
        }
        Command::Dismiss { trip_id, suggestion_id } => {
            commands::suggest::dismiss(trip_id, suggestion_id)
        }
        Command::Explain { trip_id, item } => commands::explain::run(trip_id, item),
        Command::Progress { trip_id } => commands::progress::run(trip_id),
        Command::Pack { trip_id, item_id } => commands::progress::pack(trip_id, item_id),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
