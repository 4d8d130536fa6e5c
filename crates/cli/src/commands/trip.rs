use chrono::{NaiveDate, Utc};
use clap::Args;

use packwise_core::domain::template::TemplateId;
use packwise_core::domain::trip::{DestinationType, LuggageType, Season, Trip, TripPlan};
use packwise_core::errors::{ApplicationError, DomainError};

use crate::commands::{run_with_store, CommandResult, Completed, Failure};

#[derive(Debug, Clone, Args)]
pub struct NewTripArgs {
    #[arg(long, help = "Trip name")]
    pub name: String,
    #[arg(long, default_value = "", help = "Free-form destination label")]
    pub destination: String,
    #[arg(long, help = "First day of the trip (YYYY-MM-DD)")]
    pub start: NaiveDate,
    #[arg(long, help = "Last day of the trip (YYYY-MM-DD)")]
    pub end: NaiveDate,
    #[arg(long = "destination-type", value_parser = parse_destination, default_value = "city")]
    pub destination_type: DestinationType,
    #[arg(long, value_parser = parse_season, default_value = "spring")]
    pub season: Season,
    #[arg(long, help = "Laundry is available during the trip")]
    pub laundry: bool,
    #[arg(long, value_parser = parse_luggage, default_value = "checked")]
    pub luggage: LuggageType,
    #[arg(long = "activity", help = "Activity tag, repeatable (e.g. Beach/Swimming)")]
    pub activities: Vec<String>,
    #[arg(long, help = "Master list to start from")]
    pub template: Option<String>,
}

pub fn run(args: NewTripArgs) -> CommandResult {
    run_with_store("trip-new", |config, repositories| async move {
        if args.end < args.start {
            return Err(Failure::from(DomainError::InvariantViolation(format!(
                "end date {} is before start date {}",
                args.end, args.start
            ))));
        }

        let plan = TripPlan {
            name: args.name,
            destination: args.destination,
            start_date: args.start,
            end_date: args.end,
            destination_type: args.destination_type,
            season: args.season,
            laundry: args.laundry,
            luggage_type: args.luggage,
            activities: args.activities,
        };

        let trip = match args.template {
            Some(template_id) => {
                let id = TemplateId(template_id.trim().to_string());
                let template = repositories
                    .templates
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(|| ApplicationError::NotFound(format!("template `{id}`")))?;
                Trip::from_template(&template, plan, &config.heuristics, Utc::now())
            }
            None => Trip::new(plan, Utc::now()),
        };

        repositories.trips.save(trip.clone()).await?;
        tracing::info!(
            event_name = "cli.trip.created",
            trip_id = %trip.id,
            days = trip.days(),
            item_count = trip.items.len(),
            "trip created"
        );

        Completed::new(format!("created trip {} ({} days)", trip.id, trip.days())).with_data(&trip)
    })
}

fn parse_destination(value: &str) -> Result<DestinationType, String> {
    DestinationType::parse(value)
        .ok_or_else(|| format!("unknown destination type `{value}` (expected city|beach|mountain|rural)"))
}

fn parse_season(value: &str) -> Result<Season, String> {
    Season::parse(value)
        .ok_or_else(|| format!("unknown season `{value}` (expected spring|summer|fall|winter)"))
}

fn parse_luggage(value: &str) -> Result<LuggageType, String> {
    LuggageType::parse(value)
        .ok_or_else(|| format!("unknown luggage type `{value}` (expected carry-on|checked|hybrid)"))
}
