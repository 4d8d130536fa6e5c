//! Packing-list domain: trips, master lists, heuristic quantities and
//! smart suggestions.

pub mod config;
pub mod domain;
pub mod errors;
pub mod heuristics;
pub mod suggestions;
pub mod templates;

pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat, StorageBackend};
pub use domain::item::{ItemId, PackingItem};
pub use domain::progress::{PackingProgress, TripReview};
pub use domain::template::{MasterList, TemplateId, TemplateItem};
pub use domain::trip::{
    DestinationType, LuggageType, Season, Trip, TripDescriptor, TripId, TripPlan, TripStatus,
};
pub use errors::{ApplicationError, DomainError};
pub use heuristics::{
    compute_quantity, explain, HeuristicConfig, HeuristicConfigPatch, QuantityEngine,
    QuantityEstimate,
};
pub use suggestions::{
    apply_suggestions, dismiss_suggestion, generate_suggestions, ApplyReport, Suggestion,
    SuggestionEngine, SuggestionSelection, SuggestionType,
};
