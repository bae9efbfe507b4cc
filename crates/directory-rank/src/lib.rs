//! Ranking and placement engine for a local services directory.
//!
//! Every scorer in this crate is a pure function over caller-supplied values:
//! no I/O, no shared state. The `config`, `error`, and `telemetry` modules exist
//! for the binaries that drive the engine.

pub mod config;
pub mod entitlements;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod telemetry;

pub use entitlements::{
    get_entitlements, Entitlements, Subscription, SubscriptionPlan, SubscriptionStatus,
};
pub use ranking::{
    inject_featured, score_completeness, score_organic, sort_listings, FeaturedPlacementConfig,
    Listing, ListingId, PlacedListing, ScoredListing, SearchPipeline, SearchQuery,
};
pub use scoring::lead::{score_lead, LeadScoringInput};
pub use scoring::quiz::{match_listings, MatchResult, QuizAnswers};
pub use scoring::{ScoreReason, ScoreResult};
