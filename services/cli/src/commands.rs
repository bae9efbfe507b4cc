use crate::infra::{parse_timestamp, print_json, read_json, validate_listings};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use directory_rank::config::{parse_positions, AppConfig};
use directory_rank::error::AppError;
use directory_rank::ranking::{
    score_completeness, FeaturedPlacementConfig, Listing, PlacedListing, SearchPipeline,
    SearchQuery,
};
use directory_rank::scoring::quiz::MatchResult;
use directory_rank::{
    get_entitlements, match_listings, score_lead, Entitlements, LeadScoringInput, QuizAnswers,
    ScoreReason, Subscription, SubscriptionPlan, SubscriptionStatus,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// JSON array of listings to rank
    #[arg(long)]
    pub(crate) listings: PathBuf,
    /// JSON array of listings holding an active paid placement
    #[arg(long)]
    pub(crate) featured: Option<PathBuf>,
    /// JSON search query (service, insurance, availability, origin, radius)
    #[arg(long)]
    pub(crate) query: Option<PathBuf>,
    /// Override the configured sponsored quota
    #[arg(long)]
    pub(crate) max_featured: Option<usize>,
    /// Override the configured sponsored positions, e.g. "1,4,7"
    #[arg(long)]
    pub(crate) positions: Option<String>,
    /// Evaluate recency as of this RFC 3339 instant (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON array of candidate listings
    #[arg(long)]
    pub(crate) listings: PathBuf,
    /// JSON quiz answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct LeadArgs {
    /// JSON lead scoring input
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct EntitlementsArgs {
    /// Subscription plan; omit for no subscription
    #[arg(long, value_enum)]
    pub(crate) plan: Option<PlanArg>,
    /// Subscription status
    #[arg(long, value_enum, default_value_t = StatusArg::Active)]
    pub(crate) status: StatusArg,
    /// Whether the listing has been claimed by its owner
    #[arg(long)]
    pub(crate) claimed: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompletenessArgs {
    /// JSON array of listings to rate
    #[arg(long)]
    pub(crate) listings: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlanArg {
    Free,
    Pro,
    Premium,
}

impl From<PlanArg> for SubscriptionPlan {
    fn from(value: PlanArg) -> Self {
        match value {
            PlanArg::Free => SubscriptionPlan::Free,
            PlanArg::Pro => SubscriptionPlan::Pro,
            PlanArg::Premium => SubscriptionPlan::Premium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
    Active,
    Trialing,
    PastDue,
    Canceled,
}

impl From<StatusArg> for SubscriptionStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => SubscriptionStatus::Active,
            StatusArg::Trialing => SubscriptionStatus::Trialing,
            StatusArg::PastDue => SubscriptionStatus::PastDue,
            StatusArg::Canceled => SubscriptionStatus::Canceled,
        }
    }
}

/// Ranked row as rendered to callers.
#[derive(Debug, Serialize)]
pub(crate) struct SearchResultView {
    pub(crate) rank: usize,
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) is_sponsored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) organic_score: Option<f64>,
}

impl SearchResultView {
    pub(crate) fn from_placed(results: &[PlacedListing]) -> Vec<Self> {
        results
            .iter()
            .enumerate()
            .map(|(index, entry)| Self {
                rank: index + 1,
                id: entry.listing.id.0.clone(),
                name: entry.listing.name.clone(),
                is_sponsored: entry.is_sponsored,
                organic_score: entry
                    .organic_score
                    .map(|score| (score * 100.0).round() / 100.0),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchView {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) score: u8,
    pub(crate) reasons: Vec<ScoreReason>,
}

impl From<MatchResult> for MatchView {
    fn from(value: MatchResult) -> Self {
        Self {
            id: value.listing.id.0,
            name: value.listing.name,
            score: value.score,
            reasons: value.reasons,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletenessView {
    id: String,
    stored: u8,
    computed: u8,
}

pub(crate) fn placement_for(
    config: &AppConfig,
    max_featured: Option<usize>,
    positions: Option<&str>,
) -> Result<FeaturedPlacementConfig, AppError> {
    let max_featured = max_featured.unwrap_or(config.placement.max_featured);
    let positions = match positions {
        Some(raw) => parse_positions(raw)?,
        None => config.placement.positions.clone(),
    };
    Ok(FeaturedPlacementConfig::new(max_featured, positions))
}

pub(crate) fn run_search(args: SearchArgs, config: &AppConfig) -> Result<(), AppError> {
    let placement = placement_for(config, args.max_featured, args.positions.as_deref())?;

    let listings: Vec<Listing> = read_json(&args.listings)?;
    validate_listings(&listings)?;
    let featured: Vec<Listing> = match &args.featured {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    validate_listings(&featured)?;
    let query: Option<SearchQuery> = match &args.query {
        Some(path) => Some(read_json(path)?),
        None => None,
    };
    if let Some(query) = &query {
        query.validate()?;
    }

    let pipeline = SearchPipeline::new(placement, args.as_of.unwrap_or_else(Utc::now));
    let results = pipeline.search(&listings, &featured, query.as_ref());
    info!(
        listings = listings.len(),
        featured = featured.len(),
        returned = results.len(),
        "search ranked"
    );

    print_json(&SearchResultView::from_placed(&results))
}

/// Keep only listings in the patient's city before matching.
pub(crate) fn match_in_city(listings: &[Listing], answers: &QuizAnswers) -> Vec<MatchView> {
    let local: Vec<Listing> = listings
        .iter()
        .filter(|listing| listing.city == answers.city)
        .cloned()
        .collect();
    match_listings(&local, answers)
        .into_iter()
        .map(MatchView::from)
        .collect()
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let listings: Vec<Listing> = read_json(&args.listings)?;
    validate_listings(&listings)?;
    let answers: QuizAnswers = read_json(&args.answers)?;

    let matches = match_in_city(&listings, &answers);
    info!(city = %answers.city, returned = matches.len(), "quiz matched");
    print_json(&matches)
}

pub(crate) fn run_lead(args: LeadArgs) -> Result<(), AppError> {
    let input: LeadScoringInput = read_json(&args.input)?;
    let result = score_lead(&input);
    info!(score = result.score, "lead scored");
    print_json(&result)
}

pub(crate) fn entitlements_for(args: &EntitlementsArgs) -> Entitlements {
    let subscription = args
        .plan
        .map(|plan| Subscription::new(plan.into(), args.status.into()));
    get_entitlements(subscription.as_ref(), args.claimed)
}

pub(crate) fn run_entitlements(args: EntitlementsArgs) -> Result<(), AppError> {
    print_json(&entitlements_for(&args))
}

pub(crate) fn run_completeness(args: CompletenessArgs) -> Result<(), AppError> {
    let listings: Vec<Listing> = read_json(&args.listings)?;
    let rows: Vec<CompletenessView> = listings
        .iter()
        .map(|listing| CompletenessView {
            id: listing.id.0.clone(),
            stored: listing.completeness_score,
            computed: score_completeness(listing),
        })
        .collect();
    print_json(&rows)
}
