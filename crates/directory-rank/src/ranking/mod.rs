//! Organic ranking and featured placement for directory search.

mod completeness;
pub mod domain;
mod featured;
pub mod geo;
mod organic;
mod pipeline;
mod sorter;
pub mod validation;

#[cfg(test)]
pub(crate) mod tests;

pub use completeness::{score_completeness, MAX_COMPLETENESS};
pub use domain::{
    AcceptingNewPatients, AvailabilityFilter, AvailabilityFlags, Coordinates, Listing,
    ListingBadges, ListingId, PlacedListing, ScoredListing, SearchQuery, ServiceFlags, ServiceKey,
    UnknownServiceKey, VerificationTier,
};
pub use featured::{inject_featured, FeaturedPlacementConfig};
pub use organic::{score_organic, OrganicScorer};
pub use pipeline::SearchPipeline;
pub use sorter::{sort_listings, sort_scored};
pub use validation::{ListingValidationError, QueryValidationError};
