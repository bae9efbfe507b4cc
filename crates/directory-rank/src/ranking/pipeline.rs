use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{Listing, PlacedListing, SearchQuery};
use super::featured::{inject_featured, FeaturedPlacementConfig};
use super::organic::OrganicScorer;
use super::sorter::sort_listings;

/// Stateless search composition: filter, score, sort, then merge paid placements.
#[derive(Debug, Clone)]
pub struct SearchPipeline {
    placement: FeaturedPlacementConfig,
    scorer: OrganicScorer,
}

impl SearchPipeline {
    pub fn new(placement: FeaturedPlacementConfig, as_of: DateTime<Utc>) -> Self {
        Self {
            placement,
            scorer: OrganicScorer::new(as_of),
        }
    }

    /// Rank `listings` for `query` and merge `featured` into the result.
    ///
    /// `featured` must already be restricted to listings holding an active paid
    /// placement. The query's hard filters apply to both sets.
    pub fn search(
        &self,
        listings: &[Listing],
        featured: &[Listing],
        query: Option<&SearchQuery>,
    ) -> Vec<PlacedListing> {
        let admitted: Vec<Listing> = listings
            .iter()
            .filter(|listing| query.map_or(true, |query| query.admits(listing)))
            .cloned()
            .collect();
        let sponsored: Vec<Listing> = featured
            .iter()
            .filter(|listing| query.map_or(true, |query| query.admits(listing)))
            .cloned()
            .collect();

        debug!(
            candidates = listings.len(),
            admitted = admitted.len(),
            featured = sponsored.len(),
            "scoring search candidates"
        );

        let ranked = sort_listings(&self.scorer, &admitted, query);
        inject_featured(ranked, sponsored, &self.placement)
    }
}
