use std::cmp::Ordering;

use super::domain::{Listing, ScoredListing, SearchQuery};
use super::organic::OrganicScorer;

/// Score every listing against `query` and return them in ranked order.
pub fn sort_listings(
    scorer: &OrganicScorer,
    listings: &[Listing],
    query: Option<&SearchQuery>,
) -> Vec<ScoredListing> {
    let scored = listings
        .iter()
        .map(|listing| ScoredListing {
            organic_score: scorer.score(listing, query),
            listing: listing.clone(),
        })
        .collect();
    sort_scored(scored)
}

/// Order already-scored listings by the ranking tie-break chain.
///
/// Descending organic score, then verification tier, then completeness, then
/// ascending display name. The listing id breaks any remaining tie so that the
/// order is total and re-sorting the output is a no-op.
pub fn sort_scored(mut listings: Vec<ScoredListing>) -> Vec<ScoredListing> {
    listings.sort_by(compare_ranked);
    listings
}

pub(crate) fn compare_ranked(a: &ScoredListing, b: &ScoredListing) -> Ordering {
    b.organic_score
        .total_cmp(&a.organic_score)
        .then_with(|| {
            b.listing
                .verification
                .rank()
                .cmp(&a.listing.verification.rank())
        })
        .then_with(|| {
            b.listing
                .completeness_score
                .cmp(&a.listing.completeness_score)
        })
        .then_with(|| compare_names(&a.listing.name, &b.listing.name))
        .then_with(|| a.listing.id.cmp(&b.listing.id))
}

/// Case-insensitive alphabetical comparison; exact spelling decides only true ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.trim().to_lowercase();
    let folded_b = b.trim().to_lowercase();
    folded_a.cmp(&folded_b).then_with(|| a.cmp(b))
}
