use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::domain::{Listing, ListingId, PlacedListing, ScoredListing};

/// Quota and slot layout for paid placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedPlacementConfig {
    pub max_featured: usize,
    /// 1-indexed result positions reserved for sponsored entries.
    pub positions: Vec<usize>,
}

impl FeaturedPlacementConfig {
    pub fn new(max_featured: usize, positions: Vec<usize>) -> Self {
        Self {
            max_featured,
            positions,
        }
    }

    /// Distinct, ascending, 1-indexed positions. Zero is not a slot.
    pub fn normalized_positions(&self) -> BTreeSet<usize> {
        self.positions
            .iter()
            .copied()
            .filter(|position| *position >= 1)
            .collect()
    }
}

impl Default for FeaturedPlacementConfig {
    fn default() -> Self {
        Self::new(3, vec![1, 4, 7])
    }
}

/// Merge sponsored candidates into an organically ranked list.
///
/// The first `max_featured` distinct featured ids are placed, each at the next
/// configured position reached during the scan, or after the organic entries
/// once those run out. A placed featured listing is withheld from the organic
/// stream so every id appears once.
pub fn inject_featured(
    organic: Vec<ScoredListing>,
    featured: Vec<Listing>,
    config: &FeaturedPlacementConfig,
) -> Vec<PlacedListing> {
    let positions = config.normalized_positions();

    let mut selected_ids: HashSet<ListingId> = HashSet::new();
    let mut sponsored: Vec<Listing> = Vec::new();
    for candidate in featured {
        if sponsored.len() >= config.max_featured {
            break;
        }
        if selected_ids.insert(candidate.id.clone()) {
            sponsored.push(candidate);
        } else {
            trace!(listing_id = %candidate.id, "skipping duplicate featured candidate");
        }
    }

    let organic_count = organic.len();
    let mut organic_stream = organic
        .into_iter()
        .filter(|entry| !selected_ids.contains(&entry.listing.id))
        .peekable();
    let mut sponsored_stream = sponsored.into_iter().peekable();

    let mut merged: Vec<PlacedListing> = Vec::with_capacity(organic_count + selected_ids.len());
    let mut seen: HashSet<ListingId> = HashSet::with_capacity(organic_count + selected_ids.len());
    let mut position: usize = 1;

    loop {
        let organic_exhausted = organic_stream.peek().is_none();
        let sponsored_exhausted = sponsored_stream.peek().is_none();
        if organic_exhausted && sponsored_exhausted {
            break;
        }

        let take_sponsored =
            !sponsored_exhausted && (organic_exhausted || positions.contains(&position));

        let entry = if take_sponsored {
            sponsored_stream.next().map(|listing| PlacedListing {
                listing,
                organic_score: None,
                is_sponsored: true,
            })
        } else {
            organic_stream.next().map(|scored| PlacedListing {
                listing: scored.listing,
                organic_score: Some(scored.organic_score),
                is_sponsored: false,
            })
        };

        let Some(entry) = entry else {
            break;
        };
        if !seen.insert(entry.listing.id.clone()) {
            trace!(listing_id = %entry.listing.id, "dropping repeated organic entry");
            continue;
        }
        merged.push(entry);
        position += 1;
    }

    debug!(
        organic = organic_count,
        sponsored = merged.iter().filter(|entry| entry.is_sponsored).count(),
        total = merged.len(),
        "merged featured placements"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::tests::common::listing;

    fn organic(ids: &[&str]) -> Vec<ScoredListing> {
        ids.iter()
            .enumerate()
            .map(|(rank, id)| ScoredListing {
                listing: listing(id, &format!("Practice {id}")),
                organic_score: 100.0 - rank as f64,
            })
            .collect()
    }

    fn featured(ids: &[&str]) -> Vec<Listing> {
        ids.iter()
            .map(|id| listing(id, &format!("Practice {id}")))
            .collect()
    }

    fn layout(merged: &[PlacedListing]) -> Vec<String> {
        merged
            .iter()
            .map(|entry| {
                if entry.is_sponsored {
                    format!("{}*", entry.listing.id)
                } else {
                    entry.listing.id.to_string()
                }
            })
            .collect()
    }

    #[test]
    fn places_single_featured_at_first_slot() {
        let merged = inject_featured(
            organic(&["1", "2", "3"]),
            featured(&["4"]),
            &FeaturedPlacementConfig::new(1, vec![1]),
        );
        assert_eq!(layout(&merged), vec!["4*", "1", "2", "3"]);
    }

    #[test]
    fn respects_quota_across_positions() {
        let merged = inject_featured(
            organic(&["1", "2", "3", "4", "5"]),
            featured(&["a", "b", "c"]),
            &FeaturedPlacementConfig::new(2, vec![2, 4, 6]),
        );
        assert_eq!(layout(&merged), vec!["1", "a*", "2", "b*", "3", "4", "5"]);
    }

    #[test]
    fn overlapping_listing_appears_once_at_featured_slot() {
        let merged = inject_featured(
            organic(&["1", "2", "3"]),
            featured(&["2"]),
            &FeaturedPlacementConfig::new(1, vec![3]),
        );
        assert_eq!(layout(&merged), vec!["1", "3", "2*"]);
    }

    #[test]
    fn trailing_featured_fill_after_organic_runs_out() {
        let merged = inject_featured(
            organic(&["1"]),
            featured(&["a", "b", "c"]),
            &FeaturedPlacementConfig::new(2, vec![5, 9]),
        );
        assert_eq!(layout(&merged), vec!["1", "a*", "b*"]);
    }

    #[test]
    fn pathological_positions_are_normalized() {
        let config = FeaturedPlacementConfig::new(3, vec![0, 2, 2, 2, 400]);
        assert_eq!(
            config.normalized_positions().into_iter().collect::<Vec<_>>(),
            vec![2, 400]
        );

        let merged = inject_featured(organic(&["1", "2"]), featured(&["a", "a", "b"]), &config);
        assert_eq!(layout(&merged), vec!["1", "a*", "2", "b*"]);
    }

    #[test]
    fn zero_quota_emits_organic_only() {
        let merged = inject_featured(
            organic(&["1", "2"]),
            featured(&["a"]),
            &FeaturedPlacementConfig::new(0, vec![1]),
        );
        assert_eq!(layout(&merged), vec!["1", "2"]);
    }

    #[test]
    fn repeated_organic_ids_are_emitted_once() {
        let merged = inject_featured(
            organic(&["1", "1", "2"]),
            Vec::new(),
            &FeaturedPlacementConfig::default(),
        );
        assert_eq!(layout(&merged), vec!["1", "2"]);
    }
}
