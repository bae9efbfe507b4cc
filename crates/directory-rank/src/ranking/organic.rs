use chrono::{DateTime, Utc};

use super::domain::{AcceptingNewPatients, Listing, SearchQuery};
use super::geo::{haversine_miles, listing_coordinates};

const COMPLETENESS_WEIGHT: f64 = 0.4;
const VERIFIED_BONUS: f64 = 30.0;
const SERVICE_MATCH_BONUS: f64 = 20.0;
const RECENCY_WINDOW_DAYS: f64 = 30.0;
const RECENCY_MAX_BONUS: f64 = 10.0;
const RECENCY_DECAY_DAYS: f64 = 3.0;
const INSURANCE_MATCH_BONUS: f64 = 15.0;
const AVAILABILITY_MATCH_BONUS: f64 = 10.0;
const DISTANCE_MAX_BONUS: f64 = 20.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-query relevance scorer.
///
/// The score is unbounded above and only meaningful relative to other listings
/// scored with the same query and instant.
#[derive(Debug, Clone, Copy)]
pub struct OrganicScorer {
    as_of: DateTime<Utc>,
}

impl OrganicScorer {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self { as_of }
    }

    pub fn score(&self, listing: &Listing, query: Option<&SearchQuery>) -> f64 {
        let mut score = f64::from(listing.completeness_score) * COMPLETENESS_WEIGHT;

        if listing.verification.is_verified() {
            score += VERIFIED_BONUS;
        }

        score += self.recency_bonus(listing);

        let Some(query) = query else {
            return score;
        };

        if let Some(service) = query.service {
            if service.offered_by(&listing.services) {
                score += SERVICE_MATCH_BONUS;
            }
        }

        if insurance_matches(query.insurance.as_deref(), &listing.insurance) {
            score += INSURANCE_MATCH_BONUS;
        }

        score += availability_bonus(query, listing);
        score += distance_bonus(query, listing);
        score
    }

    fn recency_bonus(&self, listing: &Listing) -> f64 {
        let elapsed = self.as_of.signed_duration_since(listing.updated_at);
        // Timestamps ahead of the clock count as updated just now.
        let days = (elapsed.num_seconds() as f64 / SECONDS_PER_DAY).max(0.0);
        if days > RECENCY_WINDOW_DAYS {
            return 0.0;
        }
        (RECENCY_MAX_BONUS - days / RECENCY_DECAY_DAYS).max(0.0)
    }
}

/// Score one listing against `query` as of the current wall-clock time.
///
/// Results drift as the clock advances; use [`OrganicScorer`] with a fixed
/// instant when scores must be reproducible.
pub fn score_organic(listing: &Listing, query: Option<&SearchQuery>) -> f64 {
    OrganicScorer::new(Utc::now()).score(listing, query)
}

fn insurance_matches(requested: Option<&str>, plans: &[String]) -> bool {
    let Some(requested) = requested.map(str::trim).filter(|value| !value.is_empty()) else {
        return false;
    };
    let requested = requested.to_lowercase();
    plans
        .iter()
        .any(|plan| plan.trim().to_lowercase() == requested)
}

fn availability_bonus(query: &SearchQuery, listing: &Listing) -> f64 {
    let wanted = &query.availability;
    let offered = &listing.availability;
    let matches = [
        wanted.accepting_new_patients
            && listing.accepting_new_patients == AcceptingNewPatients::Yes,
        wanted.same_week && offered.same_week,
        wanted.emergency_today && offered.emergency_today,
        wanted.weekend && offered.weekend,
    ];
    matches.iter().filter(|hit| **hit).count() as f64 * AVAILABILITY_MATCH_BONUS
}

fn distance_bonus(query: &SearchQuery, listing: &Listing) -> f64 {
    let (Some(origin), Some(radius)) = (query.origin, query.radius_miles) else {
        return 0.0;
    };
    // Zero or non-finite radii are rejected upstream; contribute nothing if one slips through.
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    let Some(position) = listing_coordinates(listing) else {
        return 0.0;
    };

    let distance = haversine_miles(origin, position);
    if !distance.is_finite() {
        return 0.0;
    }
    let clamped = distance.min(radius);
    ((1.0 - clamped / radius) * DISTANCE_MAX_BONUS).max(0.0)
}
