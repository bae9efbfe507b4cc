//! Property-based tests using proptest.
//! Invariants that must hold for every input the engine can be handed.

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use directory_rank::ranking::{
    inject_featured, score_completeness, sort_listings, sort_scored, AcceptingNewPatients,
    FeaturedPlacementConfig, Listing, ListingId, OrganicScorer, VerificationTier,
};
use directory_rank::scoring::quiz::{AnxietyLevel, PatientType, QuizUrgency};
use directory_rank::{match_listings, score_lead, LeadScoringInput, QuizAnswers};
use proptest::prelude::*;

fn tier() -> impl Strategy<Value = VerificationTier> {
    prop_oneof![
        Just(VerificationTier::Unverified),
        Just(VerificationTier::Pending),
        Just(VerificationTier::Verified),
    ]
}

prop_compose! {
    fn arb_listing()(
        id in "[a-z]{1,6}",
        name in "[A-Za-z ]{0,12}",
        verification in tier(),
        completeness_score in 0u8..=100,
        address in proptest::option::of("[a-z0-9 ]{0,10}"),
        flags in any::<[bool; 6]>(),
        insurance in proptest::collection::vec("[A-Za-z ]{0,8}", 0..3),
        age_days in 0i64..120,
    ) -> Listing {
        let mut listing: Listing = serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "city": "austin-tx",
            "updated_at": "2025-06-01T12:00:00Z",
        }))
        .expect("minimal listing parses");
        listing.verification = verification;
        listing.completeness_score = completeness_score;
        listing.address = address;
        let [emergency, pediatric, same_week, weekend, anxiety_friendly, accepting] = flags;
        listing.services.emergency = emergency;
        listing.services.pediatric = pediatric;
        listing.availability.same_week = same_week;
        listing.availability.weekend = weekend;
        listing.badges.anxiety_friendly = anxiety_friendly;
        if accepting {
            listing.accepting_new_patients = AcceptingNewPatients::Yes;
        }
        listing.insurance = insurance;
        listing.updated_at -= Duration::days(age_days);
        listing
    }
}

prop_compose! {
    fn arb_lead()(
        urgency in proptest::option::of("\\PC{0,12}"),
        insurance in proptest::option::of("\\PC{0,12}"),
        message_length in 0usize..5_000,
        has_phone in any::<bool>(),
        source_page in proptest::option::of("\\PC{0,24}"),
        city_match in proptest::option::of(any::<bool>()),
    ) -> LeadScoringInput {
        LeadScoringInput { urgency, insurance, message_length, has_phone, source_page, city_match }
    }
}

fn scorer() -> OrganicScorer {
    OrganicScorer::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    )
}

proptest! {
    #[test]
    fn lead_score_stays_in_bounds(input in arb_lead()) {
        let result = score_lead(&input);
        prop_assert!(result.score <= 100);
        prop_assert!(!result.reasons.is_empty());
    }

    #[test]
    fn completeness_stays_in_bounds(listing in arb_listing()) {
        prop_assert!(score_completeness(&listing) <= 100);
    }

    #[test]
    fn raising_completeness_never_lowers_organic_score(
        listing in arb_listing(),
        bump in 0u8..=100,
    ) {
        let scorer = scorer();
        let mut richer = listing.clone();
        richer.completeness_score = listing.completeness_score.saturating_add(bump).min(100);
        prop_assert!(scorer.score(&richer, None) >= scorer.score(&listing, None));
    }

    #[test]
    fn sorting_twice_changes_nothing(listings in proptest::collection::vec(arb_listing(), 0..12)) {
        let once = sort_listings(&scorer(), &listings, None);
        let twice = sort_scored(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn placement_respects_quota_and_uniqueness(
        organic in proptest::collection::vec(arb_listing(), 0..10),
        featured in proptest::collection::vec(arb_listing(), 0..6),
        max_featured in 0usize..4,
        positions in proptest::collection::vec(0usize..15, 0..5),
    ) {
        let config = FeaturedPlacementConfig::new(max_featured, positions);
        let ranked = sort_listings(&scorer(), &organic, None);
        let distinct_organic: HashSet<ListingId> =
            organic.iter().map(|listing| listing.id.clone()).collect();
        let distinct_featured: HashSet<ListingId> =
            featured.iter().map(|listing| listing.id.clone()).collect();

        let merged = inject_featured(ranked, featured, &config);

        let sponsored = merged.iter().filter(|entry| entry.is_sponsored).count();
        prop_assert!(sponsored <= max_featured);
        prop_assert!(merged.len() <= distinct_organic.len() + distinct_featured.len());

        let mut seen = HashSet::new();
        for entry in &merged {
            prop_assert!(seen.insert(entry.listing.id.clone()), "duplicate id {}", entry.listing.id);
        }
        for id in &distinct_organic {
            prop_assert!(seen.contains(id), "organic listing {} was lost", id);
        }
    }

    #[test]
    fn match_results_are_bounded_and_ordered(
        listings in proptest::collection::vec(arb_listing(), 0..10),
        emergency in any::<bool>(),
        weekend_needed in any::<bool>(),
        insurance in proptest::option::of("[A-Za-z ]{0,8}"),
    ) {
        let answers = QuizAnswers {
            city: "austin-tx".to_string(),
            urgency: if emergency { QuizUrgency::Emergency } else { QuizUrgency::SameWeek },
            patient_type: PatientType::Both,
            anxiety: AnxietyLevel::High,
            weekend_needed,
            insurance,
            language: None,
            budget_sensitivity: None,
        };

        let results = match_listings(&listings, &answers);
        prop_assert!(results.len() <= 3);
        prop_assert!(results.len() <= listings.len());
        prop_assert!(results.iter().all(|result| result.score <= 100));
        prop_assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
}
