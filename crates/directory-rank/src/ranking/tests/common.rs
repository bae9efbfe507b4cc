use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::ranking::domain::{
    AcceptingNewPatients, AvailabilityFlags, Listing, ListingBadges, ListingId, ServiceFlags,
    VerificationTier,
};

pub(crate) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Unverified listing with middling completeness, last touched 60 days before `as_of`.
pub(crate) fn listing(id: &str, name: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        name: name.to_string(),
        city: "austin-tx".to_string(),
        address: None,
        phone: None,
        website: None,
        hours: BTreeMap::new(),
        verification: VerificationTier::Unverified,
        completeness_score: 60,
        services: ServiceFlags::default(),
        availability: AvailabilityFlags::default(),
        badges: ListingBadges::default(),
        accepting_new_patients: AcceptingNewPatients::Unspecified,
        insurance: Vec::new(),
        languages: Vec::new(),
        latitude: None,
        longitude: None,
        updated_at: as_of() - Duration::days(60),
    }
}

/// Listing with every profile field populated.
pub(crate) fn complete_listing(id: &str, name: &str) -> Listing {
    let mut entry = listing(id, name);
    entry.address = Some("100 Congress Ave".to_string());
    entry.phone = Some("+1 512 555 0100".to_string());
    entry.website = Some("https://example.com".to_string());
    entry
        .hours
        .insert("monday".to_string(), "08:00-17:00".to_string());
    entry.services.emergency = true;
    entry.insurance = vec!["Delta Dental PPO".to_string()];
    entry.languages = vec!["English".to_string()];
    entry.verification = VerificationTier::Verified;
    entry
}
