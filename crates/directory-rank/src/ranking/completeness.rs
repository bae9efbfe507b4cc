use super::domain::Listing;

const NAME_POINTS: u8 = 10;
const ADDRESS_POINTS: u8 = 10;
const PHONE_POINTS: u8 = 10;
const WEBSITE_POINTS: u8 = 10;
const HOURS_POINTS: u8 = 15;
const SERVICES_POINTS: u8 = 15;
const INSURANCE_POINTS: u8 = 10;
const LANGUAGES_POINTS: u8 = 10;
const VERIFIED_POINTS: u8 = 10;

pub const MAX_COMPLETENESS: u8 = 100;

/// Rate how filled-out a listing profile is, in `0..=100`.
///
/// Each populated field contributes once regardless of how much data it holds.
pub fn score_completeness(listing: &Listing) -> u8 {
    let checks = [
        (has_text(&listing.name), NAME_POINTS),
        (has_optional_text(&listing.address), ADDRESS_POINTS),
        (has_optional_text(&listing.phone), PHONE_POINTS),
        (has_optional_text(&listing.website), WEBSITE_POINTS),
        (!listing.hours.is_empty(), HOURS_POINTS),
        (listing.services.any(), SERVICES_POINTS),
        (!listing.insurance.is_empty(), INSURANCE_POINTS),
        (!listing.languages.is_empty(), LANGUAGES_POINTS),
        (listing.verification.is_verified(), VERIFIED_POINTS),
    ];

    let total: u32 = checks
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, points)| u32::from(*points))
        .sum();

    total.min(u32::from(MAX_COMPLETENESS)) as u8
}

fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

fn has_optional_text(value: &Option<String>) -> bool {
    value.as_deref().map(has_text).unwrap_or(false)
}
