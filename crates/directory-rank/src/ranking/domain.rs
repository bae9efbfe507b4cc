use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Identifier wrapper for directory listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Verification state of a listing, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationTier {
    #[default]
    Unverified,
    Pending,
    Verified,
}

impl VerificationTier {
    /// Rank used by the sorter tie-break chain (higher outranks lower).
    pub fn rank(self) -> u8 {
        match self {
            VerificationTier::Verified => 3,
            VerificationTier::Pending => 2,
            VerificationTier::Unverified => 1,
        }
    }

    pub fn is_verified(self) -> bool {
        self == VerificationTier::Verified
    }
}

/// Whether the practice is taking new patients. `Unspecified` is not `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptingNewPatients {
    Yes,
    No,
    #[default]
    Unspecified,
}

/// Services the practice offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceFlags {
    pub emergency: bool,
    pub pediatric: bool,
    pub clear_aligners: bool,
    pub implants: bool,
    pub cosmetic: bool,
    pub orthodontics: bool,
    pub sedation: bool,
}

impl ServiceFlags {
    pub fn any(&self) -> bool {
        ServiceKey::ALL.iter().any(|key| key.offered_by(self))
    }
}

/// Appointment availability advertised by the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityFlags {
    pub same_week: bool,
    pub emergency_today: bool,
    pub weekend: bool,
}

/// Editorial badges awarded to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingBadges {
    pub anxiety_friendly: bool,
}

/// Closed set of searchable services. Each key maps to exactly one flag.
///
/// Serialized in kebab-case; decoding goes through [`FromStr`] so snake_case
/// and spaced spellings are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKey {
    Emergency,
    Pediatric,
    ClearAligners,
    Implants,
    Cosmetic,
    Orthodontics,
    Sedation,
}

impl ServiceKey {
    pub const ALL: [ServiceKey; 7] = [
        ServiceKey::Emergency,
        ServiceKey::Pediatric,
        ServiceKey::ClearAligners,
        ServiceKey::Implants,
        ServiceKey::Cosmetic,
        ServiceKey::Orthodontics,
        ServiceKey::Sedation,
    ];

    pub fn offered_by(self, flags: &ServiceFlags) -> bool {
        match self {
            ServiceKey::Emergency => flags.emergency,
            ServiceKey::Pediatric => flags.pediatric,
            ServiceKey::ClearAligners => flags.clear_aligners,
            ServiceKey::Implants => flags.implants,
            ServiceKey::Cosmetic => flags.cosmetic,
            ServiceKey::Orthodontics => flags.orthodontics,
            ServiceKey::Sedation => flags.sedation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKey::Emergency => "emergency",
            ServiceKey::Pediatric => "pediatric",
            ServiceKey::ClearAligners => "clear-aligners",
            ServiceKey::Implants => "implants",
            ServiceKey::Cosmetic => "cosmetic",
            ServiceKey::Orthodontics => "orthodontics",
            ServiceKey::Sedation => "sedation",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service key '{0}'")]
pub struct UnknownServiceKey(pub String);

impl FromStr for ServiceKey {
    type Err = UnknownServiceKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        ServiceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| UnknownServiceKey(raw.to_string()))
    }
}

impl<'de> Deserialize<'de> for ServiceKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Directory entry as supplied by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    /// Locale key, e.g. `austin-tx`.
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Opening hours keyed by weekday.
    #[serde(default)]
    pub hours: BTreeMap<String, String>,
    #[serde(default)]
    pub verification: VerificationTier,
    /// Persisted completeness rating in `0..=100`.
    #[serde(default)]
    pub completeness_score: u8,
    #[serde(default)]
    pub services: ServiceFlags,
    #[serde(default)]
    pub availability: AvailabilityFlags,
    #[serde(default)]
    pub badges: ListingBadges,
    #[serde(default)]
    pub accepting_new_patients: AcceptingNewPatients,
    #[serde(default)]
    pub insurance: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Raw decimal coordinates as stored upstream; parsed lazily.
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Listing annotated with its per-query organic score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    pub listing: Listing,
    pub organic_score: f64,
}

/// Entry of the final merged result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedListing {
    pub listing: Listing,
    /// Absent for sponsored entries that were never organically scored.
    pub organic_score: Option<f64>,
    pub is_sponsored: bool,
}

/// Availability preferences carried by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityFilter {
    pub accepting_new_patients: bool,
    pub same_week: bool,
    pub emergency_today: bool,
    pub weekend: bool,
}

/// Parsed latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Per-search context. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub service: Option<ServiceKey>,
    pub verified_only: bool,
    pub insurance: Option<String>,
    pub availability: AvailabilityFilter,
    pub origin: Option<Coordinates>,
    pub radius_miles: Option<f64>,
}

impl SearchQuery {
    /// Hard filters applied before scoring.
    pub fn admits(&self, listing: &Listing) -> bool {
        !self.verified_only || listing.verification.is_verified()
    }
}
