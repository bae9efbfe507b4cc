//! Input checks a caller runs before handing records to the engine.
//!
//! The scorers themselves never fail; these checks reject payloads that would
//! make a score meaningless (zero radius, unparseable coordinates, out-of-range
//! completeness).

use super::completeness::MAX_COMPLETENESS;
use super::domain::{Listing, SearchQuery};
use super::geo::{check_coordinates, parse_coordinates, CoordinateError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryValidationError {
    #[error("search radius must be a positive finite number of miles (found {0})")]
    InvalidRadius(f64),
    #[error("search origin is invalid: {0}")]
    InvalidOrigin(#[source] CoordinateError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("listing id must not be empty")]
    MissingId,
    #[error("listing {id} completeness score {found} exceeds {max}")]
    CompletenessOutOfRange { id: String, found: u8, max: u8 },
    #[error("listing {id} coordinates are invalid: {source}")]
    InvalidCoordinates {
        id: String,
        #[source]
        source: CoordinateError,
    },
}

impl SearchQuery {
    pub fn validate(&self) -> Result<(), QueryValidationError> {
        if let Some(radius) = self.radius_miles {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(QueryValidationError::InvalidRadius(radius));
            }
        }
        if let Some(origin) = self.origin {
            check_coordinates(origin).map_err(QueryValidationError::InvalidOrigin)?;
        }
        Ok(())
    }
}

impl Listing {
    /// Validate the persisted fields the engine relies on.
    ///
    /// Missing coordinates are fine; a half-present or unparseable pair is not.
    pub fn validate(&self) -> Result<(), ListingValidationError> {
        if self.id.0.trim().is_empty() {
            return Err(ListingValidationError::MissingId);
        }
        if self.completeness_score > MAX_COMPLETENESS {
            return Err(ListingValidationError::CompletenessOutOfRange {
                id: self.id.0.clone(),
                found: self.completeness_score,
                max: MAX_COMPLETENESS,
            });
        }
        match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (None, None) => Ok(()),
            (latitude, longitude) => parse_coordinates(
                latitude.unwrap_or_default(),
                longitude.unwrap_or_default(),
            )
            .map(|_| ())
            .map_err(|source| ListingValidationError::InvalidCoordinates {
                id: self.id.0.clone(),
                source,
            }),
        }
    }
}
