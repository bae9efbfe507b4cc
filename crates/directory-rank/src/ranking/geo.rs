//! Great-circle distance and coordinate parsing.
//!
//! Distances are reported in statute miles, the unit search radii use.

use super::domain::{Coordinates, Listing};

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("{axis} '{raw}' is not a number")]
    Unparseable { axis: &'static str, raw: String },
    #[error("{axis} {value} is not finite")]
    NonFinite { axis: &'static str, value: f64 },
    #[error("{axis} {value} is outside [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Haversine distance between two points.
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Parse a raw latitude/longitude pair, rejecting non-finite and out-of-range values.
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<Coordinates, CoordinateError> {
    let latitude = parse_axis("latitude", latitude, 90.0)?;
    let longitude = parse_axis("longitude", longitude, 180.0)?;
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// Check an already-numeric pair against the same bounds as [`parse_coordinates`].
pub fn check_coordinates(point: Coordinates) -> Result<Coordinates, CoordinateError> {
    check_axis("latitude", point.latitude, 90.0)?;
    check_axis("longitude", point.longitude, 180.0)?;
    Ok(point)
}

/// Coordinates of a listing, if both axes are present and valid.
pub fn listing_coordinates(listing: &Listing) -> Option<Coordinates> {
    let latitude = listing.latitude.as_deref()?;
    let longitude = listing.longitude.as_deref()?;
    parse_coordinates(latitude, longitude).ok()
}

fn parse_axis(axis: &'static str, raw: &str, bound: f64) -> Result<f64, CoordinateError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::Unparseable {
            axis,
            raw: raw.to_string(),
        })?;
    check_axis(axis, value, bound)
}

fn check_axis(axis: &'static str, value: f64, bound: f64) -> Result<f64, CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NonFinite { axis, value });
    }
    if !(-bound..=bound).contains(&value) {
        return Err(CoordinateError::OutOfRange {
            axis,
            value,
            min: -bound,
            max: bound,
        });
    }
    Ok(value)
}
