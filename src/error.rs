//! Error types for the cost model, locations and countries.

use thiserror::Error;

/// Errors from [`crate::cost::travel_time`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TravelTimeError {
    #[error("distance must be a non-negative number, got {0}")]
    NegativeDistance(f64),

    /// The region flag is a numeric boolean and only `0.0` or `1.0` are valid.
    #[error("region crossing flag must be 0 or 1, got {0}")]
    InvalidRegionFlag(f64),

    #[error("speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
}

/// Broad category of a [`LocationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input had the wrong shape (not a boolean, not usable text).
    Type,
    /// The input had the right shape but an out-of-range value.
    Value,
}

/// Errors raised while constructing a [`crate::location::Location`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("depot flag must be a boolean value, got {0:?}")]
    InvalidDepotFlag(String),

    #[error("name must contain at least one word")]
    EmptyName,

    #[error("region must contain at least one word")]
    EmptyRegion,

    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("theta must be between -pi and pi, got {0}")]
    AngleOutOfRange(f64),

    #[error("{field} must be a finite number, got {value}")]
    NonFiniteCoordinate { field: &'static str, value: f64 },

    #[error("{field} must be convertible to a number, got {input:?}")]
    InvalidCoordinate { field: &'static str, input: String },
}

impl LocationError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LocationError::InvalidDepotFlag(_)
            | LocationError::EmptyName
            | LocationError::EmptyRegion => ErrorClass::Type,
            LocationError::NegativeRadius(_)
            | LocationError::AngleOutOfRange(_)
            | LocationError::NonFiniteCoordinate { .. }
            | LocationError::InvalidCoordinate { .. } => ErrorClass::Value,
        }
    }
}

/// Errors raised by [`crate::country::Country`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CountryError {
    #[error("duplicate location {name} in {region}")]
    DuplicateLocation { name: String, region: String },

    /// A location passed to `operation` is not a member of the country.
    #[error("{operation}: {location} is not in the country")]
    NotInCountry {
        operation: &'static str,
        location: String,
    },

    #[error("settlement index {index} out of bounds for {len} settlements")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("{0} is not a depot in the country")]
    NotADepot(String),

    #[error("no depots in the country")]
    NoDepots,

    #[error("no reachable settlement from {0}")]
    Unreachable(String),

    #[error("a country needs at least one location")]
    Empty,

    #[error(transparent)]
    TravelTime(#[from] TravelTimeError),

    #[error(transparent)]
    Location(#[from] LocationError),
}
