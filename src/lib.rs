//! depot-tour core
//!
//! Region-aware travel times between polar-coordinate locations, and
//! nearest-neighbor round trips from depots through every settlement.

pub mod cost;
pub mod country;
pub mod error;
pub mod location;
pub mod synthetic;

pub use cost::{CostModel, DEFAULT_SPEED};
pub use country::{Candidate, Country, Tour, Trip};
pub use error::{CountryError, ErrorClass, LocationError, TravelTimeError};
pub use location::{Location, NormalizationNotice, TextField};
