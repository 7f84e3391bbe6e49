//! Named points of interest on a polar plane.
//!
//! A [`Location`] is identified by its name and region only; coordinates and
//! the depot flag do not take part in equality or hashing.

use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// A named point in polar coordinates, classified as a depot or settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord")]
pub struct Location {
    name: String,
    region: String,
    r: f64,
    theta: f64,
    depot: bool,
}

/// Which text field a [`NormalizationNotice`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Region,
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextField::Name => write!(f, "name"),
            TextField::Region => write!(f, "region"),
        }
    }
}

/// Reported when a name or region had to be re-capitalized on construction.
///
/// This is informational only; construction still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationNotice {
    pub field: TextField,
    pub original: String,
    pub normalized: String,
}

impl fmt::Display for NormalizationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} was capitalized from '{}' to '{}'",
            self.field, self.original, self.normalized
        )
    }
}

impl Location {
    /// Creates a validated location, logging a warning for every name or
    /// region that had to be normalized.
    pub fn new(
        name: &str,
        region: &str,
        r: f64,
        theta: f64,
        depot: bool,
    ) -> Result<Self, LocationError> {
        let (location, notices) = Self::with_notices(name, region, r, theta, depot)?;
        for notice in &notices {
            tracing::warn!(
                field = %notice.field,
                original = %notice.original,
                normalized = %notice.normalized,
                "{notice}; each word should start with a capital and continue in lowercase"
            );
        }
        Ok(location)
    }

    /// Creates a validated location and returns the normalization notices
    /// instead of logging them.
    pub fn with_notices(
        name: &str,
        region: &str,
        r: f64,
        theta: f64,
        depot: bool,
    ) -> Result<(Self, Vec<NormalizationNotice>), LocationError> {
        validate_radius(r)?;
        validate_theta(theta)?;

        let mut notices = Vec::new();
        let name = normalize(TextField::Name, name, &mut notices);
        if name.is_empty() {
            return Err(LocationError::EmptyName);
        }
        let region = normalize(TextField::Region, region, &mut notices);
        if region.is_empty() {
            return Err(LocationError::EmptyRegion);
        }

        let location = Self {
            name,
            region,
            r,
            theta,
            depot,
        };
        Ok((location, notices))
    }

    /// Parses a location from textual fields.
    ///
    /// Coordinates must parse as floating-point numbers and the depot flag
    /// must be `true` or `false` (any case).
    pub fn parse(
        name: &str,
        region: &str,
        r: &str,
        theta: &str,
        depot: &str,
    ) -> Result<Self, LocationError> {
        let depot = parse_depot_flag(depot)?;
        let r = parse_coordinate("r", r)?;
        let theta = parse_coordinate("theta", theta)?;
        Self::new(name, region, r, theta, depot)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Radial distance from the origin.
    pub fn r(&self) -> f64 {
        self.r
    }

    /// Polar angle in radians, within `[-pi, pi]`.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn is_depot(&self) -> bool {
        self.depot
    }

    pub fn is_settlement(&self) -> bool {
        !self.depot
    }

    pub fn set_depot(&mut self, depot: bool) {
        self.depot = depot;
    }

    /// Identity key used for equality, hashing and deterministic ordering.
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.region)
    }

    /// Straight-line distance to `other`, via the law of cosines.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let squared = self.r.powi(2) + other.r.powi(2)
            - 2.0 * self.r * other.r * (self.theta - other.theta).cos();
        // Rounding can push nearly coincident points slightly below zero.
        squared.max(0.0).sqrt()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.region.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.depot { "depot" } else { "settlement" };
        write!(
            f,
            "{} [{}] in {} @ ({}m, {}pi)",
            self.name,
            kind,
            self.region,
            Rounded(self.r),
            Rounded(self.theta / PI)
        )
    }
}

/// Formats a number rounded to two decimals, dropping trailing zeros but
/// keeping at least one fractional digit (`2.0`, `0.5`, `49877.16`).
struct Rounded(f64);

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        if rounded.fract() == 0.0 {
            write!(f, "{rounded:.1}")
        } else {
            write!(f, "{rounded}")
        }
    }
}

/// Unvalidated wire form of a [`Location`].
#[derive(Debug, Deserialize)]
struct LocationRecord {
    name: String,
    region: String,
    r: f64,
    theta: f64,
    depot: bool,
}

impl TryFrom<LocationRecord> for Location {
    type Error = LocationError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Location::new(
            &record.name,
            &record.region,
            record.r,
            record.theta,
            record.depot,
        )
    }
}

fn validate_radius(r: f64) -> Result<(), LocationError> {
    if !r.is_finite() {
        return Err(LocationError::NonFiniteCoordinate {
            field: "r",
            value: r,
        });
    }
    if r < 0.0 {
        return Err(LocationError::NegativeRadius(r));
    }
    Ok(())
}

fn validate_theta(theta: f64) -> Result<(), LocationError> {
    if !theta.is_finite() {
        return Err(LocationError::NonFiniteCoordinate {
            field: "theta",
            value: theta,
        });
    }
    if !(-PI..=PI).contains(&theta) {
        return Err(LocationError::AngleOutOfRange(theta));
    }
    Ok(())
}

fn parse_coordinate(field: &'static str, input: &str) -> Result<f64, LocationError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| LocationError::InvalidCoordinate {
            field,
            input: input.to_string(),
        })
}

fn parse_depot_flag(input: &str) -> Result<bool, LocationError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LocationError::InvalidDepotFlag(input.to_string())),
    }
}

fn normalize(field: TextField, text: &str, notices: &mut Vec<NormalizationNotice>) -> String {
    let normalized = title_case(text);
    if normalized != text {
        notices.push(NormalizationNotice {
            field,
            original: text.to_string(),
            normalized: normalized.clone(),
        });
    }
    normalized
}

/// Capitalizes each whitespace-separated word and joins them with single spaces.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
