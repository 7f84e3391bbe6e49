//! Region-aware travel-time cost model.
//!
//! Travel time grows linearly with distance. Crossing into another region adds
//! a 10% penalty per location in the destination region; travel inside a
//! region is never penalized.

use serde::{Deserialize, Serialize};

use crate::error::TravelTimeError;

/// Default travel speed in distance units per second.
pub const DEFAULT_SPEED: f64 = 4.75;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Penalty divisor applied per destination-region location on a crossing.
const REGION_PENALTY_DIVISOR: f64 = 10.0;

/// Calculate travel time in hours between two points.
///
/// `crosses_region` is a numeric boolean and must be exactly `0.0` or `1.0`.
/// `dest_region_population` counts the locations in the destination's region,
/// including the destination itself; values below 1 are treated as 1.
pub fn travel_time(
    distance: f64,
    crosses_region: f64,
    dest_region_population: i64,
    speed: f64,
) -> Result<f64, TravelTimeError> {
    if distance.is_nan() || distance < 0.0 {
        return Err(TravelTimeError::NegativeDistance(distance));
    }
    if crosses_region != 0.0 && crosses_region != 1.0 {
        return Err(TravelTimeError::InvalidRegionFlag(crosses_region));
    }
    validate_speed(speed)?;

    let population = dest_region_population.max(1) as f64;
    let penalty = 1.0 + crosses_region * population / REGION_PENALTY_DIVISOR;

    Ok(distance / speed / SECONDS_PER_HOUR * penalty)
}

fn validate_speed(speed: f64) -> Result<(), TravelTimeError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(TravelTimeError::InvalidSpeed(speed))
    }
}

/// Travel-time settings used by a [`crate::country::Country`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CostModelRecord")]
pub struct CostModel {
    /// Travel speed in distance units per second.
    speed: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }
}

impl CostModel {
    pub fn new(speed: f64) -> Result<Self, TravelTimeError> {
        validate_speed(speed)?;
        Ok(Self { speed })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Travel time in hours for a leg of `distance` into a region holding
    /// `dest_region_population` locations.
    pub fn travel_time(
        &self,
        distance: f64,
        crosses_region: bool,
        dest_region_population: usize,
    ) -> Result<f64, TravelTimeError> {
        let flag = if crosses_region { 1.0 } else { 0.0 };
        let population = i64::try_from(dest_region_population).unwrap_or(i64::MAX);
        travel_time(distance, flag, population, self.speed)
    }
}

#[derive(Debug, Deserialize)]
struct CostModelRecord {
    speed: f64,
}

impl TryFrom<CostModelRecord> for CostModel {
    type Error = TravelTimeError;

    fn try_from(record: CostModelRecord) -> Result<Self, Self::Error> {
        CostModel::new(record.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_HOUR_DISTANCE: f64 = 3600.0 * DEFAULT_SPEED;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_one_hour_at_default_speed() {
        let time = travel_time(ONE_HOUR_DISTANCE, 0.0, 3, DEFAULT_SPEED).unwrap();
        assert_eq!(time, 1.0);
    }

    #[test]
    fn test_half_speed_doubles_time() {
        let time = travel_time(ONE_HOUR_DISTANCE, 0.0, 0, DEFAULT_SPEED / 2.0).unwrap();
        assert_close(time, 2.0);
    }

    #[test]
    fn test_crossing_penalty_scales_with_population() {
        // 20 locations in the destination region: 1 + 20 / 10 = 3x
        let time = travel_time(ONE_HOUR_DISTANCE, 1.0, 20, DEFAULT_SPEED).unwrap();
        assert_close(time, 3.0);

        let time = travel_time(1000.0, 1.0, 100, DEFAULT_SPEED).unwrap();
        assert_close(time, 1000.0 / (3600.0 * DEFAULT_SPEED) * 11.0);
    }

    #[test]
    fn test_population_clamped_to_one() {
        let clamped = travel_time(1000.0, 1.0, 0, DEFAULT_SPEED).unwrap();
        assert_close(clamped, 1000.0 / (3600.0 * DEFAULT_SPEED) * 1.1);

        let negative = travel_time(1000.0, 1.0, -5, DEFAULT_SPEED).unwrap();
        assert_eq!(clamped, negative);
    }

    #[test]
    fn test_no_penalty_within_region() {
        for population in [-3, 0, 1, 7, 1_000] {
            let time = travel_time(5000.0, 0.0, population, DEFAULT_SPEED).unwrap();
            assert_eq!(time, 5000.0 / DEFAULT_SPEED / 3600.0);
        }
    }

    #[test]
    fn test_zero_distance_is_zero_time() {
        assert_eq!(travel_time(0.0, 0.0, 3, DEFAULT_SPEED).unwrap(), 0.0);
        assert_eq!(travel_time(0.0, 1.0, 3, DEFAULT_SPEED).unwrap(), 0.0);
    }

    #[test]
    fn test_monotonic_in_distance_and_speed() {
        let near = travel_time(100.0, 1.0, 4, DEFAULT_SPEED).unwrap();
        let far = travel_time(200.0, 1.0, 4, DEFAULT_SPEED).unwrap();
        assert!(far > near);

        let slow = travel_time(100.0, 1.0, 4, 2.0).unwrap();
        let fast = travel_time(100.0, 1.0, 4, 8.0).unwrap();
        assert!(fast < slow);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            travel_time(-100.0, 0.0, 3, DEFAULT_SPEED),
            Err(TravelTimeError::NegativeDistance(-100.0))
        );
        assert_eq!(
            travel_time(1000.0, -1.0, 3, DEFAULT_SPEED),
            Err(TravelTimeError::InvalidRegionFlag(-1.0))
        );
        assert_eq!(
            travel_time(1000.0, 1.5, 3, DEFAULT_SPEED),
            Err(TravelTimeError::InvalidRegionFlag(1.5))
        );
        assert_eq!(
            travel_time(1000.0, 0.0, 3, 0.0),
            Err(TravelTimeError::InvalidSpeed(0.0))
        );
        assert!(travel_time(f64::NAN, 0.0, 3, DEFAULT_SPEED).is_err());
    }

    #[test]
    fn test_cost_model_default_speed() {
        let model = CostModel::default();
        assert_eq!(model.speed(), DEFAULT_SPEED);
        assert_eq!(model.travel_time(ONE_HOUR_DISTANCE, false, 9).unwrap(), 1.0);
        assert_close(model.travel_time(ONE_HOUR_DISTANCE, true, 5).unwrap(), 1.5);
    }

    #[test]
    fn test_cost_model_rejects_bad_speed() {
        assert!(CostModel::new(-1.0).is_err());
        assert!(CostModel::new(f64::INFINITY).is_err());
        assert_eq!(CostModel::new(9.5).unwrap().speed(), 9.5);
    }
}
