//! Synthetic country layouts for benchmarks and tests.

use std::f64::consts::PI;

use crate::country::Country;
use crate::error::CountryError;
use crate::location::Location;

const POLYGON_REGION: &str = "Polygon";

/// Builds a country whose `n` locations sit on the vertices of a regular
/// polygon inscribed in the unit circle, all in one region.
///
/// The first vertex (at angle `-pi`) is the only depot.
pub fn regular_n_gon(n: usize) -> Result<Country, CountryError> {
    if n == 0 {
        return Err(CountryError::Empty);
    }

    let step = 2.0 * PI / n as f64;
    let locations = (0..n)
        .map(|i| {
            let theta = -PI + step * i as f64;
            Location::new(&format!("Location {i}"), POLYGON_REGION, 1.0, theta, i == 0)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Country::new(locations)
}
