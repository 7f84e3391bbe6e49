//! Country aggregate and nearest-neighbor tour construction.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::CountryError;
use crate::location::Location;

/// An immutable collection of distinct locations.
///
/// Locations keep their construction order. Settlement and depot views are
/// recomputed on every call; membership and region populations are indexed
/// once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CountryRecord")]
pub struct Country {
    locations: Vec<Location>,
    cost_model: CostModel,
    #[serde(skip)]
    positions: HashMap<Location, usize>,
    #[serde(skip)]
    region_population: HashMap<String, usize>,
}

/// A candidate destination for [`Country::fastest_trip_from`].
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'c> {
    Location(&'c Location),
    /// Index into [`Country::settlements`].
    Index(usize),
}

impl<'c> From<&'c Location> for Candidate<'c> {
    fn from(location: &'c Location) -> Self {
        Candidate::Location(location)
    }
}

impl From<usize> for Candidate<'_> {
    fn from(index: usize) -> Self {
        Candidate::Index(index)
    }
}

/// A single leg to the closest candidate and its travel time in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trip<'a> {
    pub location: &'a Location,
    pub time: f64,
}

/// A round trip that starts and ends at the same depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour<'a> {
    pub stops: Vec<&'a Location>,
    /// Total travel time in hours, including the return leg.
    pub total_time: f64,
}

impl Tour<'_> {
    /// The depot the tour starts and ends at.
    pub fn depot(&self) -> Option<&Location> {
        self.stops.first().copied()
    }
}

impl fmt::Display for Tour<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NNA tour is:")?;
        for stop in &self.stops {
            writeln!(f, "\t{stop}")?;
        }
        write!(f, "Which will take {:.2} h to complete.", self.total_time)
    }
}

impl Country {
    /// Creates a country using the default cost model.
    pub fn new(locations: Vec<Location>) -> Result<Self, CountryError> {
        Self::with_cost_model(locations, CostModel::default())
    }

    pub fn with_cost_model(
        locations: Vec<Location>,
        cost_model: CostModel,
    ) -> Result<Self, CountryError> {
        let mut positions = HashMap::with_capacity(locations.len());
        let mut region_population: HashMap<String, usize> = HashMap::new();
        for (position, location) in locations.iter().enumerate() {
            if positions.insert(location.clone(), position).is_some() {
                return Err(CountryError::DuplicateLocation {
                    name: location.name().to_string(),
                    region: location.region().to_string(),
                });
            }
            *region_population
                .entry(location.region().to_string())
                .or_default() += 1;
        }

        Ok(Self {
            locations,
            cost_model,
            positions,
            region_population,
        })
    }

    /// All locations in construction order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn settlements(&self) -> Vec<&Location> {
        self.locations.iter().filter(|loc| loc.is_settlement()).collect()
    }

    pub fn n_settlements(&self) -> usize {
        self.locations.iter().filter(|loc| loc.is_settlement()).count()
    }

    pub fn depots(&self) -> Vec<&Location> {
        self.locations.iter().filter(|loc| loc.is_depot()).collect()
    }

    pub fn n_depots(&self) -> usize {
        self.locations.iter().filter(|loc| loc.is_depot()).count()
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.find(location).is_some()
    }

    /// Travel time in hours from `start` to `end`.
    ///
    /// Crossing into another region is penalized by the number of locations
    /// (depots included) in the destination region.
    pub fn travel_time(&self, start: &Location, end: &Location) -> Result<f64, CountryError> {
        let start = self.member(start, "travel_time")?;
        let end = self.member(end, "travel_time")?;
        self.leg_time(start, end)
    }

    /// Finds the candidate with the shortest travel time from `current`.
    ///
    /// Duplicate candidates and `current` itself are ignored. Candidates whose
    /// travel time cannot be computed are skipped. Ties are broken by name,
    /// then region. Returns `Ok(None)` when no candidate is left.
    pub fn fastest_trip_from<'c, I>(
        &self,
        current: &Location,
        candidates: I,
    ) -> Result<Option<Trip<'_>>, CountryError>
    where
        I: IntoIterator<Item = Candidate<'c>>,
    {
        let mut settlements: Option<Vec<&Location>> = None;
        let mut seen: HashSet<&Location> = HashSet::new();
        let mut destinations: Vec<&Location> = Vec::new();

        for candidate in candidates {
            let location = match candidate {
                Candidate::Location(location) => location,
                Candidate::Index(index) => {
                    let settlements = settlements.get_or_insert_with(|| self.settlements());
                    settlements
                        .get(index)
                        .copied()
                        .ok_or(CountryError::IndexOutOfBounds {
                            index,
                            len: settlements.len(),
                        })?
                }
            };
            if location != current && seen.insert(location) {
                destinations.push(location);
            }
        }

        let start = self.member(current, "fastest_trip_from");
        let mut trips = Vec::with_capacity(destinations.len());
        for destination in destinations {
            let leg = start.clone().and_then(|start| {
                let end = self.member(destination, "fastest_trip_from")?;
                Ok((end, self.leg_time(start, end)?))
            });
            match leg {
                Ok((location, time)) => trips.push(Trip { location, time }),
                Err(err) => {
                    tracing::debug!(
                        from = %current,
                        to = %destination,
                        error = %err,
                        "skipping candidate without a travel time"
                    );
                }
            }
        }

        Ok(trips.into_iter().min_by(compare_trips))
    }

    /// [`Country::fastest_trip_from`] over every settlement.
    pub fn fastest_trip_from_settlements(
        &self,
        current: &Location,
    ) -> Result<Option<Trip<'_>>, CountryError> {
        self.fastest_trip_from(current, self.settlements().into_iter().map(Candidate::from))
    }

    /// Builds a nearest-neighbor tour from `starting_depot` through every
    /// settlement and back.
    ///
    /// The tour always moves to the fastest unvisited settlement, with no
    /// backtracking. A country without settlements yields `[depot, depot]`
    /// with a total time of zero.
    pub fn nn_tour(&self, starting_depot: &Location) -> Result<Tour<'_>, CountryError> {
        let depot = self.member(starting_depot, "nn_tour")?;
        if !depot.is_depot() {
            return Err(CountryError::NotADepot(depot.to_string()));
        }

        let mut unvisited = self.settlements();
        if unvisited.is_empty() {
            return Ok(Tour {
                stops: vec![depot, depot],
                total_time: 0.0,
            });
        }

        let mut stops = Vec::with_capacity(unvisited.len() + 2);
        stops.push(depot);
        let mut current = depot;
        let mut total_time = 0.0;

        while !unvisited.is_empty() {
            let trip = self
                .fastest_trip_from(current, unvisited.iter().copied().map(Candidate::from))?
                .ok_or_else(|| CountryError::Unreachable(current.to_string()))?;
            tracing::trace!(from = %current, to = %trip.location, time = trip.time, "nn step");

            unvisited.retain(|loc| *loc != trip.location);
            stops.push(trip.location);
            total_time += trip.time;
            current = trip.location;
        }

        total_time += self.leg_time(current, depot)?;
        stops.push(depot);

        Ok(Tour { stops, total_time })
    }

    /// Finds the depot whose nearest-neighbor tour is fastest, with that tour.
    ///
    /// Depots are tried in `(name, region)` order and a later depot only wins
    /// with a strictly shorter time.
    pub fn best_depot_tour(&self) -> Result<(&Location, Tour<'_>), CountryError> {
        let mut depots = self.depots();
        depots.sort_by(|a, b| a.key().cmp(&b.key()));

        let mut best: Option<(&Location, Tour<'_>)> = None;
        for depot in depots {
            let tour = self.nn_tour(depot)?;
            tracing::debug!(depot = %depot, total_time = tour.total_time, "evaluated depot");
            if best
                .as_ref()
                .is_none_or(|(_, best_tour)| tour.total_time < best_tour.total_time)
            {
                best = Some((depot, tour));
            }
        }

        best.ok_or(CountryError::NoDepots)
    }

    /// Returns the depot with the fastest nearest-neighbor tour.
    ///
    /// When `display` is set, the winning depot and its tour are logged at
    /// `info` level.
    pub fn best_depot_site(&self, display: bool) -> Result<&Location, CountryError> {
        let (depot, tour) = self.best_depot_tour()?;
        if display {
            tracing::info!("Best depot: {depot}\n{tour}");
        }
        Ok(depot)
    }

    fn find(&self, location: &Location) -> Option<&Location> {
        self.positions
            .get(location)
            .map(|&position| &self.locations[position])
    }

    /// Travel time between two members, without re-checking membership.
    fn leg_time(&self, start: &Location, end: &Location) -> Result<f64, CountryError> {
        let distance = start.distance_to(end);
        let crosses_region = start.region() != end.region();
        let dest_region_population = self
            .region_population
            .get(end.region())
            .copied()
            .unwrap_or_default();

        Ok(self
            .cost_model
            .travel_time(distance, crosses_region, dest_region_population)?)
    }

    fn member(
        &self,
        location: &Location,
        operation: &'static str,
    ) -> Result<&Location, CountryError> {
        self.find(location)
            .ok_or_else(|| CountryError::NotInCountry {
                operation,
                location: location.to_string(),
            })
    }
}

/// Orders trips by time, then name, then region.
fn compare_trips(a: &Trip<'_>, b: &Trip<'_>) -> Ordering {
    a.time
        .total_cmp(&b.time)
        .then_with(|| a.location.key().cmp(&b.location.key()))
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    locations: Vec<Location>,
    #[serde(default)]
    cost_model: CostModel,
}

impl TryFrom<CountryRecord> for Country {
    type Error = CountryError;

    fn try_from(record: CountryRecord) -> Result<Self, Self::Error> {
        Country::with_cost_model(record.locations, record.cost_model)
    }
}
