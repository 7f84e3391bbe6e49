//! Named towns grouped into holds.
//!
//! Coordinates are polar (metres, radians) around the map centre.

use depot_tour::{Country, Location};

/// A fixture location before validation.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub name: &'static str,
    pub region: &'static str,
    pub r: f64,
    pub theta: f64,
    pub depot: bool,
}

impl Site {
    pub const fn new(
        name: &'static str,
        region: &'static str,
        r: f64,
        theta: f64,
        depot: bool,
    ) -> Self {
        Self {
            name,
            region,
            r,
            theta,
            depot,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.name, self.region, self.r, self.theta, self.depot)
            .expect("fixture sites are valid")
    }
}

pub const RIVERWOOD: Site = Site::new(
    "Riverwood",
    "Whiterun Hold",
    49_877.156_544_855_28,
    -1.115_308_142_184_386_5,
    false,
);
pub const HEARTWOOD_MILL: Site = Site::new(
    "Heartwood Mill",
    "The Rift",
    164_031.259_246_522_88,
    -0.623_668_222_778_795_9,
    true,
);

pub const HOLDS: &[Site] = &[
    RIVERWOOD,
    HEARTWOOD_MILL,
    Site::new("Whiterun", "Whiterun Hold", 12_500.0, 0.35, false),
    Site::new("Rorikstead", "Whiterun Hold", 88_200.0, 2.2, false),
    Site::new("Riften", "The Rift", 171_900.0, -0.42, false),
    Site::new("Ivarstead", "The Rift", 97_300.0, -0.81, false),
    Site::new("Shor's Stone", "The Rift", 182_400.0, -0.18, false),
    Site::new("Dawnstar", "The Pale", 140_600.0, 1.62, false),
    Site::new("Nightgate Inn", "The Pale", 120_300.0, 1.05, true),
    Site::new("Dragon Bridge", "Haafingar", 150_800.0, 2.71, false),
    Site::new("Solitude Sawmill", "Haafingar", 171_200.0, 2.45, true),
];

pub fn locations(sites: &[Site]) -> Vec<Location> {
    sites.iter().map(Site::location).collect()
}

pub fn holds_country() -> Country {
    Country::new(locations(HOLDS)).expect("fixture holds are distinct")
}
