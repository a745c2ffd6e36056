use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// Bodies tracked by a chart, in the traditional graha order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    /// Ascending lunar node.
    Rahu,
    /// Descending lunar node, always opposite Rahu.
    Ketu,
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
    ];

    /// Lowercase identifier used in serialized output.
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Rahu => "rahu",
            Body::Ketu => "ketu",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Body::Rahu | Body::Ketu)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.id() == lower)
            .or(match lower.as_str() {
                "north_node" => Some(Body::Rahu),
                "south_node" => Some(Body::Ketu),
                _ => None,
            })
            .ok_or_else(|| ChartError::invalid("body", format!("unknown body '{s}'")))
    }
}

/// Mean or true lunar node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    #[default]
    Mean,
    True,
}

/// Geocentric ecliptic position of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Distance (AU; Earth radii for the Moon; 0 for the nodes)
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the body is retrograde
    pub retrograde: bool,
}

/// Positions of every tracked body at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisPositions {
    pub bodies: BTreeMap<Body, PlanetPosition>,
}

impl EphemerisPositions {
    pub fn get(&self, body: Body) -> Option<&PlanetPosition> {
        self.bodies.get(&body)
    }

    /// Position of `body`, or `EphemerisUnavailable` if the backend omitted it.
    pub fn require(&self, body: Body) -> Result<&PlanetPosition, ChartError> {
        self.get(body)
            .ok_or_else(|| ChartError::unavailable(format!("no position for {body}")))
    }
}
