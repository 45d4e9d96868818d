use geo_types::{Geometry, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for Geometry<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Geometry::Point(Point::new(coordinates.lng, coordinates.lat))
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lat, coordinates.lng)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub token: Uuid,
    pub description: String,
    pub coordinates: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationSource {
    Coordinates(Coordinates),
    Address { query: String },
}

impl Location {
    pub fn new(coordinates: Coordinates, description: String) -> Self {
        Self {
            token: Uuid::new_v4(),
            description,
            coordinates,
        }
    }
}
