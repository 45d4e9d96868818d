use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Location;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub token: Uuid,
    pub origin: Location,
    pub destination: Location,
    pub distance_km: f64,
    pub eta_minutes: i64,
}

impl Route {
    pub fn new(origin: Location, destination: Location, distance_km: f64, eta_minutes: i64) -> Self {
        Self {
            token: Uuid::new_v4(),
            origin,
            destination,
            distance_km,
            eta_minutes,
        }
    }
}
