use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    Direct,
    Urgent,
    Store,
    Group,
}

impl DeliveryType {
    // UGX, whole units
    pub fn base_price(&self) -> i64 {
        match self {
            Self::Direct => 10_000,
            Self::Urgent => 15_000,
            Self::Store => 7_000,
            Self::Group => 5_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    Document,
    Small,
    Medium,
    Large,
    Fragile,
}

impl PackageType {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Document => 1.0,
            Self::Small => 1.2,
            Self::Medium => 1.5,
            Self::Large => 2.0,
            Self::Fragile => 1.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Boda,
    Pickup,
    Van,
    Truck,
}

impl VehicleType {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Boda => 1.0,
            Self::Pickup => 1.3,
            Self::Van => 1.5,
            Self::Truck => 2.0,
        }
    }
}

// centimetres, informational only
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub delivery_type: DeliveryType,
    pub package_type: PackageType,
    pub weight_kg: f64,
    pub dimensions: Dimensions,
    pub vehicle_type: VehicleType,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub delivery_type: DeliveryType,
    pub package_type: PackageType,
    pub weight_kg: f64,
    pub dimensions: Dimensions,
    pub vehicle_type: VehicleType,
    pub distance_km: f64,
}

impl DeliveryRequest {
    pub fn from_quote_request(request: QuoteRequest, distance_km: f64) -> Self {
        Self {
            delivery_type: request.delivery_type,
            package_type: request.package_type,
            weight_kg: request.weight_kg,
            dimensions: request.dimensions,
            vehicle_type: request.vehicle_type,
            distance_km,
        }
    }
}
