use serde::{Deserialize, Serialize};

use crate::entities::{DeliveryRequest, DeliveryType};

pub const FREE_WEIGHT_KG: f64 = 5.0;
pub const EXCESS_WEIGHT_RATE: i64 = 500;
pub const DISTANCE_RATE_PER_KM: i64 = 300;
pub const STORE_FLAT_RATE: i64 = 7_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: i64,
    pub weight_surcharge: i64,
    pub distance_cost: i64,
    pub total: i64,
}

impl PriceBreakdown {
    pub fn flat(amount: i64) -> Self {
        Self {
            base_price: amount,
            weight_surcharge: 0,
            distance_cost: 0,
            total: amount,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(skip(self))]
    pub fn quote(&self, request: &DeliveryRequest) -> PriceBreakdown {
        // store-to-store is a fixed flat rate, package and route do not factor in
        if let DeliveryType::Store = request.delivery_type {
            return PriceBreakdown::flat(STORE_FLAT_RATE);
        }

        let base_price = round_half_up(
            request.delivery_type.base_price() as f64
                * request.package_type.multiplier()
                * request.vehicle_type.multiplier(),
        );

        let excess_kg = (request.weight_kg - FREE_WEIGHT_KG).max(0.0);
        let weight_surcharge = round_half_up(excess_kg * EXCESS_WEIGHT_RATE as f64);

        let distance_cost = round_half_up(request.distance_km * DISTANCE_RATE_PER_KM as f64);

        PriceBreakdown {
            base_price,
            weight_surcharge,
            distance_cost,
            total: base_price + weight_surcharge + distance_cost,
        }
    }
}

// UGX has no minor denomination; amounts here are never negative
fn round_half_up(amount: f64) -> i64 {
    (amount + 0.5).floor() as i64
}

#[cfg(test)]
fn request(
    delivery_type: DeliveryType,
    package_type: crate::entities::PackageType,
    weight_kg: f64,
    vehicle_type: crate::entities::VehicleType,
    distance_km: f64,
) -> DeliveryRequest {
    DeliveryRequest {
        delivery_type,
        package_type,
        weight_kg,
        dimensions: crate::entities::Dimensions::default(),
        vehicle_type,
        distance_km,
    }
}

#[test]
fn direct_medium_van_quote_test() {
    use crate::entities::{PackageType, VehicleType};

    let engine = PricingEngine::new();
    let quote = engine.quote(&request(
        DeliveryType::Direct,
        PackageType::Medium,
        8.0,
        VehicleType::Van,
        20.0,
    ));

    assert_eq!(quote.base_price, 22_500);
    assert_eq!(quote.weight_surcharge, 1_500);
    assert_eq!(quote.distance_cost, 6_000);
    assert_eq!(quote.total, 30_000);
}

#[test]
fn base_price_tier_test() {
    use crate::entities::{PackageType, VehicleType};

    let engine = PricingEngine::new();

    for (delivery_type, base_price) in [
        (DeliveryType::Direct, 10_000),
        (DeliveryType::Urgent, 15_000),
        (DeliveryType::Group, 5_000),
    ] {
        let quote = engine.quote(&request(
            delivery_type,
            PackageType::Document,
            0.0,
            VehicleType::Boda,
            0.0,
        ));

        assert_eq!(quote.base_price, base_price);
        assert_eq!(quote.total, base_price);
    }
}

#[test]
fn store_flat_rate_test() {
    use crate::entities::{PackageType, VehicleType};

    let engine = PricingEngine::new();
    let quote = engine.quote(&request(
        DeliveryType::Store,
        PackageType::Large,
        40.0,
        VehicleType::Truck,
        120.0,
    ));

    assert_eq!(quote.base_price, STORE_FLAT_RATE);
    assert_eq!(quote.weight_surcharge, 0);
    assert_eq!(quote.distance_cost, 0);
    assert_eq!(quote.total, STORE_FLAT_RATE);
}

#[test]
fn free_weight_threshold_test() {
    use crate::entities::{PackageType, VehicleType};

    let engine = PricingEngine::new();

    for weight_kg in [0.0, 2.5, 5.0] {
        let quote = engine.quote(&request(
            DeliveryType::Direct,
            PackageType::Document,
            weight_kg,
            VehicleType::Boda,
            0.0,
        ));

        assert_eq!(quote.weight_surcharge, 0);
    }

    let quote = engine.quote(&request(
        DeliveryType::Direct,
        PackageType::Document,
        5.5,
        VehicleType::Boda,
        0.0,
    ));

    assert_eq!(quote.weight_surcharge, 250);
}

#[test]
fn breakdown_totals_test() {
    use crate::entities::{PackageType, VehicleType};

    let engine = PricingEngine::new();
    let quote = engine.quote(&request(
        DeliveryType::Urgent,
        PackageType::Fragile,
        7.3,
        VehicleType::Pickup,
        12.7,
    ));

    assert_eq!(
        quote.total,
        quote.base_price + quote.weight_surcharge + quote.distance_cost
    );
    assert!(quote.base_price >= 0 && quote.weight_surcharge >= 0 && quote.distance_cost >= 0);
}

#[test]
fn quote_is_pure_test() {
    use crate::entities::{PackageType, VehicleType};

    let engine = PricingEngine::new();
    let input = request(
        DeliveryType::Group,
        PackageType::Small,
        9.0,
        VehicleType::Pickup,
        33.0,
    );

    assert_eq!(engine.quote(&input), engine.quote(&input));
}
