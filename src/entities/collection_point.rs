use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectionPoint {
    pub id: String,
    pub name: String,
    pub address: String,
    pub kind: String,
    pub coordinates: Coordinates,
}

// partner locations for the store-to-store tier
pub fn seed_collection_points() -> Vec<CollectionPoint> {
    let points = [
        ("nakasero", "Nakasero Market", "Kampala Central", 0.3136, 32.5811),
        (
            "owino",
            "Owino Market",
            "St. Balikuddembe Market, Kampala",
            0.3095,
            32.5752,
        ),
        ("kikuubo", "Kikuubo Market", "Kikuubo, Kampala", 0.3129, 32.5772),
        ("wandegeya", "Wandegeya Market", "Wandegeya, Kampala", 0.3333, 32.5705),
        ("nakawa", "Nakawa Market", "Nakawa, Kampala", 0.3288, 32.6199),
    ];

    points
        .into_iter()
        .map(|(id, name, address, lat, lng)| CollectionPoint {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            kind: "market".into(),
            coordinates: Coordinates { lat, lng },
        })
        .collect()
}
