use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::entities::{CollectionPoint, Coordinates};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct NearbyParams {
    lat: f64,
    lng: f64,
    radius: f64,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<CollectionPoint>>, Error> {
    let points = api.list_collection_points(user).await?;

    Ok(points.into())
}

pub async fn nearby(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<CollectionPoint>>, Error> {
    let points = api
        .find_nearby_collection_points(
            user,
            Coordinates {
                lat: params.lat,
                lng: params.lng,
            },
            params.radius,
        )
        .await?;

    Ok(points.into())
}
