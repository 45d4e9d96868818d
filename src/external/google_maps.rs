use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub eta_minutes: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
    rows: Option<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<MatrixValue>,
    duration: Option<MatrixValue>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixValue {
    value: i64,
}

#[tracing::instrument]
pub async fn geocode(query: String) -> Result<Place, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/geocode/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("address", query)])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<Vec<Place>> = res.json().await?;

    if data.status != "OK" {
        return Err(upstream_error());
    }

    let mut results = data.results.ok_or_else(|| upstream_error())?;

    if results.is_empty() {
        return Err(invalid_input_error());
    }

    Ok(results.remove(0))
}

#[tracing::instrument]
pub async fn estimate_route(
    origin: Coordinates,
    destination: Coordinates,
) -> Result<RouteEstimate, Error> {
    let origin: String = origin.into();
    let destination: String = destination.into();

    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/distancematrix/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("origins", origin)])
        .query(&[("destinations", destination)])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<Vec<MatrixRow>> = res.json().await?;

    if data.status != "OK" {
        return Err(upstream_error());
    }

    let rows = data.rows.ok_or_else(|| upstream_error())?;
    let element = rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| upstream_error())?;

    if element.status != "OK" {
        return Err(invalid_input_error());
    }

    let distance = element.distance.as_ref().ok_or_else(|| upstream_error())?;
    let duration = element.duration.as_ref().ok_or_else(|| upstream_error())?;

    Ok(RouteEstimate {
        distance_km: distance.value as f64 / 1000.0,
        eta_minutes: (duration.value + 59) / 60,
    })
}
