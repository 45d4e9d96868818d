use super::Engine;

use async_trait::async_trait;
use geo_types::Geometry;
use geozero::wkb;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::CollectionPointAPI,
    auth::User,
    entities::{CollectionPoint, Coordinates},
    error::Error,
};

#[async_trait]
impl CollectionPointAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_collection_points(&self, user: User) -> Result<Vec<CollectionPoint>, Error> {
        let mut conn = self.pool.acquire().await?;

        let results = conn
            .fetch_all(sqlx::query("SELECT data FROM collection_points ORDER BY id ASC"))
            .await?;

        let mut points = vec![];

        for result in results.iter() {
            let Json(point): Json<CollectionPoint> = result.try_get("data")?;
            points.push(point);
        }

        Ok(points)
    }

    #[tracing::instrument(skip(self))]
    async fn find_nearby_collection_points(
        &self,
        user: User,
        coordinates: Coordinates,
        radius: f64,
    ) -> Result<Vec<CollectionPoint>, Error> {
        let location: Geometry<f64> = coordinates.into();

        let query = "
            SELECT
                data
            FROM
                collection_points
            WHERE
                ST_DWithin(location, ST_SetSRID($1, 4326), $2)
            ORDER BY
                ST_Distance(location, ST_SetSRID($1, 4326)) ASC
        ";

        let mut conn = self.pool.acquire().await?;

        let results = conn
            .fetch_all(
                sqlx::query(query)
                    .bind(wkb::Encode(location))
                    .bind(radius),
            )
            .await?;

        let mut points = vec![];

        for result in results.iter() {
            let Json(point): Json<CollectionPoint> = result.try_get("data")?;
            points.push(point);
        }

        Ok(points)
    }
}
