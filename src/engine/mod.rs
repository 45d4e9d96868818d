mod booking_api;
mod collection_point_api;
mod group_api;
mod helpers;
mod location_api;
mod quote_api;
mod route_api;

use geo_types::Geometry;
use geozero::wkb;
use oso::Oso;
use sqlx::{types::Json, Executor, Pool, Postgres};

use crate::{
    api::API,
    auth::authorizor,
    entities::seed_collection_points,
    error::{unauthorized_error, Error},
    matching::GroupMatcher,
    pricing::PricingEngine,
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    authorizor: Oso,
    pricing: PricingEngine,
    matcher: GroupMatcher,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(
        pool: Pool<Database>,
        pricing: PricingEngine,
        matcher: GroupMatcher,
    ) -> Result<Self, Error> {
        // location service (KV store)
        pool.execute("DROP TABLE IF EXISTS locations CASCADE")
            .await?;
        pool.execute("CREATE TABLE locations (token UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        // route service (KV store)
        pool.execute("DROP TABLE IF EXISTS routes CASCADE").await?;
        pool.execute("CREATE TABLE routes (token UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        // quote service (KV store)
        pool.execute("DROP TABLE IF EXISTS quotes CASCADE").await?;
        pool.execute("CREATE TABLE quotes (token UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        // booking service
        pool.execute("DROP TABLE IF EXISTS bookings CASCADE").await?;
        pool.execute("CREATE TABLE bookings (id UUID PRIMARY KEY, status VARCHAR NOT NULL, data JSONB NOT NULL)")
            .await?;

        // group delivery pools; created_at keeps the match scan order stable
        pool.execute("DROP TABLE IF EXISTS group_deliveries CASCADE")
            .await?;
        pool.execute("CREATE TABLE group_deliveries (id UUID PRIMARY KEY, status VARCHAR NOT NULL, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)")
            .await?;

        // partner collection points for the store tier
        pool.execute("DROP TABLE IF EXISTS collection_points CASCADE")
            .await?;
        pool.execute("CREATE TABLE collection_points (id VARCHAR PRIMARY KEY, location geometry(Point), data JSONB NOT NULL)")
            .await?;

        for point in seed_collection_points() {
            let location: Geometry<f64> = point.coordinates.into();

            pool.execute(
                sqlx::query(
                    "INSERT INTO collection_points (id, location, data) VALUES ($1, ST_SetSRID($2, 4326), $3)",
                )
                .bind(&point.id)
                .bind(wkb::Encode(location))
                .bind(Json(&point)),
            )
            .await?;
        }

        Ok(Self {
            pool,
            authorizor: authorizor::new(),
            pricing,
            matcher,
        })
    }
}

impl Engine {
    pub fn authorize<Actor, Action, Resource>(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), Error>
    where
        Actor: oso::ToPolar,
        Action: oso::ToPolar,
        Resource: oso::ToPolar,
    {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        Err(unauthorized_error())
    }
}

impl API for Engine {}
