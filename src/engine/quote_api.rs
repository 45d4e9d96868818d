use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{QuoteAPI, RouteAPI},
    auth::User,
    entities::{DeliveryRequest, Quote, QuoteRequest},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(
        &self,
        user: User,
        route_token: Uuid,
        request: QuoteRequest,
    ) -> Result<Quote, Error> {
        let route = self.find_route(user.clone(), route_token).await?;

        let request = DeliveryRequest::from_quote_request(request, route.distance_km);
        let price = self.pricing.quote(&request);

        let quote = Quote::new(route.token, request, price);

        let mut conn = self.pool.acquire().await?;
        conn.execute(
            sqlx::query("INSERT INTO quotes (token, data) VALUES ($1, $2)")
                .bind(&quote.token)
                .bind(Json(&quote)),
        )
        .await?;

        Ok(quote)
    }

    #[tracing::instrument(skip(self))]
    async fn find_quote(&self, user: User, token: Uuid) -> Result<Quote, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM quotes WHERE token = $1").bind(&token))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(quote) = result.try_get("data")?;

        Ok(quote)
    }
}
