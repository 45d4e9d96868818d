use super::helpers::{fetch_group_for_update, insert_booking, update_group};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{GroupAPI, QuoteAPI},
    auth::User,
    entities::{Booking, DeliveryType, GroupDelivery, GroupPreferences, GROUP_CAPACITY},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl GroupAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_group(&self, user: User, id: Uuid) -> Result<GroupDelivery, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM group_deliveries WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(group): Json<GroupDelivery> = result.try_get("data")?;

        self.authorize(user.clone(), "read", group.clone())?;

        Ok(group)
    }

    #[tracing::instrument(skip(self))]
    async fn list_open_groups(
        &self,
        user: User,
        preferences: GroupPreferences,
    ) -> Result<Vec<GroupDelivery>, Error> {
        let query = "
            SELECT
                data
            FROM
                group_deliveries
            WHERE
                status = 'waiting'
                AND data->>'pickup_zone' = $1
                AND data->>'destination_zone' = $2
                AND data->>'delivery_window' = $3
                AND jsonb_array_length(data->'members') < $4
            ORDER BY
                created_at ASC
        ";

        let mut conn = self.pool.acquire().await?;

        let results = conn
            .fetch_all(
                sqlx::query(query)
                    .bind(&preferences.pickup_zone)
                    .bind(&preferences.destination_zone)
                    .bind(preferences.delivery_window.name())
                    .bind(GROUP_CAPACITY as i32),
            )
            .await?;

        let mut groups = vec![];

        for result in results.iter() {
            let Json(group): Json<GroupDelivery> = result.try_get("data")?;
            groups.push(group);
        }

        Ok(groups)
    }

    #[tracing::instrument(skip(self))]
    async fn join_group(&self, user: User, id: Uuid, quote_token: Uuid) -> Result<Booking, Error> {
        let quote = self.find_quote(user.clone(), quote_token).await?;

        if quote.request.delivery_type != DeliveryType::Group {
            return Err(invalid_input_error());
        }

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let group = fetch_group_for_update(&mut tx, &id).await?;

        self.authorize(user.clone(), "join", group.clone())?;

        // a lost capacity race surfaces here as a retryable conflict
        let joined = self.matcher.join(&group, user.id, &quote.price)?;

        let mut group = joined.group;
        if group.is_full() {
            group.confirm()?;
        }

        update_group(&mut tx, &group).await?;

        let booking =
            Booking::new_group_member(user.id, quote.request, joined.shared_price, group.id);

        insert_booking(&mut tx, &booking).await?;

        tx.commit().await?;

        Ok(booking)
    }
}
