use super::helpers::{
    fetch_booking_for_update, fetch_open_groups_for_update, insert_booking, insert_group,
    update_booking, update_group,
};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{BookingAPI, QuoteAPI, RouteAPI},
    auth::{Platform, User},
    entities::{Booking, DeliveryType, GroupPreferences, Quote},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(
        &self,
        user: User,
        quote_token: Uuid,
        group: Option<GroupPreferences>,
    ) -> Result<Booking, Error> {
        self.authorize(user.clone(), "create_booking", Platform::default())?;

        let quote = self.find_quote(user.clone(), quote_token).await?;

        match quote.request.delivery_type {
            DeliveryType::Group => {
                let preferences = group.ok_or_else(|| invalid_input_error())?;
                self.create_group_booking(user, quote, preferences).await
            }
            _ => {
                let booking = Booking::new(user.id, quote.request, quote.price);

                let mut conn = self.pool.acquire().await?;
                conn.execute(
                    sqlx::query("INSERT INTO bookings (id, status, data) VALUES ($1, $2, $3)")
                        .bind(&booking.id)
                        .bind(booking.status.name())
                        .bind(Json(&booking)),
                )
                .await?;

                Ok(booking)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, user: User, id: Uuid) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM bookings WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(booking): Json<Booking> = result.try_get("data")?;

        self.authorize(user.clone(), "read", booking.clone())?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_booking(&self, user: User, id: Uuid) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut booking = fetch_booking_for_update(&mut tx, &id).await?;

        self.authorize(user.clone(), "cancel", booking.clone())?;

        booking.cancel()?;

        update_booking(&mut tx, &booking).await?;

        tx.commit().await?;

        Ok(booking)
    }
}

impl Engine {
    // match-or-create runs inside one transaction so two concurrent joiners
    // cannot both take the last seat of a pool
    #[tracing::instrument(skip(self))]
    async fn create_group_booking(
        &self,
        user: User,
        quote: Quote,
        preferences: GroupPreferences,
    ) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let pools = fetch_open_groups_for_update(&mut tx, &preferences).await?;

        let booking = match self.matcher.find_match(
            &pools,
            &preferences.pickup_zone,
            &preferences.destination_zone,
            preferences.delivery_window,
        ) {
            Some(group) => {
                tracing::info!("joining open group {}", group.id);

                let joined = self.matcher.join(group, user.id, &quote.price)?;

                let mut group = joined.group;
                if group.is_full() {
                    group.confirm()?;
                }

                update_group(&mut tx, &group).await?;

                Booking::new_group_member(user.id, quote.request, joined.shared_price, group.id)
            }
            None => {
                tracing::info!("no compatible pool, founding a new group");

                let route = self.find_route(user.clone(), quote.route_token).await?;
                let group =
                    self.matcher
                        .create_group(preferences, user.id, &quote.price, &route);

                insert_group(&mut tx, &group).await?;

                Booking::new_group_founder(user.id, quote.request, quote.price, group.id)
            }
        };

        insert_booking(&mut tx, &booking).await?;

        tx.commit().await?;

        Ok(booking)
    }
}
