use super::Database;

use sqlx::{types::Json, Executor, Row, Transaction};
use uuid::Uuid;

use crate::{
    entities::{Booking, GroupDelivery, GroupPreferences, GROUP_CAPACITY},
    error::{invalid_input_error, Error},
};

#[tracing::instrument(skip(tx))]
pub async fn fetch_booking_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Booking, Error> {
    let Json(booking): Json<Booking> = tx
        .fetch_optional(sqlx::query("SELECT data FROM bookings WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(|| invalid_input_error())?
        .try_get("data")?;

    Ok(booking)
}

#[tracing::instrument(skip(tx))]
pub async fn fetch_group_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<GroupDelivery, Error> {
    let Json(group): Json<GroupDelivery> = tx
        .fetch_optional(
            sqlx::query("SELECT data FROM group_deliveries WHERE id = $1 FOR UPDATE").bind(id),
        )
        .await?
        .ok_or_else(|| invalid_input_error())?
        .try_get("data")?;

    Ok(group)
}

// locks every candidate row so a concurrent joiner serializes behind us
#[tracing::instrument(skip(tx))]
pub async fn fetch_open_groups_for_update(
    tx: &mut Transaction<'_, Database>,
    preferences: &GroupPreferences,
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
        FOR UPDATE
    ";

    let results = tx
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

#[tracing::instrument(skip(tx))]
pub async fn update_booking(
    tx: &mut Transaction<'_, Database>,
    booking: &Booking,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE bookings SET status = $2, data = $3 WHERE id = $1")
            .bind(&booking.id)
            .bind(booking.status.name())
            .bind(Json(booking)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn update_group(
    tx: &mut Transaction<'_, Database>,
    group: &GroupDelivery,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE group_deliveries SET status = $2, data = $3 WHERE id = $1")
            .bind(&group.id)
            .bind(group.status.name())
            .bind(Json(group)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn insert_booking(
    tx: &mut Transaction<'_, Database>,
    booking: &Booking,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query("INSERT INTO bookings (id, status, data) VALUES ($1, $2, $3)")
            .bind(&booking.id)
            .bind(booking.status.name())
            .bind(Json(booking)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn insert_group(
    tx: &mut Transaction<'_, Database>,
    group: &GroupDelivery,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query(
            "INSERT INTO group_deliveries (id, status, created_at, data) VALUES ($1, $2, $3, $4)",
        )
        .bind(&group.id)
        .bind(group.status.name())
        .bind(&group.created_at)
        .bind(Json(group)),
    )
    .await?;

    Ok(())
}
