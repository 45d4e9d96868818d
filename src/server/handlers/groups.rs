use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{Booking, GroupDelivery, GroupPreferences};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct JoinParams {
    quote_token: Uuid,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupDelivery>, Error> {
    let group = api.find_group(user, id).await?;

    Ok(group.into())
}

pub async fn list_open(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Query(preferences): Query<GroupPreferences>,
) -> Result<Json<Vec<GroupDelivery>>, Error> {
    let groups = api.list_open_groups(user, preferences).await?;

    Ok(groups.into())
}

pub async fn join(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(params): Json<JoinParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api.join_group(user, id, params.quote_token).await?;

    Ok(booking.into())
}
