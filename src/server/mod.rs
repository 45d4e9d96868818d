mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::server::handlers::{bookings, collection_points, groups, locations, quotes, routes};
use crate::{api::API, auth::User};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/locations", post(locations::create))
        .route("/locations/:token", get(locations::find))
        .route("/routes", post(routes::create))
        .route("/routes/:token", get(routes::find))
        .route("/quotes", post(quotes::create))
        .route("/quotes/:token", get(quotes::find))
        .route("/bookings", post(bookings::create))
        .route("/bookings/:id", get(bookings::find))
        .route("/bookings/:id/cancel", patch(bookings::cancel))
        .route("/groups/open", get(groups::list_open))
        .route("/groups/:id", get(groups::find))
        .route("/groups/:id/join", patch(groups::join))
        .route("/collection_points", get(collection_points::list))
        .route("/collection_points/nearby", get(collection_points::nearby))
        .layer(Extension(api))
        .layer(Extension(User::new_system_user()));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
