use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{
    Booking, CollectionPoint, Coordinates, GroupDelivery, GroupPreferences, Location,
    LocationSource, Quote, QuoteRequest, Route,
};
use crate::error::Error;

#[async_trait]
pub trait LocationAPI {
    async fn create_location(&self, user: User, source: LocationSource) -> Result<Location, Error>;
    async fn find_location(&self, user: User, token: Uuid) -> Result<Location, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn create_route(
        &self,
        user: User,
        origin_token: Uuid,
        destination_token: Uuid,
    ) -> Result<Route, Error>;

    async fn find_route(&self, user: User, token: Uuid) -> Result<Route, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(
        &self,
        user: User,
        route_token: Uuid,
        request: QuoteRequest,
    ) -> Result<Quote, Error>;

    async fn find_quote(&self, user: User, token: Uuid) -> Result<Quote, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(
        &self,
        user: User,
        quote_token: Uuid,
        group: Option<GroupPreferences>,
    ) -> Result<Booking, Error>;

    async fn find_booking(&self, user: User, id: Uuid) -> Result<Booking, Error>;

    async fn cancel_booking(&self, user: User, id: Uuid) -> Result<Booking, Error>;
}

#[async_trait]
pub trait GroupAPI {
    async fn find_group(&self, user: User, id: Uuid) -> Result<GroupDelivery, Error>;

    async fn list_open_groups(
        &self,
        user: User,
        preferences: GroupPreferences,
    ) -> Result<Vec<GroupDelivery>, Error>;

    async fn join_group(&self, user: User, id: Uuid, quote_token: Uuid) -> Result<Booking, Error>;
}

#[async_trait]
pub trait CollectionPointAPI {
    async fn list_collection_points(&self, user: User) -> Result<Vec<CollectionPoint>, Error>;

    async fn find_nearby_collection_points(
        &self,
        user: User,
        coordinates: Coordinates,
        radius: f64,
    ) -> Result<Vec<CollectionPoint>, Error>;
}

pub trait API:
    LocationAPI + RouteAPI + QuoteAPI + BookingAPI + GroupAPI + CollectionPointAPI
{
}
