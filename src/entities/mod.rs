mod booking;
mod collection_point;
mod group;
mod location;
mod quote;
mod request;
mod route;

pub use booking::{Booking, Status as BookingStatus};
pub use collection_point::{seed_collection_points, CollectionPoint};
pub use group::{
    DeliveryWindow, GroupDelivery, GroupPreferences, Status as GroupStatus, GROUP_CAPACITY,
};
pub use location::{Coordinates, Location, LocationSource};
pub use quote::Quote;
pub use request::{
    DeliveryRequest, DeliveryType, Dimensions, PackageType, QuoteRequest, VehicleType,
};
pub use route::Route;
