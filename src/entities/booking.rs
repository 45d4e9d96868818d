use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::DeliveryRequest;
use crate::error::{invalid_invocation_error, Error};
use crate::pricing::PriceBreakdown;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub status: Status,
    pub request: DeliveryRequest,
    pub price: PriceBreakdown,
    pub group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Pending,
    Waiting,
    Confirmed,
    Completed,
    Cancelled,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Pending => "pending".into(),
            Self::Waiting => "waiting".into(),
            Self::Confirmed => "confirmed".into(),
            Self::Completed => "completed".into(),
            Self::Cancelled => "cancelled".into(),
        }
    }
}

impl Booking {
    pub fn new(sender_id: Uuid, request: DeliveryRequest, price: PriceBreakdown) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            status: Status::Pending,
            request,
            price,
            group_id: None,
            created_at: Utc::now(),
        }
    }

    // founding member pays the full quote until others join
    pub fn new_group_founder(
        sender_id: Uuid,
        request: DeliveryRequest,
        price: PriceBreakdown,
        group_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            status: Status::Waiting,
            request,
            price,
            group_id: Some(group_id),
            created_at: Utc::now(),
        }
    }

    pub fn new_group_member(
        sender_id: Uuid,
        request: DeliveryRequest,
        shared_price: i64,
        group_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            status: Status::Confirmed,
            request,
            price: PriceBreakdown::flat(shared_price),
            group_id: Some(group_id),
            created_at: Utc::now(),
        }
    }

    pub fn is_settled(&self) -> bool {
        match self.status {
            Status::Completed | Status::Cancelled => true,
            _ => false,
        }
    }

    #[tracing::instrument]
    pub fn confirm(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Pending | Status::Waiting => {
                self.status = Status::Confirmed;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument]
    pub fn complete(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Confirmed => {
                self.status = Status::Completed;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument]
    pub fn cancel(&mut self) -> Result<(), Error> {
        // group bookings share a pool price, unwinding them is the group's job
        if self.group_id.is_some() {
            return Err(invalid_invocation_error());
        }

        match self.status {
            Status::Pending | Status::Confirmed => {
                self.status = Status::Cancelled;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }
}

impl oso::PolarClass for Booking {
    fn get_polar_class_builder() -> oso::ClassBuilder<Booking> {
        oso::Class::builder()
            .name("Booking")
            .add_attribute_getter("id", |recv: &Booking| recv.id.clone())
            .add_attribute_getter("sender_id", |recv: &Booking| recv.sender_id.clone())
            .add_attribute_getter("status", |recv: &Booking| recv.status.name())
    }

    fn get_polar_class() -> oso::Class {
        let builder = Booking::get_polar_class_builder();
        builder.build()
    }
}

#[cfg(test)]
fn test_booking() -> Booking {
    use crate::entities::{DeliveryType, Dimensions, PackageType, VehicleType};

    Booking::new(
        Uuid::new_v4(),
        DeliveryRequest {
            delivery_type: DeliveryType::Direct,
            package_type: PackageType::Small,
            weight_kg: 2.0,
            dimensions: Dimensions::default(),
            vehicle_type: VehicleType::Boda,
            distance_km: 10.0,
        },
        PriceBreakdown {
            base_price: 12_000,
            weight_surcharge: 0,
            distance_cost: 3_000,
            total: 15_000,
        },
    )
}

#[test]
fn booking_lifecycle_test() {
    let mut booking = test_booking();

    assert_eq!(booking.status, Status::Pending);

    booking.confirm().unwrap();
    booking.complete().unwrap();

    assert!(booking.is_settled());
    assert!(booking.cancel().is_err());
}

#[test]
fn group_member_booking_is_not_cancellable_test() {
    let booking = test_booking();
    let mut member =
        Booking::new_group_member(booking.sender_id, booking.request, 8_000, Uuid::new_v4());

    assert_eq!(member.status, Status::Confirmed);
    assert_eq!(member.price.total, 8_000);
    assert_eq!(member.price.weight_surcharge, 0);
    assert!(member.cancel().is_err());
}
