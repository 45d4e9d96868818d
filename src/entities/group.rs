use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{capacity_exceeded_error, invalid_invocation_error, Error};

pub const GROUP_CAPACITY: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryWindow {
    Morning,
    Afternoon,
    Evening,
}

impl DeliveryWindow {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupPreferences {
    pub pickup_zone: String,
    pub destination_zone: String,
    pub delivery_window: DeliveryWindow,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupDelivery {
    pub id: Uuid,
    pub pickup_zone: String,
    pub destination_zone: String,
    pub delivery_window: DeliveryWindow,
    pub status: Status,
    pub members: Vec<Uuid>,
    pub total_price: i64,
    pub distance_km: f64,
    pub eta_minutes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Waiting,
    Confirmed,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Waiting => "waiting".into(),
            Self::Confirmed => "confirmed".into(),
        }
    }
}

impl GroupDelivery {
    pub fn new(
        preferences: GroupPreferences,
        founder: Uuid,
        quote_total: i64,
        distance_km: f64,
        eta_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pickup_zone: preferences.pickup_zone,
            destination_zone: preferences.destination_zone,
            delivery_window: preferences.delivery_window,
            status: Status::Waiting,
            members: vec![founder],
            total_price: quote_total,
            distance_km,
            eta_minutes,
            created_at: Utc::now(),
        }
    }

    pub fn is_waiting(&self) -> bool {
        match self.status {
            Status::Waiting => true,
            _ => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= GROUP_CAPACITY
    }

    pub fn has_member(&self, id: Uuid) -> bool {
        self.members.contains(&id)
    }

    #[tracing::instrument]
    pub fn admit(&mut self, member: Uuid, quote_total: i64) -> Result<(), Error> {
        if !self.is_waiting() || self.is_full() {
            return Err(capacity_exceeded_error());
        }

        if self.has_member(member) {
            return Err(invalid_invocation_error());
        }

        self.members.push(member);
        self.total_price += quote_total;

        Ok(())
    }

    #[tracing::instrument]
    pub fn confirm(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Waiting => {
                self.status = Status::Confirmed;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }
}

impl oso::PolarClass for GroupDelivery {
    fn get_polar_class_builder() -> oso::ClassBuilder<GroupDelivery> {
        oso::Class::builder()
            .name("GroupDelivery")
            .add_attribute_getter("id", |recv: &GroupDelivery| recv.id.clone())
            .add_attribute_getter("status", |recv: &GroupDelivery| recv.status.name())
            .add_method("has_member", GroupDelivery::has_member)
    }

    fn get_polar_class() -> oso::Class {
        let builder = GroupDelivery::get_polar_class_builder();
        builder.build()
    }
}

#[test]
fn admit_accumulates_total_price_test() {
    let mut group = GroupDelivery::new(
        GroupPreferences {
            pickup_zone: "kampala".into(),
            destination_zone: "wakiso".into(),
            delivery_window: DeliveryWindow::Morning,
        },
        Uuid::new_v4(),
        5_000,
        20.0,
        30,
    );

    group.admit(Uuid::new_v4(), 9_000).unwrap();

    assert_eq!(group.members.len(), 2);
    assert_eq!(group.total_price, 14_000);
    assert!(group.is_waiting());
}

#[test]
fn admit_rejects_duplicate_member_test() {
    let founder = Uuid::new_v4();

    let mut group = GroupDelivery::new(
        GroupPreferences {
            pickup_zone: "kampala".into(),
            destination_zone: "wakiso".into(),
            delivery_window: DeliveryWindow::Morning,
        },
        founder,
        5_000,
        20.0,
        30,
    );

    assert!(group.admit(founder, 5_000).is_err());
    assert_eq!(group.members.len(), 1);
}

#[test]
fn admit_rejects_full_group_test() {
    let mut group = GroupDelivery::new(
        GroupPreferences {
            pickup_zone: "kampala".into(),
            destination_zone: "wakiso".into(),
            delivery_window: DeliveryWindow::Evening,
        },
        Uuid::new_v4(),
        5_000,
        20.0,
        30,
    );

    for _ in 0..GROUP_CAPACITY - 1 {
        group.admit(Uuid::new_v4(), 5_000).unwrap();
    }

    let result = group.admit(Uuid::new_v4(), 5_000);

    assert_eq!(result.unwrap_err().code, 110);
    assert_eq!(group.members.len(), GROUP_CAPACITY);
}

#[test]
fn confirm_transition_test() {
    let mut group = GroupDelivery::new(
        GroupPreferences {
            pickup_zone: "mukono".into(),
            destination_zone: "kampala".into(),
            delivery_window: DeliveryWindow::Afternoon,
        },
        Uuid::new_v4(),
        5_000,
        12.0,
        18,
    );

    group.confirm().unwrap();
    assert_eq!(group.status, Status::Confirmed);
    assert!(group.confirm().is_err());
}
