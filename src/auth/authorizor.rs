use oso::{Oso, PolarClass};

use crate::auth::{Platform, User};
use crate::entities::{Booking, GroupDelivery};

pub fn new() -> Oso {
    let mut o = Oso::new();

    o.register_class(Platform::get_polar_class()).unwrap();
    o.register_class(User::get_polar_class()).unwrap();
    o.register_class(Booking::get_polar_class()).unwrap();
    o.register_class(GroupDelivery::get_polar_class()).unwrap();

    o.load_str(include_str!("rules.polar")).unwrap();

    o
}

#[cfg(test)]
fn test_booking(sender_id: uuid::Uuid) -> Booking {
    use crate::entities::{
        DeliveryRequest, DeliveryType, Dimensions, PackageType, VehicleType,
    };
    use crate::pricing::PriceBreakdown;

    Booking::new(
        sender_id,
        DeliveryRequest {
            delivery_type: DeliveryType::Direct,
            package_type: PackageType::Document,
            weight_kg: 1.0,
            dimensions: Dimensions::default(),
            vehicle_type: VehicleType::Boda,
            distance_km: 5.0,
        },
        PriceBreakdown::flat(11_500),
    )
}

#[test]
fn platform_booking_creation_test() {
    use uuid::Uuid;

    let authorizor = new();

    let customer = User {
        id: Uuid::new_v4(),
        roles: vec![],
    };

    let result = authorizor.is_allowed(customer.clone(), "create_booking", Platform::default());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(customer, "administrate", Platform::default());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn platform_system_role_test() {
    let authorizor = new();

    let system = User::new_system_user();

    let result = authorizor.is_allowed(system.clone(), "create_booking", Platform::default());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(system, "administrate", Platform::default());
    assert_eq!(result.unwrap(), true);
}

#[test]
fn booking_owner_role_test() {
    use uuid::Uuid;

    let authorizor = new();

    let owner = User {
        id: Uuid::new_v4(),
        roles: vec![],
    };
    let stranger = User {
        id: Uuid::new_v4(),
        roles: vec![],
    };

    let booking = test_booking(owner.id);

    let result = authorizor.query_rule("has_role", (owner.clone(), "owner", booking.clone()));
    assert!(result.unwrap().next().unwrap().is_ok());

    let result = authorizor.is_allowed(owner.clone(), "read", booking.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(owner, "cancel", booking.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(stranger.clone(), "read", booking.clone());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(stranger, "cancel", booking);
    assert_eq!(result.unwrap(), false);
}

#[test]
fn booking_system_role_test() {
    use uuid::Uuid;

    let authorizor = new();

    let system = User::new_system_user();
    let booking = test_booking(Uuid::new_v4());

    let result = authorizor.is_allowed(system.clone(), "read", booking.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(system, "cancel", booking);
    assert_eq!(result.unwrap(), true);
}

#[test]
fn group_member_and_join_test() {
    use crate::entities::{DeliveryWindow, GroupPreferences};
    use uuid::Uuid;

    let authorizor = new();

    let founder = User {
        id: Uuid::new_v4(),
        roles: vec![],
    };
    let joiner = User {
        id: Uuid::new_v4(),
        roles: vec![],
    };

    let group = GroupDelivery::new(
        GroupPreferences {
            pickup_zone: "kampala".into(),
            destination_zone: "wakiso".into(),
            delivery_window: DeliveryWindow::Morning,
        },
        founder.id,
        5_000,
        20.0,
        30,
    );

    let result = authorizor.query_rule("has_role", (founder.clone(), "member", group.clone()));
    assert!(result.unwrap().next().unwrap().is_ok());

    let result = authorizor.is_allowed(founder.clone(), "read", group.clone());
    assert_eq!(result.unwrap(), true);

    // members cannot join a group twice
    let result = authorizor.is_allowed(founder, "join", group.clone());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(joiner.clone(), "join", group.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(joiner, "read", group);
    assert_eq!(result.unwrap(), false);
}
