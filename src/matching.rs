use uuid::Uuid;

use crate::entities::{DeliveryWindow, GroupDelivery, GroupPreferences, Route};
use crate::error::Error;
use crate::pricing::PriceBreakdown;

#[derive(Clone, Debug)]
pub struct GroupJoin {
    pub group: GroupDelivery,
    pub shared_price: i64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GroupMatcher;

impl GroupMatcher {
    pub fn new() -> Self {
        Self
    }

    // first match wins; callers must supply the pool in a stable order,
    // concurrent joins are serialized by the caller's row locks
    #[tracing::instrument(skip(self, pools))]
    pub fn find_match<'a>(
        &self,
        pools: &'a [GroupDelivery],
        pickup_zone: &str,
        destination_zone: &str,
        delivery_window: DeliveryWindow,
    ) -> Option<&'a GroupDelivery> {
        pools.iter().find(|group| {
            group.pickup_zone == pickup_zone
                && group.destination_zone == destination_zone
                && group.delivery_window == delivery_window
                && group.is_waiting()
                && !group.is_full()
        })
    }

    #[tracing::instrument(skip(self, group, quote))]
    pub fn join(
        &self,
        group: &GroupDelivery,
        member: Uuid,
        quote: &PriceBreakdown,
    ) -> Result<GroupJoin, Error> {
        let mut group = group.clone();

        group.admit(member, quote.total)?;

        // the running total stays additive, each member is shown the equal share
        let shared_price = group.total_price / group.members.len() as i64;

        Ok(GroupJoin {
            group,
            shared_price,
        })
    }

    #[tracing::instrument(skip(self, quote, route))]
    pub fn create_group(
        &self,
        preferences: GroupPreferences,
        founder: Uuid,
        quote: &PriceBreakdown,
        route: &Route,
    ) -> GroupDelivery {
        GroupDelivery::new(
            preferences,
            founder,
            quote.total,
            route.distance_km,
            route.eta_minutes,
        )
    }
}

#[cfg(test)]
fn open_group(
    pickup_zone: &str,
    destination_zone: &str,
    delivery_window: DeliveryWindow,
    members: usize,
    total_price: i64,
) -> GroupDelivery {
    let mut group = GroupDelivery::new(
        GroupPreferences {
            pickup_zone: pickup_zone.into(),
            destination_zone: destination_zone.into(),
            delivery_window,
        },
        Uuid::new_v4(),
        total_price,
        20.0,
        30,
    );

    for _ in 1..members {
        group.members.push(Uuid::new_v4());
    }

    group
}

#[test]
fn find_match_first_in_pool_order_test() {
    let matcher = GroupMatcher::new();

    let pools = vec![
        open_group("kampala", "wakiso", DeliveryWindow::Morning, 2, 15_000),
        open_group("kampala", "wakiso", DeliveryWindow::Morning, 1, 5_000),
    ];

    let matched = matcher
        .find_match(&pools, "kampala", "wakiso", DeliveryWindow::Morning)
        .unwrap();

    assert_eq!(matched.id, pools[0].id);
}

#[test]
fn find_match_requires_all_three_fields_test() {
    let matcher = GroupMatcher::new();
    let pools = vec![open_group("kampala", "wakiso", DeliveryWindow::Morning, 2, 15_000)];

    assert!(matcher
        .find_match(&pools, "mukono", "wakiso", DeliveryWindow::Morning)
        .is_none());
    assert!(matcher
        .find_match(&pools, "kampala", "entebbe", DeliveryWindow::Morning)
        .is_none());
    assert!(matcher
        .find_match(&pools, "kampala", "wakiso", DeliveryWindow::Evening)
        .is_none());
}

#[test]
fn find_match_skips_full_and_closed_groups_test() {
    let matcher = GroupMatcher::new();

    let full = open_group("kampala", "wakiso", DeliveryWindow::Morning, 4, 20_000);
    let mut confirmed = open_group("kampala", "wakiso", DeliveryWindow::Morning, 2, 10_000);
    confirmed.confirm().unwrap();
    let open = open_group("kampala", "wakiso", DeliveryWindow::Morning, 3, 18_000);

    let pools = vec![full, confirmed, open.clone()];

    let matched = matcher
        .find_match(&pools, "kampala", "wakiso", DeliveryWindow::Morning)
        .unwrap();

    assert_eq!(matched.id, open.id);
}

#[test]
fn join_splits_price_across_all_members_test() {
    let matcher = GroupMatcher::new();
    let group = open_group("kampala", "wakiso", DeliveryWindow::Morning, 2, 15_000);

    let quote = PriceBreakdown::flat(9_000);
    let joined = matcher.join(&group, Uuid::new_v4(), &quote).unwrap();

    // floor((15000 + 9000) / 3)
    assert_eq!(joined.shared_price, 8_000);
    assert_eq!(joined.group.total_price, 24_000);
    assert_eq!(joined.group.members.len(), 3);
}

#[test]
fn join_full_group_is_retryable_test() {
    let matcher = GroupMatcher::new();
    let group = open_group("kampala", "wakiso", DeliveryWindow::Morning, 4, 20_000);

    let quote = PriceBreakdown::flat(9_000);
    let result = matcher.join(&group, Uuid::new_v4(), &quote);

    assert_eq!(result.unwrap_err().code, 110);
}

#[test]
fn create_group_starts_with_founder_test() {
    use crate::entities::{Coordinates, Location};

    let matcher = GroupMatcher::new();
    let founder = Uuid::new_v4();
    let quote = PriceBreakdown::flat(5_000);

    let origin = Location::new(Coordinates { lat: 0.31, lng: 32.58 }, "Kampala".into());
    let destination = Location::new(Coordinates { lat: 0.40, lng: 32.46 }, "Wakiso".into());
    let route = Route::new(origin, destination, 20.0, 30);

    let group = matcher.create_group(
        GroupPreferences {
            pickup_zone: "kampala".into(),
            destination_zone: "wakiso".into(),
            delivery_window: DeliveryWindow::Morning,
        },
        founder,
        &quote,
        &route,
    );

    assert_eq!(group.members, vec![founder]);
    assert_eq!(group.total_price, 5_000);
    assert!(group.is_waiting());
    assert_eq!(group.distance_km, 20.0);
}
