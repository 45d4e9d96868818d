use async_channel::{Receiver, Sender};
use rand_distr::{Distribution, Normal, Uniform};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{BookingAPI, LocationAPI, QuoteAPI, RouteAPI};
use crate::auth::User;
use crate::engine::Engine;
use crate::entities::{
    Coordinates, DeliveryType, DeliveryWindow, Dimensions, GroupPreferences, LocationSource,
    PackageType, QuoteRequest, VehicleType,
};

const ZONES: [&str; 4] = ["kampala", "wakiso", "mukono", "entebbe"];

struct Simulation {
    e: Engine,
}

impl Simulation {
    fn sample_coordinates(&self) -> Coordinates {
        let mut rng = rand::thread_rng();

        // scattered around central Kampala
        let lat_dist = Normal::new(0.3300, 0.0500).unwrap();
        let lng_dist = Normal::new(32.5800, 0.0500).unwrap();

        Coordinates {
            lat: lat_dist.sample(&mut rng),
            lng: lng_dist.sample(&mut rng),
        }
    }

    fn sample_quote_request(&self) -> QuoteRequest {
        let mut rng = rand::thread_rng();
        let die = Uniform::from(0..4);

        let delivery_type = match die.sample(&mut rng) {
            0 => DeliveryType::Direct,
            1 => DeliveryType::Urgent,
            2 => DeliveryType::Store,
            _ => DeliveryType::Group,
        };

        let weight_dist = Normal::new(6.0_f64, 4.0).unwrap();

        QuoteRequest {
            delivery_type,
            package_type: match Uniform::from(0..5).sample(&mut rng) {
                0 => PackageType::Document,
                1 => PackageType::Small,
                2 => PackageType::Medium,
                3 => PackageType::Large,
                _ => PackageType::Fragile,
            },
            weight_kg: weight_dist.sample(&mut rng).max(0.1),
            dimensions: Dimensions::default(),
            vehicle_type: match die.sample(&mut rng) {
                0 => VehicleType::Boda,
                1 => VehicleType::Pickup,
                2 => VehicleType::Van,
                _ => VehicleType::Truck,
            },
        }
    }

    fn sample_preferences(&self) -> GroupPreferences {
        let mut rng = rand::thread_rng();

        let pickup_zone = ZONES[Uniform::from(0..ZONES.len()).sample(&mut rng)];
        let destination_zone = ZONES[Uniform::from(0..ZONES.len()).sample(&mut rng)];

        GroupPreferences {
            pickup_zone: pickup_zone.into(),
            destination_zone: destination_zone.into(),
            delivery_window: match Uniform::from(0..3).sample(&mut rng) {
                0 => DeliveryWindow::Morning,
                1 => DeliveryWindow::Afternoon,
                _ => DeliveryWindow::Evening,
            },
        }
    }

    #[tracing::instrument(skip(self))]
    async fn add_booking(&self) {
        let sender = User {
            id: Uuid::new_v4(),
            roles: vec![],
        };

        tracing::info!("creating booking for sender: {:?}", &sender.id);

        let origin = self
            .e
            .create_location(
                sender.clone(),
                LocationSource::Coordinates(self.sample_coordinates()),
            )
            .await
            .unwrap();

        let destination = self
            .e
            .create_location(
                sender.clone(),
                LocationSource::Coordinates(self.sample_coordinates()),
            )
            .await
            .unwrap();

        let route = self
            .e
            .create_route(sender.clone(), origin.token, destination.token)
            .await
            .unwrap();

        let request = self.sample_quote_request();

        let quote = self
            .e
            .create_quote(sender.clone(), route.token, request)
            .await
            .unwrap();

        tracing::info!("received quote: {:?}", &quote.price);

        let preferences = match quote.request.delivery_type {
            DeliveryType::Group => Some(self.sample_preferences()),
            _ => None,
        };

        let booking = self
            .e
            .create_booking(sender, quote.token, preferences)
            .await
            .unwrap();

        tracing::info!(
            "created booking {:?} with status {:?}",
            &booking.id,
            booking.status.name()
        );
    }
}

pub struct Executor {
    s: Arc<Simulation>,
}

impl Executor {
    pub fn new(e: Engine) -> Self {
        Self {
            s: Arc::new(Simulation { e }),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self, bookings: usize) {
        let (tx, rx): (Sender<()>, Receiver<()>) = async_channel::unbounded();

        let mut handles = vec![];
        for _ in 0..16 {
            let rx = rx.clone();
            let s = self.s.clone();

            let handle = tokio::spawn(async move {
                while let Ok(_) = rx.recv().await {
                    s.add_booking().await;
                }
            });

            handles.push(handle);
        }

        handles.push(tokio::spawn(async move {
            for _ in 0..bookings {
                tx.send(()).await.unwrap();
            }
        }));

        futures::future::join_all(handles).await;
    }
}
