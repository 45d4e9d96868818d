use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::DeliveryRequest;
use crate::pricing::PriceBreakdown;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub token: Uuid,
    pub route_token: Uuid,
    pub request: DeliveryRequest,
    pub price: PriceBreakdown,
}

impl Quote {
    pub fn new(route_token: Uuid, request: DeliveryRequest, price: PriceBreakdown) -> Self {
        Self {
            token: Uuid::new_v4(),
            route_token,
            request,
            price,
        }
    }
}
