#![allow(dead_code)]

use cafestock_core::commands::purchase_orders::PurchaseOrderLineRequest;
use cafestock_core::events::{channel, Event};
use cafestock_core::identity::StaticIdentity;
use cafestock_core::sanitize::MissingPolicy;
use cafestock_core::services::PurchaseOrderService;
use cafestock_core::store::InMemoryStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;

pub const TEST_ORG: &str = "cafe-1";
pub const TEST_USER: &str = "worker-7";

/// Wires the service against an in-memory store and a static identity,
/// mirroring how an embedding application assembles the collaborators.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub service: PurchaseOrderService,
    pub events: Receiver<Event>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(MissingPolicy::default())
    }

    pub fn with_policy(policy: MissingPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let (sender, events) = channel(32);
        let identity = Arc::new(StaticIdentity::new(TEST_USER, TEST_ORG));
        let service =
            PurchaseOrderService::with_collaborators(store.clone(), identity, sender, policy);
        Self {
            store,
            service,
            events,
        }
    }
}

pub fn line(item_id: &str, quantity: Decimal, unit_cost: Decimal) -> PurchaseOrderLineRequest {
    PurchaseOrderLineRequest {
        item_id: item_id.to_string(),
        quantity,
        unit_cost,
    }
}
