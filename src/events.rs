//! Domain events emitted after successful writes so surrounding layers
//! (UI refresh, notifications) can react without polling the store.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    PurchaseOrderCreated(Uuid),
    PurchaseOrderMarkedOrdered(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Creates an event channel with the given buffer size.
pub fn channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_send_order() {
        let (sender, mut rx) = channel(8);
        let id = Uuid::new_v4();
        sender.send(Event::PurchaseOrderCreated(id)).await.unwrap();
        sender
            .send(Event::PurchaseOrderMarkedOrdered(id))
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(Event::PurchaseOrderCreated(id)));
        assert_eq!(rx.recv().await, Some(Event::PurchaseOrderMarkedOrdered(id)));
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (sender, rx) = channel(1);
        drop(rx);
        assert!(sender
            .send(Event::PurchaseOrderCreated(Uuid::new_v4()))
            .await
            .is_err());
    }
}
