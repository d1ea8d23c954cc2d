use crate::document::{self, Document, DocumentError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection prefix under which purchase orders are stored.
pub const PURCHASE_ORDER_COLLECTION: &str = "purchase_orders";

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Draft,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    /// Lifecycle matrix. Only draft → ordered is driven by this crate; the
    /// later transitions belong to receiving flows but are encoded so the
    /// stored status strings stay consistent across the system.
    pub fn can_transition_to(self, next: PurchaseOrderStatus) -> bool {
        use PurchaseOrderStatus::*;
        matches!(
            (self, next),
            (Draft, Ordered) | (Ordered, Received) | (Draft, Cancelled) | (Ordered, Cancelled)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    /// Inventory item or product the line reorders.
    pub item_id: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

impl PurchaseOrderLine {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// A purchase order. Owned by the organization it was created under; the
/// organization id is an immutable tag set at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub organization_id: String,
    pub status: PurchaseOrderStatus,
    pub lines: Vec<PurchaseOrderLine>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    pub fn storage_path(id: Uuid) -> String {
        format!("{}/{}", PURCHASE_ORDER_COLLECTION, id)
    }

    pub fn total_cost(&self) -> Decimal {
        self.lines.iter().map(PurchaseOrderLine::line_total).sum()
    }

    pub fn to_document(&self) -> Result<Document, DocumentError> {
        document::to_document(self)
    }

    pub fn from_document(doc: &Document) -> Result<Self, DocumentError> {
        document::from_document(doc)
    }
}
