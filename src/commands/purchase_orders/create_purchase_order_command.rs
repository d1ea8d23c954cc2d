use crate::{
    commands::{Command, WorkflowContext},
    errors::ServiceError,
    events::Event,
    models::purchase_order::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus},
};
use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::IntCounter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

lazy_static! {
    static ref PO_CREATIONS: IntCounter = IntCounter::new(
        "purchase_order_creations_total",
        "Total number of purchase orders created"
    )
    .expect("metric can be created");
    static ref PO_CREATION_FAILURES: IntCounter = IntCounter::new(
        "purchase_order_creation_failures_total",
        "Total number of failed purchase order creations"
    )
    .expect("metric can be created");
}

/// Creates a new draft purchase order. Deliberately not idempotent: each
/// call produces a distinct order, duplicate submissions are the UI's to
/// debounce.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePurchaseOrderCommand {
    #[validate(length(min = 1, message = "Organization id is required"))]
    pub organization_id: String,
    #[validate(length(min = 1, message = "At least one line item is required"))]
    pub lines: Vec<PurchaseOrderLineRequest>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrderLineRequest {
    pub item_id: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

#[async_trait::async_trait]
impl Command for CreatePurchaseOrderCommand {
    /// The constructed order, returned before the store round-trip is
    /// confirmed so callers can update local state optimistically.
    type Result = PurchaseOrder;

    #[instrument(skip(self, ctx), fields(organization_id = %self.organization_id))]
    async fn execute(&self, ctx: Arc<WorkflowContext>) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            PO_CREATION_FAILURES.inc();
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;
        self.validate_lines()?;

        let order = self.build_order(&ctx);
        let doc = order.to_document()?;
        ctx.writer
            .safe_write(&PurchaseOrder::storage_path(order.id), &doc)
            .await
            .map_err(|e| {
                PO_CREATION_FAILURES.inc();
                error!(purchase_order_id = %order.id, "Failed to persist purchase order: {}", e);
                ServiceError::from(e)
            })?;

        self.log_and_trigger_event(&ctx, &order).await?;

        PO_CREATIONS.inc();

        Ok(order)
    }
}

impl CreatePurchaseOrderCommand {
    fn validate_lines(&self) -> Result<(), ServiceError> {
        for line in &self.lines {
            if line.item_id.is_empty() {
                PO_CREATION_FAILURES.inc();
                return Err(ServiceError::ValidationError(
                    "Line item id must not be empty".into(),
                ));
            }
            if line.quantity <= Decimal::ZERO {
                PO_CREATION_FAILURES.inc();
                return Err(ServiceError::ValidationError(format!(
                    "Quantity for item {} must be positive",
                    line.item_id
                )));
            }
            if line.unit_cost < Decimal::ZERO {
                PO_CREATION_FAILURES.inc();
                return Err(ServiceError::ValidationError(format!(
                    "Unit cost for item {} must not be negative",
                    line.item_id
                )));
            }
        }
        Ok(())
    }

    fn build_order(&self, ctx: &WorkflowContext) -> PurchaseOrder {
        let actor = ctx.identity.current_actor();
        PurchaseOrder {
            id: ctx.store().allocate_id(),
            organization_id: self.organization_id.clone(),
            status: PurchaseOrderStatus::Draft,
            lines: self
                .lines
                .iter()
                .map(|line| PurchaseOrderLine {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                    unit_cost: line.unit_cost,
                })
                .collect(),
            created_by: actor.user_id,
            created_at: Utc::now(),
            ordered_at: None,
        }
    }

    async fn log_and_trigger_event(
        &self,
        ctx: &WorkflowContext,
        order: &PurchaseOrder,
    ) -> Result<(), ServiceError> {
        info!(
            purchase_order_id = %order.id,
            organization_id = %order.organization_id,
            lines = %order.lines.len(),
            total_cost = %order.total_cost(),
            "Purchase order created successfully"
        );

        ctx.events
            .send(Event::PurchaseOrderCreated(order.id))
            .await
            .map_err(|e| {
                PO_CREATION_FAILURES.inc();
                let msg = format!("Failed to send event for created purchase order: {}", e);
                error!("{}", msg);
                ServiceError::EventError(msg)
            })
    }
}
