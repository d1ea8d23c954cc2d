use crate::{
    commands::{Command, WorkflowContext},
    document::{Document, Sentinel, Value},
    errors::ServiceError,
    events::Event,
    models::purchase_order::{PurchaseOrder, PurchaseOrderStatus},
    store::{Precondition, TxnOutcome},
};
use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

lazy_static! {
    static ref PO_ORDER_MARKS: IntCounter = IntCounter::new(
        "purchase_order_marks_total",
        "Total number of purchase orders marked as ordered"
    )
    .expect("metric can be created");
    static ref PO_ORDER_MARK_FAILURES: IntCounterVec = IntCounterVec::new(
        prometheus::Opts::new(
            "purchase_order_mark_failures_total",
            "Total number of failed purchase order mark-ordered attempts"
        ),
        &["error_type"]
    )
    .expect("metric can be created");
}

/// Transitions a draft purchase order to `ordered`. The transition is
/// applied as a conditional merge keyed on the current status, so two
/// racing callers observe exactly one success; the loser gets an invalid
/// transition error rather than a silent second apply.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarkPurchaseOrderedCommand {
    pub id: Uuid,
}

#[async_trait::async_trait]
impl Command for MarkPurchaseOrderedCommand {
    type Result = ();

    #[instrument(skip(self, ctx), fields(purchase_order_id = %self.id))]
    async fn execute(&self, ctx: Arc<WorkflowContext>) -> Result<Self::Result, ServiceError> {
        self.validate_can_mark(&ctx).await?;

        let path = PurchaseOrder::storage_path(self.id);
        let precondition =
            Precondition::field_equals("status", PurchaseOrderStatus::Draft.to_string().as_str());
        let outcome = ctx
            .writer
            .safe_write_if(&path, &precondition, &self.transition_patch())
            .await
            .map_err(|e| {
                PO_ORDER_MARK_FAILURES
                    .with_label_values(&["store_error"])
                    .inc();
                error!("Failed to mark purchase order {} as ordered: {}", self.id, e);
                ServiceError::from(e)
            })?;

        match outcome {
            TxnOutcome::Applied => {}
            TxnOutcome::ConditionFailed => {
                // Lost the race: another caller transitioned first.
                PO_ORDER_MARK_FAILURES
                    .with_label_values(&["invalid_status"])
                    .inc();
                return Err(ServiceError::InvalidTransition(format!(
                    "Purchase order {} is no longer in draft status",
                    self.id
                )));
            }
            TxnOutcome::NotFound => {
                PO_ORDER_MARK_FAILURES
                    .with_label_values(&["not_found"])
                    .inc();
                return Err(ServiceError::NotFound(format!(
                    "Purchase order {} not found",
                    self.id
                )));
            }
        }

        self.log_and_trigger_event(&ctx).await?;

        PO_ORDER_MARKS.inc();

        Ok(())
    }
}

impl MarkPurchaseOrderedCommand {
    /// Precheck for precise errors; the conditional write below is what
    /// actually guarantees at-most-once under concurrency.
    async fn validate_can_mark(&self, ctx: &WorkflowContext) -> Result<(), ServiceError> {
        let path = PurchaseOrder::storage_path(self.id);
        let doc = ctx
            .store()
            .get(&path)
            .await
            .map_err(|e| {
                PO_ORDER_MARK_FAILURES
                    .with_label_values(&["store_error"])
                    .inc();
                ServiceError::from(crate::errors::WriteError::from(e))
            })?
            .ok_or_else(|| {
                PO_ORDER_MARK_FAILURES
                    .with_label_values(&["not_found"])
                    .inc();
                ServiceError::NotFound(format!("Purchase order {} not found", self.id))
            })?;

        let order = PurchaseOrder::from_document(&doc)?;
        if !order
            .status
            .can_transition_to(PurchaseOrderStatus::Ordered)
        {
            PO_ORDER_MARK_FAILURES
                .with_label_values(&["invalid_status"])
                .inc();
            return Err(ServiceError::InvalidTransition(format!(
                "Cannot mark purchase order {} as ordered from {} status",
                self.id, order.status
            )));
        }

        Ok(())
    }

    /// Only the status and the ordered timestamp are touched; line items
    /// and creation metadata are preserved by merge semantics.
    fn transition_patch(&self) -> Document {
        Document::from([
            (
                "status".to_string(),
                Value::String(PurchaseOrderStatus::Ordered.to_string()),
            ),
            (
                "orderedAt".to_string(),
                Value::Sentinel(Sentinel::ServerTimestamp),
            ),
        ])
    }

    async fn log_and_trigger_event(&self, ctx: &WorkflowContext) -> Result<(), ServiceError> {
        info!(
            purchase_order_id = %self.id,
            "Purchase order marked as ordered"
        );

        ctx.events
            .send(Event::PurchaseOrderMarkedOrdered(self.id))
            .await
            .map_err(|e| {
                PO_ORDER_MARK_FAILURES
                    .with_label_values(&["event_error"])
                    .inc();
                let msg = format!("Failed to send event for ordered purchase order: {}", e);
                error!("{}", msg);
                ServiceError::EventError(msg)
            })
    }
}
