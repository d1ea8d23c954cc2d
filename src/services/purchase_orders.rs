use crate::{
    commands::{
        purchase_orders::{CreatePurchaseOrderCommand, MarkPurchaseOrderedCommand},
        Command, WorkflowContext,
    },
    errors::ServiceError,
    events::EventSender,
    identity::IdentityProvider,
    models::purchase_order::PurchaseOrder,
    sanitize::MissingPolicy,
    store::DocumentStore,
    writer::SanitizingWriter,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Service for managing the purchase-order lifecycle.
#[derive(Clone)]
pub struct PurchaseOrderService {
    ctx: Arc<WorkflowContext>,
}

impl PurchaseOrderService {
    pub fn new(ctx: Arc<WorkflowContext>) -> Self {
        Self { ctx }
    }

    /// Wires the service from its collaborators with the given missing
    /// policy for sanitized writes.
    pub fn with_collaborators(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        events: EventSender,
        policy: MissingPolicy,
    ) -> Self {
        let writer = SanitizingWriter::new(store, policy);
        Self::new(Arc::new(WorkflowContext::new(writer, identity, events)))
    }

    /// Creates a new draft purchase order and returns it for optimistic
    /// UI update.
    #[instrument(skip(self, command))]
    pub async fn create_purchase_order(
        &self,
        command: CreatePurchaseOrderCommand,
    ) -> Result<PurchaseOrder, ServiceError> {
        command.execute(self.ctx.clone()).await
    }

    /// Marks a draft purchase order as ordered. At most one caller can
    /// succeed per order; later attempts fail with an invalid transition.
    #[instrument(skip(self))]
    pub async fn mark_purchase_ordered(&self, id: Uuid) -> Result<(), ServiceError> {
        MarkPurchaseOrderedCommand { id }.execute(self.ctx.clone()).await
    }

    /// Reads an order back from the store. Callers racing on a transition
    /// use this to confirm the observed state.
    #[instrument(skip(self))]
    pub async fn get_purchase_order(&self, id: Uuid) -> Result<PurchaseOrder, ServiceError> {
        let path = PurchaseOrder::storage_path(id);
        let doc = self
            .ctx
            .store()
            .get(&path)
            .await
            .map_err(crate::errors::WriteError::from)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", id)))?;
        Ok(PurchaseOrder::from_document(&doc)?)
    }
}
