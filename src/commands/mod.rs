use crate::errors::ServiceError;
use crate::events::EventSender;
use crate::identity::IdentityProvider;
use crate::store::DocumentStore;
use crate::writer::SanitizingWriter;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared collaborators every command executes against. Built once at the
/// application entry point and injected; nothing here is a global.
pub struct WorkflowContext {
    pub writer: SanitizingWriter,
    pub identity: Arc<dyn IdentityProvider>,
    pub events: EventSender,
}

impl WorkflowContext {
    pub fn new(
        writer: SanitizingWriter,
        identity: Arc<dyn IdentityProvider>,
        events: EventSender,
    ) -> Self {
        Self {
            writer,
            identity,
            events,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.writer.store()
    }
}

/// Command trait for implementing the Command Pattern
///
/// This trait allows for encapsulating all the logic needed to execute a
/// business operation into a single object that can be validated, executed,
/// and produce events.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully
    type Result;

    /// Execute the command with the given dependencies
    async fn execute(&self, ctx: Arc<WorkflowContext>) -> Result<Self::Result, ServiceError>;
}

pub mod purchase_orders;
