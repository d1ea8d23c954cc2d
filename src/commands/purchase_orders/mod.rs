pub mod create_purchase_order_command;
pub mod mark_purchase_ordered_command;

pub use create_purchase_order_command::{CreatePurchaseOrderCommand, PurchaseOrderLineRequest};
pub use mark_purchase_ordered_command::MarkPurchaseOrderedCommand;
