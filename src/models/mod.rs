pub mod inventory_item;
pub mod purchase_order;

pub use inventory_item::{InventoryItem, StockUnit};
pub use purchase_order::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};
