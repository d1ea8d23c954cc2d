use serde::{Deserialize, Serialize};
use validator::Validate;

/// How an item's stock level is counted.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StockUnit {
    Count,
    Weight,
    Volume,
}

/// An inventory stock record. Stock mutation lives outside this crate; the
/// purchase workflow only reads these to decide reorder quantities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub unit: StockUnit,
    #[validate(range(min = 0.0))]
    pub current_stock: f64,
    #[validate(range(min = 0.0))]
    pub minimum_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_stock: Option<f64>,
}

impl InventoryItem {
    pub fn is_below_threshold(&self) -> bool {
        self.current_stock < self.minimum_threshold
    }

    /// Quantity a reorder should request: enough to reach the target stock
    /// (or the minimum threshold when no target is set), never negative.
    pub fn suggested_reorder_quantity(&self) -> f64 {
        let goal = self.target_stock.unwrap_or(self.minimum_threshold);
        (goal - self.current_stock).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(current: f64, min: f64, target: Option<f64>) -> InventoryItem {
        InventoryItem {
            id: "beans".into(),
            name: "Espresso beans".into(),
            unit: StockUnit::Weight,
            current_stock: current,
            minimum_threshold: min,
            target_stock: target,
        }
    }

    #[test]
    fn threshold_check() {
        assert!(item(1.0, 2.0, None).is_below_threshold());
        assert!(!item(2.0, 2.0, None).is_below_threshold());
    }

    #[test]
    fn reorder_quantity_tops_up_to_target() {
        assert_eq!(item(1.5, 2.0, Some(5.0)).suggested_reorder_quantity(), 3.5);
        assert_eq!(item(1.5, 2.0, None).suggested_reorder_quantity(), 0.5);
        // Already above goal: nothing to reorder.
        assert_eq!(item(6.0, 2.0, Some(5.0)).suggested_reorder_quantity(), 0.0);
    }

    #[test]
    fn validation_rejects_negative_stock() {
        assert!(item(-1.0, 2.0, None).validate().is_err());
        assert!(item(1.0, 2.0, None).validate().is_ok());
    }
}
