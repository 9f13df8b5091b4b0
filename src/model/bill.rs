//! Bills and their line items.

use crate::entity::LedgerEntity;
use crate::ledger::collections;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single billable service/product row.
///
/// `total` is always a derived value - `quantity × price` - recomputed by
/// every quantity or price update. It is never set independently.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

impl BillItem {
    /// Create a fresh empty row: quantity 1, price 0, total 0.
    pub fn new() -> Self {
        BillItem {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            quantity: 1,
            price: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Recompute `total` from quantity and price.
    pub fn recompute_total(&mut self) {
        self.total = Decimal::from(self.quantity) * self.price;
    }

    /// A row makes it onto a finalized bill only with a name and a
    /// positive price.
    pub fn is_billable(&self) -> bool {
        !self.name.trim().is_empty() && self.price > Decimal::ZERO
    }
}

impl Default for BillItem {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable finalized invoice generated from an appointment.
///
/// Customer and vehicle fields are denormalized copies from the
/// appointment. `subtotal`, `tax`, and `total` are consistent functions of
/// `items`; item order is insertion order and doubles as display order.
/// There is no update operation - bills are created and read only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub appointment_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub car_number: String,
    pub car_km: u32,
    pub items: Vec<BillItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Bill {
    /// Human-facing bill number: the last 8 characters of the id,
    /// uppercased.
    pub fn short_number(&self) -> String {
        let id = self.id.as_str();
        let tail = &id[id.len().saturating_sub(8)..];
        tail.to_uppercase()
    }
}

impl LedgerEntity for Bill {
    const COLLECTION: &'static str = collections::BILLS;

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_item_defaults() {
        let item = BillItem::new();
        assert!(item.name.is_empty());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, Decimal::ZERO);
        assert_eq!(item.total, Decimal::ZERO);
        assert!(!item.id.is_empty());
    }

    #[test]
    fn test_recompute_total() {
        let mut item = BillItem::new();
        item.quantity = 3;
        item.price = dec!(149.50);
        item.recompute_total();
        assert_eq!(item.total, dec!(448.50));
    }

    #[test]
    fn test_is_billable() {
        let mut item = BillItem::new();
        assert!(!item.is_billable());

        item.name = "Oil Change".to_string();
        assert!(!item.is_billable()); // price still zero

        item.price = dec!(500);
        assert!(item.is_billable());

        item.name = "   ".to_string();
        assert!(!item.is_billable()); // whitespace-only name
    }

    #[test]
    fn test_short_number_uppercases_tail() {
        let bill = Bill {
            id: "3f2c9ab4-1d2e-4f56-9a7b-d41ce8f0aa1b".to_string(),
            appointment_id: "apt_1".to_string(),
            customer_name: "Asha".to_string(),
            customer_phone: "9000000000".to_string(),
            car_number: "MH15AB1234".to_string(),
            car_km: 25000,
            items: vec![],
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
            paid_at: None,
        };
        assert_eq!(bill.short_number(), "E8F0AA1B");
    }

    #[test]
    fn test_short_number_short_id() {
        let bill = Bill {
            id: "ab1".to_string(),
            appointment_id: String::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            car_number: String::new(),
            car_km: 0,
            items: vec![],
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            created_at: Utc::now(),
            paid_at: None,
        };
        assert_eq!(bill.short_number(), "AB1");
    }

    #[test]
    fn test_stored_layout_uses_camel_case() {
        let bill = Bill {
            id: "b1".to_string(),
            appointment_id: "apt_1".to_string(),
            customer_name: "Asha".to_string(),
            customer_phone: "9000000000".to_string(),
            car_number: "MH15AB1234".to_string(),
            car_km: 25000,
            items: vec![BillItem::new()],
            subtotal: dec!(500),
            tax: dec!(90),
            total: dec!(590),
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
            paid_at: None,
        };
        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["appointmentId"], "apt_1");
        assert_eq!(json["carKm"], 25000);
        assert!(json.get("paidAt").is_none());
        assert!(json["items"][0].get("id").is_some());
    }
}
