//! Billing engine: line-item editing, totals, and bill finalization.
//!
//! The arithmetic lives in free functions over `Vec<BillItem>` so it can be
//! exercised without any storage. [`BillingService`] layers persistence on
//! top: it appends finalized bills to the `bills` collection and drives the
//! `confirmed -> completed` appointment transition after a successful save.
//!
//! Monetary values are exact decimals and accumulate unrounded; rounding to
//! 2 fraction digits happens at render time only.

use crate::backend::StorageBackend;
use crate::booking;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::model::{Appointment, AppointmentStatus, Bill, BillItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// GST rate applied to every bill. Fixed, not configurable.
pub const TAX_RATE: Decimal = dec!(0.18);

/// A field update for a single line item.
///
/// Quantity and price updates recompute the item's derived total in the
/// same operation; a name update never touches it.
#[derive(Clone, Debug, PartialEq)]
pub enum LineItemUpdate {
    Name(String),
    Quantity(u32),
    Price(Decimal),
}

/// Computed totals over a list of line items.
#[derive(Clone, Debug, PartialEq)]
pub struct BillTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Append a fresh zero-valued item (quantity 1, price 0, total 0).
///
/// Returns the new item's id.
pub fn add_line_item(items: &mut Vec<BillItem>) -> String {
    let item = BillItem::new();
    let id = item.id.clone();
    items.push(item);
    id
}

/// Remove the item with the given id.
///
/// Returns whether an item was removed. Keeping at least one row on screen
/// is the caller's concern; the engine removes whatever it is asked to.
pub fn remove_line_item(items: &mut Vec<BillItem>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id != id);
    items.len() != before
}

/// Apply a field update to the item with the given id.
///
/// Quantity and price updates recompute `total = quantity × price` before
/// returning, so the derived value is never left stale. Returns whether a
/// matching item was found.
pub fn update_line_item(items: &mut [BillItem], id: &str, update: LineItemUpdate) -> bool {
    let Some(item) = items.iter_mut().find(|item| item.id == id) else {
        return false;
    };

    match update {
        LineItemUpdate::Name(name) => {
            item.name = name;
        }
        LineItemUpdate::Quantity(quantity) => {
            item.quantity = quantity;
            item.recompute_total();
        }
        LineItemUpdate::Price(price) => {
            item.price = price;
            item.recompute_total();
        }
    }
    true
}

/// Parse a free-text quantity field, failing safe to 0.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse a free-text price field, failing safe to 0.
pub fn parse_price(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or(Decimal::ZERO)
}

/// Compute subtotal, tax, and grand total over the given items.
///
/// `subtotal` is the sum of every item's derived total, `tax` is
/// `subtotal × 0.18`, `total` is their sum. No rounding happens here.
pub fn compute_totals(items: &[BillItem]) -> BillTotals {
    let subtotal: Decimal = items.iter().map(|item| item.total).sum();
    let tax = subtotal * TAX_RATE;
    BillTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Assemble a finalized [`Bill`] from an appointment and its line items.
///
/// Items with an empty name or non-positive price are dropped - a line is
/// only billable with a name and a positive price. Totals are computed over
/// the retained items; an empty result is still a valid, persistable bill
/// with all-zero totals.
///
/// This is pure construction: it neither persists the bill nor transitions
/// the appointment. [`BillingService::issue_bill`] does both.
pub fn finalize_bill(appointment: &Appointment, items: &[BillItem], now: DateTime<Utc>) -> Bill {
    let items: Vec<BillItem> = items
        .iter()
        .filter(|item| item.is_billable())
        .cloned()
        .collect();
    let totals = compute_totals(&items);

    Bill {
        id: Uuid::new_v4().to_string(),
        appointment_id: appointment.id.clone(),
        customer_name: appointment.customer_name.clone(),
        customer_phone: appointment.customer_phone.clone(),
        car_number: appointment.car_number.clone(),
        car_km: appointment.car_km,
        items,
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        created_at: now,
        paid_at: None,
    }
}

/// Bill persistence and the billing side of the appointment lifecycle.
#[derive(Clone)]
pub struct BillingService<B: StorageBackend> {
    ledger: Ledger<B>,
}

impl<B: StorageBackend> BillingService<B> {
    /// Create a new billing service over the given ledger.
    pub fn new(ledger: Ledger<B>) -> Self {
        BillingService { ledger }
    }

    /// All stored bills, in creation order.
    pub async fn bills(&self) -> Vec<Bill> {
        self.ledger.read_all().await
    }

    /// The bill issued for an appointment, if any.
    ///
    /// An appointment owns at most one bill.
    pub async fn bill_for_appointment(&self, appointment_id: &str) -> Option<Bill> {
        self.bills()
            .await
            .into_iter()
            .find(|bill| bill.appointment_id == appointment_id)
    }

    /// Finalize and persist a bill for a confirmed appointment, then move
    /// the appointment to `completed`.
    ///
    /// The bill is saved before the status changes; if the appointment is
    /// not `confirmed`, nothing is stored.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound`: no appointment with that id
    /// - `Error::InvalidTransition`: appointment is not `confirmed`
    /// - `Error::BackendError` / `Error::SerializationError`: save failed
    pub async fn issue_bill(
        &self,
        appointment_id: &str,
        items: &[BillItem],
        now: DateTime<Utc>,
    ) -> Result<(Bill, Appointment)> {
        let appointments = self.ledger.read_all::<Appointment>().await;
        let appointment = appointments
            .iter()
            .find(|apt| apt.id == appointment_id)
            .ok_or_else(|| Error::NotFound(format!("appointment {}", appointment_id)))?;

        if appointment.status != AppointmentStatus::Confirmed {
            return Err(Error::InvalidTransition {
                from: appointment.status,
                to: AppointmentStatus::Completed,
            });
        }

        let bill = finalize_bill(appointment, items, now);

        let mut bills = self.ledger.read_all::<Bill>().await;
        bills.push(bill.clone());
        self.ledger.write_all(&bills).await?;

        // Completion is the consequence of the saved bill, never the other
        // way around.
        let updated =
            booking::transition_status(&self.ledger, appointment_id, AppointmentStatus::Completed)
                .await?;

        info!(
            "✓ Issued bill {} ({} items, total {}) for appointment {}",
            bill.short_number(),
            bill.items.len(),
            bill.total,
            appointment_id
        );
        Ok((bill, updated))
    }
}
