//! Derived report shapes.
//!
//! Computed on demand from bills and appointments; never persisted.

use rust_decimal::Decimal;
use serde::Serialize;

/// Revenue and booking summary for a single calendar month.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    /// Full month name ("January" ... "December").
    pub month: String,
    pub year: i32,
    /// Sum of the month's bill totals, unrounded.
    pub revenue: Decimal,
    pub bill_count: usize,
    /// Zero when the month has no bills - never a division error.
    pub average_bill: Decimal,
    pub appointment_count: usize,
    pub completed_appointments: usize,
    pub pending_appointments: usize,
}

/// All-time headline figures for the admin dashboard cards.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopOverview {
    pub total_appointments: usize,
    pub pending_appointments: usize,
    pub completed_appointments: usize,
    /// Sum of every stored bill's total, unrounded.
    pub total_revenue: Decimal,
}

/// One point of the trailing month-over-month series driving the trend
/// display.
///
/// The consumer computes the series-wide maximum revenue itself to scale
/// proportional bars; no normalization happens here.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Abbreviated month label ("Jan" ... "Dec").
    pub month_label: String,
    pub year: i32,
    pub revenue: Decimal,
    pub appointment_count: usize,
}
