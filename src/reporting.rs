//! Reporting engine: calendar-month aggregates and the trailing revenue
//! series.
//!
//! Purely functional over its inputs - no stored state of its own. Months
//! are calendar months (1-12), never rolling 30-day windows. Bills bucket
//! by the calendar date of `created_at`; appointments by their
//! `appointment_date`.

use crate::model::{
    Appointment, AppointmentStatus, Bill, MonthlyAggregate, RevenuePoint, WorkshopOverview,
};
use chrono::Datelike;
use rust_decimal::Decimal;

/// Full month names, indexed by month number minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full name for a 1-based month number; empty for out-of-range input.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Abbreviated 3-letter label for a 1-based month number.
pub fn month_label(month: u32) -> String {
    month_name(month).chars().take(3).collect()
}

/// Bills created in the given calendar month.
pub fn bills_in_month(bills: &[Bill], month: u32, year: i32) -> Vec<Bill> {
    bills
        .iter()
        .filter(|bill| {
            let date = bill.created_at.date_naive();
            date.month() == month && date.year() == year
        })
        .cloned()
        .collect()
}

/// Appointments scheduled in the given calendar month.
pub fn appointments_in_month(
    appointments: &[Appointment],
    month: u32,
    year: i32,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|apt| {
            apt.appointment_date.month() == month && apt.appointment_date.year() == year
        })
        .cloned()
        .collect()
}

/// All-time headline figures: appointment counts by status plus lifetime
/// revenue. Drives the admin dashboard cards; unlike the monthly views this
/// spans everything ever stored.
pub fn overview(bills: &[Bill], appointments: &[Appointment]) -> WorkshopOverview {
    WorkshopOverview {
        total_appointments: appointments.len(),
        pending_appointments: appointments
            .iter()
            .filter(|apt| apt.status == AppointmentStatus::Pending)
            .count(),
        completed_appointments: appointments
            .iter()
            .filter(|apt| apt.status == AppointmentStatus::Completed)
            .count(),
        total_revenue: bills.iter().map(|bill| bill.total).sum(),
    }
}

/// Summarize one calendar month: revenue, bill count, average bill, and
/// appointment counts by status.
///
/// A month with no bills reports an average of zero - never a division
/// error. Revenue accumulates unrounded.
pub fn monthly_aggregate(
    bills: &[Bill],
    appointments: &[Appointment],
    month: u32,
    year: i32,
) -> MonthlyAggregate {
    let monthly_bills = bills_in_month(bills, month, year);
    let monthly_appointments = appointments_in_month(appointments, month, year);

    let revenue: Decimal = monthly_bills.iter().map(|bill| bill.total).sum();
    let bill_count = monthly_bills.len();
    let average_bill = if bill_count == 0 {
        Decimal::ZERO
    } else {
        revenue / Decimal::from(bill_count as u64)
    };

    MonthlyAggregate {
        month: month_name(month).to_string(),
        year,
        revenue,
        bill_count,
        average_bill,
        appointment_count: monthly_appointments.len(),
        completed_appointments: monthly_appointments
            .iter()
            .filter(|apt| apt.status == AppointmentStatus::Completed)
            .count(),
        pending_appointments: monthly_appointments
            .iter()
            .filter(|apt| apt.status == AppointmentStatus::Pending)
            .count(),
    }
}

/// Produce exactly `n` month-over-month points for the consecutive calendar
/// months ending at (and including) the given current month, oldest first.
///
/// Each point carries the month's revenue and appointment count, computed
/// via [`monthly_aggregate`]. Sparse data still yields `n` points; empty
/// months report zero.
pub fn trailing_series(
    bills: &[Bill],
    appointments: &[Appointment],
    now_month: u32,
    now_year: i32,
    n: usize,
) -> Vec<RevenuePoint> {
    let mut slots = Vec::with_capacity(n);
    let (mut month, mut year) = (now_month, now_year);
    for _ in 0..n {
        slots.push((month, year));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    slots.reverse();

    slots
        .into_iter()
        .map(|(month, year)| {
            let aggregate = monthly_aggregate(bills, appointments, month, year);
            RevenuePoint {
                month_label: month_label(month),
                year,
                revenue: aggregate.revenue,
                appointment_count: aggregate.appointment_count,
            }
        })
        .collect()
}
