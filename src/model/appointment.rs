//! Appointments and their status state machine.

use crate::entity::LedgerEntity;
use crate::error::{Error, Result};
use crate::ledger::collections;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an appointment.
///
/// Transitions: `Pending -> {Confirmed, Cancelled}`,
/// `Confirmed -> {Completed, Cancelled}`. `Completed` and `Cancelled` are
/// terminal - no transition leaves them. The `Confirmed -> Completed`
/// transition happens only as the result of a successful bill issuance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Created by a customer booking, awaiting admin review.
    Pending,
    /// Accepted by the garage; work may proceed.
    Confirmed,
    /// Work done and billed. Terminal.
    Completed,
    /// Called off by the garage. Terminal.
    Cancelled,
}

impl AppointmentStatus {
    /// True for statuses no transition leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Whether the state machine permits moving from `self` to `to`.
    pub fn can_transition(&self, to: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (*self, to),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A booked service appointment.
///
/// Customer name and phone are denormalized copies taken at booking time;
/// they do not track later profile edits. Once a terminal status is
/// reached the record is immutable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub user_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub car_number: String,
    pub car_model: String,
    /// Odometer reading at booking time.
    pub car_km: u32,
    pub appointment_date: NaiveDate,
    /// One of [`crate::booking::TIME_SLOTS`].
    pub appointment_time: String,
    pub services: Vec<String>,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Apply a status transition in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTransition` when the state machine forbids
    /// the move; the record is left unchanged.
    pub fn transition(&mut self, to: AppointmentStatus) -> Result<()> {
        if !self.status.can_transition(to) {
            return Err(Error::InvalidTransition {
                from: self.status,
                to,
            });
        }
        debug!("Appointment {} status: {} -> {}", self.id, self.status, to);
        self.status = to;
        Ok(())
    }
}

impl LedgerEntity for Appointment {
    const COLLECTION: &'static str = collections::APPOINTMENTS;

    fn record_id(&self) -> &str {
        &self.id
    }
}
