//! # garage-kit
//!
//! A type-safe workshop management core for vehicle-service garages.
//!
//! ## Features
//!
//! - **Entity Model:** Users, appointments, bills, and derived monthly reports
//! - **Backend Agnostic:** Ledger collections over in-memory, JSON-file, or custom storage
//! - **Exact Money:** Decimal arithmetic for line items, tax, and totals
//! - **Billing Engine:** Line-item editing, totals, and bill finalization
//! - **Reporting Engine:** Calendar-month aggregates and trailing revenue series
//! - **Document Rendering:** Printable bill and report PDFs (feature `pdf`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use garage_kit::{
//!     AuthService, BillingService, BookingService, Ledger,
//!     backend::InMemoryBackend,
//!     booking::BookingRequest,
//! };
//! use chrono::Utc;
//!
//! // 1. Create a ledger over a backend
//! let ledger = Ledger::new(InMemoryBackend::new());
//!
//! // 2. Wire up the services - all are Clone for easy sharing
//! let auth = AuthService::new(ledger.clone());
//! auth.seed_admin().await?;
//! let bookings = BookingService::new(ledger.clone());
//! let billing = BillingService::new(ledger.clone());
//!
//! // 3. Register, book, confirm, bill
//! let user = auth.register(new_user).await?.expect("email free");
//! let appointment = bookings.create_appointment(&user, request, Utc::now()).await?;
//! ```
//!
//! All state lives in the [`Ledger`]'s named collections (`users`,
//! `appointments`, `bills`, `currentUser`), each stored as one JSON blob.
//! Mutating operations read the full collection, replace the record, and
//! write the collection back; callers re-read after every mutation.

#[macro_use]
extern crate log;

pub mod auth;
pub mod backend;
pub mod billing;
pub mod booking;
pub mod config;
pub mod entity;
pub mod error;
pub mod ledger;
pub mod model;
#[cfg(feature = "pdf")]
pub mod render;
pub mod reporting;
pub mod serialization;

// Re-exports for convenience
pub use auth::{AuthService, NewUser};
pub use backend::StorageBackend;
pub use billing::{BillTotals, BillingService, LineItemUpdate};
pub use booking::{BookingRequest, BookingService};
pub use config::GarageProfile;
pub use entity::LedgerEntity;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use model::{
    Appointment, AppointmentStatus, Bill, BillItem, MonthlyAggregate, RevenuePoint, Role, User,
    UserAccount, WorkshopOverview,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
