//! Shared record shapes and their invariants.
//!
//! All entities are plain data: no object identity beyond the `id` field,
//! no back-references. Serialized field names follow the stored JSON layout
//! (`userId`, `carNumber`, `createdAt`, ...).

pub mod appointment;
pub mod bill;
pub mod report;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use bill::{Bill, BillItem};
pub use report::{MonthlyAggregate, RevenuePoint, WorkshopOverview};
pub use user::{Role, User, UserAccount};
