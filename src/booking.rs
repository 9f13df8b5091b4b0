//! Appointment booking and lifecycle management.

use crate::backend::StorageBackend;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::model::{Appointment, AppointmentStatus, User};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Services offered by the garage. "Other" admits free-text entries beyond
/// the catalog.
pub const SERVICE_CATALOG: [&str; 10] = [
    "Oil Change",
    "Brake Service",
    "Engine Tune-up",
    "Tire Rotation",
    "Battery Check",
    "AC Service",
    "Transmission Service",
    "Wheel Alignment",
    "General Inspection",
    "Other",
];

/// Bookable half-hour slots. Work pauses between 12:30 and 14:00.
pub const TIME_SLOTS: [&str; 17] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30", "18:00",
];

/// Booking input supplied by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingRequest {
    pub car_number: String,
    pub car_model: String,
    /// Odometer reading.
    pub car_km: u32,
    pub appointment_date: NaiveDate,
    /// Must be one of [`TIME_SLOTS`].
    pub appointment_time: String,
    /// Must be non-empty; entries beyond [`SERVICE_CATALOG`] count as
    /// free-text "Other" work.
    pub services: Vec<String>,
    pub notes: Option<String>,
}

/// Appointment creation, listing, and status transitions over the ledger.
#[derive(Clone)]
pub struct BookingService<B: StorageBackend> {
    ledger: Ledger<B>,
}

impl<B: StorageBackend> BookingService<B> {
    /// Create a new booking service over the given ledger.
    pub fn new(ledger: Ledger<B>) -> Self {
        BookingService { ledger }
    }

    /// Create a `pending` appointment for the given user.
    ///
    /// The customer name and phone are denormalized from the profile at
    /// booking time. `now` stamps `created_at`; the appointment date must
    /// fall strictly after `now`'s calendar day.
    ///
    /// # Errors
    ///
    /// `Error::ValidationError` when required fields are missing or
    /// invalid; `Error::BackendError`/`Error::SerializationError` when the
    /// write fails.
    pub async fn create_appointment(
        &self,
        user: &User,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<Appointment> {
        validate_request(&request, now.date_naive())?;

        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            customer_name: user.name.clone(),
            customer_phone: user.phone.clone(),
            car_number: request.car_number.trim().to_string(),
            car_model: request.car_model.trim().to_string(),
            car_km: request.car_km,
            appointment_date: request.appointment_date,
            appointment_time: request.appointment_time,
            services: request.services,
            status: AppointmentStatus::Pending,
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
        };

        let mut appointments = self.ledger.read_all::<Appointment>().await;
        appointments.push(appointment.clone());
        self.ledger.write_all(&appointments).await?;

        info!(
            "✓ Booked appointment {} for {} on {} at {}",
            appointment.id,
            appointment.customer_name,
            appointment.appointment_date,
            appointment.appointment_time
        );
        Ok(appointment)
    }

    /// All appointments, across every user.
    pub async fn appointments(&self) -> Vec<Appointment> {
        self.ledger.read_all().await
    }

    /// Appointments owned by one user.
    pub async fn appointments_for_user(&self, user_id: &str) -> Vec<Appointment> {
        self.appointments()
            .await
            .into_iter()
            .filter(|apt| apt.user_id == user_id)
            .collect()
    }

    /// Appointments currently in the given status (admin list filter).
    pub async fn appointments_with_status(&self, status: AppointmentStatus) -> Vec<Appointment> {
        self.appointments()
            .await
            .into_iter()
            .filter(|apt| apt.status == status)
            .collect()
    }

    /// Look up a single appointment.
    pub async fn find(&self, appointment_id: &str) -> Option<Appointment> {
        self.appointments()
            .await
            .into_iter()
            .find(|apt| apt.id == appointment_id)
    }

    /// Apply a status transition (admin action) and persist it.
    ///
    /// Completion is not reachable this way - it happens only through
    /// [`crate::BillingService::issue_bill`].
    ///
    /// # Errors
    ///
    /// - `Error::NotFound`: no appointment with that id
    /// - `Error::InvalidTransition`: the state machine forbids the move
    pub async fn update_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        if status == AppointmentStatus::Completed {
            // Guard the billing-only transition even for confirmed
            // appointments; admins complete work by issuing a bill.
            return Err(Error::ValidationError(
                "appointments complete through bill issuance".to_string(),
            ));
        }
        transition_status(&self.ledger, appointment_id, status).await
    }
}

/// Read-modify-write a status change into the appointment collection.
///
/// There is no per-record update primitive: the full collection is read,
/// the record replaced, and the collection written back.
pub(crate) async fn transition_status<B: StorageBackend>(
    ledger: &Ledger<B>,
    appointment_id: &str,
    status: AppointmentStatus,
) -> Result<Appointment> {
    let mut appointments = ledger.read_all::<Appointment>().await;
    let appointment = appointments
        .iter_mut()
        .find(|apt| apt.id == appointment_id)
        .ok_or_else(|| Error::NotFound(format!("appointment {}", appointment_id)))?;

    appointment.transition(status)?;
    let updated = appointment.clone();

    ledger.write_all(&appointments).await?;
    info!("✓ Appointment {} is now {}", appointment_id, status);
    Ok(updated)
}

fn validate_request(request: &BookingRequest, today: NaiveDate) -> Result<()> {
    if request.car_number.trim().is_empty() {
        return Err(Error::ValidationError("car number is required".to_string()));
    }
    if request.car_model.trim().is_empty() {
        return Err(Error::ValidationError("car model is required".to_string()));
    }
    if request.appointment_date <= today {
        return Err(Error::ValidationError(
            "appointment date must be after today".to_string(),
        ));
    }
    if !TIME_SLOTS.contains(&request.appointment_time.as_str()) {
        return Err(Error::ValidationError(format!(
            "unknown time slot: {}",
            request.appointment_time
        )));
    }
    if request.services.is_empty() || request.services.iter().any(|s| s.trim().is_empty()) {
        return Err(Error::ValidationError(
            "at least one service must be selected".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::model::Role;
    use chrono::TimeZone;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9000000000".to_string(),
            role: Role::User,
        }
    }

    fn booking_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap()
    }

    fn request() -> BookingRequest {
        BookingRequest {
            car_number: "MH15AB1234".to_string(),
            car_model: "Maruti Swift".to_string(),
            car_km: 25000,
            appointment_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            appointment_time: "10:00".to_string(),
            services: vec!["Oil Change".to_string()],
            notes: None,
        }
    }

    fn service() -> BookingService<InMemoryBackend> {
        BookingService::new(Ledger::new(InMemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_create_appointment_persists_pending() {
        let service = service();
        let appointment = service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");

        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.customer_name, "Asha");
        assert_eq!(appointment.customer_phone, "9000000000");
        assert_eq!(appointment.created_at, booking_now());

        let stored = service.appointments().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, appointment.id);
    }

    #[tokio::test]
    async fn test_create_appointment_rejects_today_and_past() {
        let service = service();

        let mut same_day = request();
        same_day.appointment_date = booking_now().date_naive();
        assert!(service
            .create_appointment(&user(), same_day, booking_now())
            .await
            .is_err());

        let mut past = request();
        past.appointment_date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(service
            .create_appointment(&user(), past, booking_now())
            .await
            .is_err());

        assert!(service.appointments().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_appointment_rejects_unknown_slot() {
        let service = service();
        let mut bad_slot = request();
        bad_slot.appointment_time = "13:00".to_string();

        let err = service
            .create_appointment(&user(), bad_slot, booking_now())
            .await
            .expect_err("13:00 is in the lunch gap");
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_appointment_rejects_empty_services() {
        let service = service();

        let mut none = request();
        none.services.clear();
        assert!(service
            .create_appointment(&user(), none, booking_now())
            .await
            .is_err());

        let mut blank = request();
        blank.services = vec!["  ".to_string()];
        assert!(service
            .create_appointment(&user(), blank, booking_now())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_create_appointment_rejects_missing_car_fields() {
        let service = service();

        let mut no_number = request();
        no_number.car_number = " ".to_string();
        assert!(service
            .create_appointment(&user(), no_number, booking_now())
            .await
            .is_err());

        let mut no_model = request();
        no_model.car_model = String::new();
        assert!(service
            .create_appointment(&user(), no_model, booking_now())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_create_appointment_allows_free_text_service() {
        let service = service();
        let mut other = request();
        other.services = vec!["Other".to_string(), "Underbody rust coat".to_string()];

        let appointment = service
            .create_appointment(&user(), other, booking_now())
            .await
            .expect("free-text services are admitted");
        assert_eq!(appointment.services.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_notes_stored_as_absent() {
        let service = service();
        let mut blank_notes = request();
        blank_notes.notes = Some("   ".to_string());

        let appointment = service
            .create_appointment(&user(), blank_notes, booking_now())
            .await
            .expect("Failed to create appointment");
        assert!(appointment.notes.is_none());
    }

    #[tokio::test]
    async fn test_appointments_for_user_filters_by_owner() {
        let service = service();
        service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");

        let mut other_user = user();
        other_user.id = "u2".to_string();
        service
            .create_appointment(&other_user, request(), booking_now())
            .await
            .expect("Failed to create appointment");

        assert_eq!(service.appointments().await.len(), 2);
        assert_eq!(service.appointments_for_user("u1").await.len(), 1);
        assert_eq!(service.appointments_for_user("u3").await.len(), 0);
    }

    #[tokio::test]
    async fn test_appointments_with_status_filters() {
        let service = service();
        let first = service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");
        service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");

        service
            .update_status(&first.id, AppointmentStatus::Confirmed)
            .await
            .expect("Failed to confirm");

        let pending = service
            .appointments_with_status(AppointmentStatus::Pending)
            .await;
        let confirmed = service
            .appointments_with_status(AppointmentStatus::Confirmed)
            .await;
        assert_eq!(pending.len(), 1);
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, first.id);
    }

    #[tokio::test]
    async fn test_update_status_confirms_pending() {
        let service = service();
        let appointment = service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");

        let updated = service
            .update_status(&appointment.id, AppointmentStatus::Confirmed)
            .await
            .expect("Failed to confirm");
        assert_eq!(updated.status, AppointmentStatus::Confirmed);

        // Change is persisted, observable on re-read
        let found = service.find(&appointment.id).await.expect("must exist");
        assert_eq!(found.status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_update_status_cancels_confirmed() {
        let service = service();
        let appointment = service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");

        service
            .update_status(&appointment.id, AppointmentStatus::Confirmed)
            .await
            .expect("Failed to confirm");
        let cancelled = service
            .update_status(&appointment.id, AppointmentStatus::Cancelled)
            .await
            .expect("Failed to cancel");
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_update_status_rejects_terminal_moves() {
        let service = service();
        let appointment = service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");

        service
            .update_status(&appointment.id, AppointmentStatus::Cancelled)
            .await
            .expect("Failed to cancel");

        let err = service
            .update_status(&appointment.id, AppointmentStatus::Confirmed)
            .await
            .expect_err("cancelled is terminal");
        assert!(matches!(err, Error::InvalidTransition { .. }));

        // Stored status untouched
        let found = service.find(&appointment.id).await.expect("must exist");
        assert_eq!(found.status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_update_status_never_completes_directly() {
        let service = service();
        let appointment = service
            .create_appointment(&user(), request(), booking_now())
            .await
            .expect("Failed to create appointment");
        service
            .update_status(&appointment.id, AppointmentStatus::Confirmed)
            .await
            .expect("Failed to confirm");

        let err = service
            .update_status(&appointment.id, AppointmentStatus::Completed)
            .await
            .expect_err("completion goes through billing");
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let service = service();
        let err = service
            .update_status("ghost", AppointmentStatus::Confirmed)
            .await
            .expect_err("unknown id must fail");
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_catalog_and_slots_shape() {
        assert_eq!(SERVICE_CATALOG.len(), 10);
        assert_eq!(SERVICE_CATALOG[9], "Other");
        assert_eq!(TIME_SLOTS.len(), 17);
        assert!(!TIME_SLOTS.contains(&"13:00"));
    }
}
