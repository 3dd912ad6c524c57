use crate::backend::BookingBackend;
use crate::catalog::SlotCatalog;
use crate::error::StoreError;
use crate::medium::StorageMedium;
use crate::projector;
use crate::state_machine;
use crate::types::{Actor, Appointment, AppointmentStatus, SlotView};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// Owns the appointment collection. All mutations are one serialized
/// read-modify-write against the medium: the lock is held from the read
/// through the write, so the slot-occupancy check in `create` cannot race
/// a concurrent booking. A failed write leaves the persisted collection as
/// it was.
pub struct AppointmentStore<M> {
    catalog: SlotCatalog,
    medium: Arc<Mutex<M>>,
}

impl<M> Clone for AppointmentStore<M> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            medium: self.medium.clone(),
        }
    }
}

impl<M: StorageMedium> AppointmentStore<M> {
    pub fn new(catalog: SlotCatalog, medium: M) -> Self {
        Self {
            catalog,
            medium: Arc::new(Mutex::new(medium)),
        }
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }
}

impl<M: StorageMedium> BookingBackend for AppointmentStore<M> {
    fn create(&self, time: &str, actor: &Actor) -> Result<Appointment, StoreError> {
        let slot = self
            .catalog
            .resolve(time)
            .ok_or_else(|| StoreError::NotFound(format!("no slot at {time}")))?;

        let mut medium = self.medium.lock().unwrap();
        let mut appointments = medium.read()?;
        if appointments
            .iter()
            .any(|a| a.time == slot && a.status.occupies_slot())
        {
            return Err(StoreError::SlotUnavailable);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            time: slot,
            user_name: actor.name.clone(),
            owner_id: actor.id.clone(),
            status: AppointmentStatus::Pending,
            booked_at: Utc::now(),
        };
        appointments.push(appointment.clone());
        medium.write_all(&appointments)?;

        info!(id = %appointment.id, time = %appointment.time, "appointment requested");
        Ok(appointment)
    }

    fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.medium.lock().unwrap().read()
    }

    fn list_for(&self, actor: &Actor) -> Result<Vec<Appointment>, StoreError> {
        let mut appointments = self.medium.lock().unwrap().read()?;
        appointments.retain(|appointment| actor.owns(appointment));
        Ok(appointments)
    }

    fn set_status(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
        actor: &Actor,
    ) -> Result<Appointment, StoreError> {
        let mut medium = self.medium.lock().unwrap();
        let mut appointments = medium.read()?;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("no appointment {id}")))?;

        state_machine::authorize_transition(appointment, new_status, actor)?;
        appointment.status = new_status;
        let updated = appointment.clone();
        medium.write_all(&appointments)?;

        info!(id = %updated.id, status = updated.status.as_str(), "appointment status changed");
        Ok(updated)
    }

    fn remove(&self, id: Uuid, actor: &Actor) -> Result<(), StoreError> {
        let mut medium = self.medium.lock().unwrap();
        let mut appointments = medium.read()?;
        let position = appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("no appointment {id}")))?;

        state_machine::authorize_removal(&appointments[position], actor)?;
        let removed = appointments.remove(position);
        medium.write_all(&appointments)?;

        info!(id = %removed.id, status = removed.status.as_str(), "appointment removed");
        Ok(())
    }

    fn slot_views(&self) -> Result<Vec<SlotView>, StoreError> {
        let appointments = self.list()?;
        Ok(projector::project(&self.catalog, &appointments))
    }
}
