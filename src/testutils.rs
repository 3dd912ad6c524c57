use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::Utc;
use uuid::Uuid;

use crate::backend::BookingBackend;
use crate::error::StoreError;
use crate::medium::StorageMedium;
use crate::types::{Actor, Appointment, AppointmentStatus, SlotView};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub calls_to_create: AtomicU64,
    pub calls_to_list: AtomicU64,
    pub calls_to_list_for: AtomicU64,
    pub calls_to_set_status: AtomicU64,
    pub calls_to_remove: AtomicU64,
    pub calls_to_slot_views: AtomicU64,
    pub appointments: Mutex<Vec<Appointment>>,
    pub slot_views: Mutex<Vec<SlotView>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_create: AtomicU64::default(),
            calls_to_list: AtomicU64::default(),
            calls_to_list_for: AtomicU64::default(),
            calls_to_set_status: AtomicU64::default(),
            calls_to_remove: AtomicU64::default(),
            calls_to_slot_views: AtomicU64::default(),
            appointments: Mutex::default(),
            slot_views: Mutex::default(),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }

    fn result(&self) -> Result<(), StoreError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StoreError::TransientIo("supposed to fail".into())),
        }
    }

    fn example_appointment(actor: &Actor, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            time: "09:00".parse().unwrap(),
            user_name: actor.name.clone(),
            owner_id: actor.id.clone(),
            status,
            booked_at: Utc::now(),
        }
    }
}

impl BookingBackend for MockBookingBackend {
    fn create(&self, time: &str, actor: &Actor) -> Result<Appointment, StoreError> {
        self.0.calls_to_create.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut appointment = Self::example_appointment(actor, AppointmentStatus::Pending);
        if let Ok(slot) = time.parse() {
            appointment.time = slot;
        }
        Ok(appointment)
    }

    fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.0.calls_to_list.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.appointments.lock().unwrap().clone())
    }

    fn list_for(&self, actor: &Actor) -> Result<Vec<Appointment>, StoreError> {
        self.0.calls_to_list_for.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut appointments = self.0.appointments.lock().unwrap().clone();
        appointments.retain(|appointment| actor.owns(appointment));
        Ok(appointments)
    }

    fn set_status(
        &self,
        _id: Uuid,
        new_status: AppointmentStatus,
        actor: &Actor,
    ) -> Result<Appointment, StoreError> {
        self.0.calls_to_set_status.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(Self::example_appointment(actor, new_status))
    }

    fn remove(&self, _id: Uuid, _actor: &Actor) -> Result<(), StoreError> {
        self.0.calls_to_remove.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    fn slot_views(&self) -> Result<Vec<SlotView>, StoreError> {
        self.0.calls_to_slot_views.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.slot_views.lock().unwrap().clone())
    }
}

/// Medium whose reads work but whose writes always fail, for checking that
/// mutations surface `TransientIo` without leaving half-applied state.
#[derive(Debug, Default)]
pub struct WriteFailingMedium {
    appointments: Vec<Appointment>,
}

impl StorageMedium for WriteFailingMedium {
    fn read(&mut self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.clone())
    }

    fn write_all(&mut self, _appointments: &[Appointment]) -> Result<(), StoreError> {
        Err(StoreError::TransientIo("write rejected".into()))
    }
}
