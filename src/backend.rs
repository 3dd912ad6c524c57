use crate::error::StoreError;
use crate::types::{Actor, Appointment, AppointmentStatus, SlotView};
use uuid::Uuid;

/// The seam between the HTTP layer and the appointment store. Every call
/// carries the authenticated actor; identity never travels in payloads.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    /// Books `time` for the actor. The new appointment starts out pending.
    fn create(&self, time: &str, actor: &Actor) -> Result<Appointment, StoreError>;

    /// The whole collection, any status. Feeds the provider queue.
    fn list(&self) -> Result<Vec<Appointment>, StoreError>;

    /// The actor's own appointments, any status.
    fn list_for(&self, actor: &Actor) -> Result<Vec<Appointment>, StoreError>;

    fn set_status(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
        actor: &Actor,
    ) -> Result<Appointment, StoreError>;

    /// Deletes a record outright. Completion and cleanup both end here.
    fn remove(&self, id: Uuid, actor: &Actor) -> Result<(), StoreError>;

    /// The public slot grid: catalog joined against current bookings.
    fn slot_views(&self) -> Result<Vec<SlotView>, StoreError>;
}
