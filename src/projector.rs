use crate::catalog::SlotCatalog;
use crate::types::{Appointment, AppointmentStatus, SlotState, SlotView};

/// Joins the catalog against the current bookings. Pure: no clock, no IO,
/// and the appointment order does not influence the result. An accepted
/// booking wins over a pending one for the same slot; cancelled bookings
/// never occupy anything.
pub fn project(catalog: &SlotCatalog, appointments: &[Appointment]) -> Vec<SlotView> {
    catalog
        .slots()
        .iter()
        .map(|slot| {
            let mut state = SlotState::Available;
            for appointment in appointments.iter().filter(|a| a.time == *slot) {
                match appointment.status {
                    AppointmentStatus::Accepted => {
                        state = SlotState::Accepted;
                        break;
                    }
                    AppointmentStatus::Pending => state = SlotState::Pending,
                    AppointmentStatus::Cancelled => {}
                }
            }
            SlotView {
                time: slot.clone(),
                state,
            }
        })
        .collect()
}
