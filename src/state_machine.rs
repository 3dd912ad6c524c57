use crate::error::StoreError;
use crate::types::{Actor, Appointment, AppointmentStatus, Role};

/// Checks whether `actor` may move `appointment` to `requested`.
///
/// Legality of the `(from, to)` pair is decided before the actor is looked
/// at: a pair that is never legal reports `IllegalTransition` regardless of
/// role, a legal pair with the wrong actor reports `Unauthorized`. Callers
/// must not mutate the record when this returns an error.
pub fn authorize_transition(
    appointment: &Appointment,
    requested: AppointmentStatus,
    actor: &Actor,
) -> Result<(), StoreError> {
    use AppointmentStatus::*;
    match (appointment.status, requested) {
        (Pending, Accepted) => require_role(actor, Role::Provider),
        (Pending, Cancelled) => require_owner(appointment, actor),
        _ => Err(StoreError::IllegalTransition),
    }
}

/// Removal doubles as "mark completed" (from accepted) and cleanup of
/// cancelled records; both are provider actions. A pending booking cannot
/// be removed, it has to be cancelled by its owner first.
pub fn authorize_removal(appointment: &Appointment, actor: &Actor) -> Result<(), StoreError> {
    match appointment.status {
        AppointmentStatus::Accepted | AppointmentStatus::Cancelled => {
            require_role(actor, Role::Provider)
        }
        AppointmentStatus::Pending => Err(StoreError::IllegalTransition),
    }
}

fn require_role(actor: &Actor, role: Role) -> Result<(), StoreError> {
    if actor.role == role {
        Ok(())
    } else {
        Err(StoreError::Unauthorized)
    }
}

fn require_owner(appointment: &Appointment, actor: &Actor) -> Result<(), StoreError> {
    if actor.owns(appointment) {
        Ok(())
    } else {
        Err(StoreError::Unauthorized)
    }
}
