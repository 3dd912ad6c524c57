use crate::catalog::SlotTime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub time: SlotTime,
    pub user_name: String,
    pub owner_id: String,
    pub status: AppointmentStatus,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Accepted => "accepted",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Pending and accepted bookings hold their slot; cancelled ones free it.
    pub fn occupies_slot(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending | AppointmentStatus::Accepted
        )
    }
}

/// One catalog slot joined against the current bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub time: SlotTime,
    pub state: SlotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Available,
    Pending,
    Accepted,
}

/// The authenticated caller of a store operation. Issued by the session
/// layer; the store never reads identity from request payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Provider,
}

impl Actor {
    pub fn client(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Role::Client,
        }
    }

    pub fn provider() -> Self {
        Self {
            id: "provider".into(),
            name: "Provider".into(),
            role: Role::Provider,
        }
    }

    pub fn owns(&self, appointment: &Appointment) -> bool {
        self.id == appointment.owner_id
    }
}
