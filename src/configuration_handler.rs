use crate::catalog::{self, SlotTime};
use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(name = "appointment_desk", about = "Slot-based appointment booking service")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Shared key required on provider routes. Leaving it unset opens the
    /// provider routes to everyone (unauthenticated demo mode).
    #[arg(long, env = "PROVIDER_KEY")]
    provider_key: Option<String>,

    /// JSON file holding the appointment collection. Unset keeps the
    /// collection in memory only.
    #[arg(long, env = "STORE_PATH")]
    store_path: Option<PathBuf>,

    /// Bookable time of day, repeatable. Defaults to the published hours.
    #[arg(long = "slot", default_values_t = catalog::default_slots())]
    slots: Vec<SlotTime>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
    }

    fn provider_key(&self) -> Option<String> {
        self.provider_key.clone()
    }

    fn store_path(&self) -> Option<PathBuf> {
        self.store_path.clone()
    }

    fn slot_times(&self) -> Vec<SlotTime> {
        self.slots.clone()
    }
}
