use crate::{
    catalog::SlotCatalog,
    configuration::Configuration,
    configuration_handler::ConfigurationHandler,
    http::create_app,
    medium::{JsonFileMedium, MemoryMedium},
    store::AppointmentStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend;
mod catalog;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod medium;
mod projector;
mod state_machine;
mod store;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
pub struct AppState<T> {
    pub backend: T,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("####################");
    println!("# Appointment Desk #");
    println!("####################");

    let configuration = ConfigurationHandler::parse_arguments();
    let catalog = SlotCatalog::new(configuration.slot_times());
    info!(slots = catalog.slots().len(), "slot catalog loaded");

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(path) = configuration.store_path() {
        info!(path = %path.display(), "persisting appointments to disk");
        let store = AppointmentStore::new(catalog, JsonFileMedium::new(path));
        create_app(store, configuration)
    } else {
        info!("running with an in-memory appointment collection");
        let store = AppointmentStore::new(catalog, MemoryMedium::default());
        create_app(store, configuration)
    };

    axum::serve(listener, app).await.unwrap();
}
