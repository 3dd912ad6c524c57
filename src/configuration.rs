use crate::catalog::SlotTime;
use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> u16;
    fn provider_key(&self) -> Option<String>;
    fn store_path(&self) -> Option<PathBuf>;
    fn slot_times(&self) -> Vec<SlotTime>;
}
