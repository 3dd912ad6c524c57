use crate::error::StoreError;
use crate::types::Appointment;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::warn;

/// Backing store for the appointment collection. Read and replace only;
/// the store serializes access, so implementations see one caller at a time.
pub trait StorageMedium: Send + 'static {
    fn read(&mut self) -> Result<Vec<Appointment>, StoreError>;
    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StoreError>;
}

/// Volatile in-process medium. Appointments are gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    appointments: Vec<Appointment>,
}

impl StorageMedium for MemoryMedium {
    fn read(&mut self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.clone())
    }

    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StoreError> {
        self.appointments = appointments.to_vec();
        Ok(())
    }
}

/// Medium persisting the collection as one JSON document on disk. Writes go
/// through a temp file in the same directory and replace the target in one
/// rename, so a crash mid-write leaves the previous document intact.
#[derive(Debug)]
pub struct JsonFileMedium {
    path: PathBuf,
}

impl JsonFileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageMedium for JsonFileMedium {
    fn read(&mut self) -> Result<Vec<Appointment>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|err| StoreError::TransientIo(err.to_string()))?;
        serde_json::from_str(&contents).map_err(|err| {
            warn!(path = %self.path.display(), %err, "appointment file is unreadable");
            StoreError::TransientIo(err.to_string())
        })
    }

    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StoreError> {
        let transient = |err: &dyn std::fmt::Display| StoreError::TransientIo(err.to_string());

        let directory = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut file = match directory {
            Some(directory) => NamedTempFile::new_in(directory),
            None => NamedTempFile::new(),
        }
        .map_err(|err| transient(&err))?;

        let contents =
            serde_json::to_vec_pretty(appointments).map_err(|err| transient(&err))?;
        file.write_all(&contents).map_err(|err| transient(&err))?;
        file.persist(&self.path).map_err(|err| transient(&err))?;
        Ok(())
    }
}
