use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bookable time of day in `HH:MM` form. Validated on construction,
/// compared and serialized as the plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(String);

#[derive(Debug, thiserror::Error)]
#[error("invalid slot time {0:?}, expected HH:MM")]
pub struct SlotTimeError(String);

impl SlotTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SlotTime {
    type Err = SlotTimeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotTimeError(raw.to_string());
        let (hours, minutes) = raw.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2
            || minutes.len() != 2
            || !hours.chars().all(|c| c.is_ascii_digit())
            || !minutes.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let h: u8 = hours.parse().map_err(|_| invalid())?;
        let m: u8 = minutes.parse().map_err(|_| invalid())?;
        if h > 23 || m > 59 {
            return Err(invalid());
        }
        Ok(Self(raw.to_string()))
    }
}

impl TryFrom<String> for SlotTime {
    type Error = SlotTimeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<SlotTime> for String {
    fn from(time: SlotTime) -> Self {
        time.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The static set of bookable slots. Catalog order is display order.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    slots: Vec<SlotTime>,
}

impl SlotCatalog {
    pub fn new(slots: Vec<SlotTime>) -> Self {
        let mut deduped: Vec<SlotTime> = Vec::with_capacity(slots.len());
        for slot in slots {
            if !deduped.contains(&slot) {
                deduped.push(slot);
            }
        }
        Self { slots: deduped }
    }

    pub fn default_hours() -> Self {
        Self::new(default_slots())
    }

    pub fn slots(&self) -> &[SlotTime] {
        &self.slots
    }

    /// Maps a raw request string onto a catalog slot, if it names one.
    pub fn resolve(&self, raw: &str) -> Option<SlotTime> {
        self.slots.iter().find(|slot| slot.as_str() == raw).cloned()
    }
}

pub fn default_slots() -> Vec<SlotTime> {
    ["09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00"]
        .iter()
        .map(|raw| raw.parse().unwrap())
        .collect()
}
