use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use uuid::Uuid;

const STORE_DIR: &str = ".slotwise";
const APPOINTMENTS_FILE: &str = "appointments.json";
// Maximum allowed size for the store file to prevent DoS attacks (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ITEMS: usize = 10_000;

/// A booked meeting as persisted by the store.
///
/// `date` is an ISO `YYYY-MM-DD` string and `time` a 24-hour `HH:MM` string;
/// both are validated at the API boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
}

/// Fields supplied by callers when creating or replacing an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Appointment not found: {0}")]
    NotFound(String),
    #[error("Could not find home directory")]
    NoHomeDir,
    #[error("Store file size exceeds security limits")]
    FileTooLarge,
    #[error("Too many appointments in store (maximum {MAX_ITEMS})")]
    TooManyItems,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid store data: {0}")]
    Data(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// JSON-file-backed appointment collection.
///
/// The store is the only durable state in the system; everything the
/// scheduling engine computes is derived per request and discarded.
pub struct AppointmentStore {
    path: PathBuf,
}

impl AppointmentStore {
    pub fn new() -> StoreResult<Self> {
        let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        let mut state_dir = home_dir;
        state_dir.push(STORE_DIR);
        std::fs::create_dir_all(&state_dir)?;
        Ok(Self { path: state_dir.join(APPOINTMENTS_FILE) })
    }

    /// Open a store at an explicit file path. Used by tests.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// All appointments, sorted by date then start time.
    pub fn list(&self) -> StoreResult<Vec<Appointment>> {
        let mut items = self.load()?;
        items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
        Ok(items)
    }

    /// Appointments on a single date, the conflict detector's working set.
    pub fn for_date(&self, date: &str) -> StoreResult<Vec<Appointment>> {
        let mut items = self.load()?;
        items.retain(|apt| apt.date == date);
        items.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(items)
    }

    pub fn get(&self, id: &str) -> StoreResult<Appointment> {
        self.load()?
            .into_iter()
            .find(|apt| apt.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn add(&self, draft: AppointmentDraft) -> StoreResult<Appointment> {
        let mut items = self.load()?;
        if items.len() >= MAX_ITEMS {
            return Err(StoreError::TooManyItems);
        }
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            date: draft.date,
            time: draft.time,
            duration: draft.duration,
            attendees: draft.attendees,
            description: draft.description,
            created_at: Utc::now().to_rfc3339(),
        };
        debug!("Storing appointment {} on {}", appointment.id, appointment.date);
        items.push(appointment.clone());
        self.save(&items)?;
        Ok(appointment)
    }

    pub fn update(&self, id: &str, draft: AppointmentDraft) -> StoreResult<Appointment> {
        let mut items = self.load()?;
        let slot = items
            .iter_mut()
            .find(|apt| apt.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        slot.title = draft.title;
        slot.date = draft.date;
        slot.time = draft.time;
        slot.duration = draft.duration;
        slot.attendees = draft.attendees;
        slot.description = draft.description;
        let updated = slot.clone();
        self.save(&items)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> StoreResult<Appointment> {
        let mut items = self.load()?;
        let position = items
            .iter()
            .position(|apt| apt.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = items.remove(position);
        self.save(&items)?;
        Ok(removed)
    }

    fn load(&self) -> StoreResult<Vec<Appointment>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        // Check file size before loading to prevent DoS attacks
        let metadata = std::fs::metadata(&self.path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(StoreError::FileTooLarge);
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;

        if let Some(array) = json_value.as_array() {
            if array.len() > MAX_ITEMS {
                return Err(StoreError::TooManyItems);
            }
        }

        let items: Vec<Appointment> = serde_json::from_value(json_value)?;
        Ok(items)
    }

    fn save(&self, items: &[Appointment]) -> StoreResult<()> {
        let file =
            OpenOptions::new().write(true).create(true).truncate(true).open(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, items)?;
        Ok(())
    }
}
