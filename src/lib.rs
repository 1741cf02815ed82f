pub mod agent;
pub mod api_server;
pub mod availability;
pub mod config;
pub mod conflict;
pub mod parser;
pub mod stats;
pub mod store;
pub mod time_utils;
pub mod validation;
pub mod workload;

pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Re-export commonly used types
pub use availability::{AvailableSlot, ScanWindow};
pub use config::Config;
pub use conflict::{ConflictResult, ConflictSeverity, ConflictType};
pub use parser::ParsedRequest;
pub use store::{Appointment, AppointmentDraft, AppointmentStore};
pub use validation::TimingReport;
