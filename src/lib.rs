pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::FileStorage;
pub use config::RegistryConfig;
pub use crate::core::persistence::{FlatLoad, PersistenceGateway};
pub use crate::core::registry::{LoadReport, RecordSummary, Registry};
pub use domain::model::{Course, Instructor, PersonDetails, RecordKind, Student};
pub use utils::error::{RegistryError, Result, ValidationError};
