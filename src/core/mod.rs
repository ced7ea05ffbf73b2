pub mod codec;
pub mod persistence;
pub mod registry;
pub mod repository;

pub use crate::domain::model::{Course, Instructor, PersonDetails, RecordKind, Student};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
