// Course Registrar - Core Library
// Students, courses, capacity-bounded enrollment with a FIFO waitlist, and
// durable flat-file storage. Exposes all modules for use in the CLI and tests.

pub mod catalog;
pub mod directory;
pub mod models;
pub mod registrar;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use catalog::CourseCatalog;
pub use directory::StudentDirectory;
pub use models::{Course, Student};
pub use registrar::{BlankField, DropOutcome, EnrollOutcome, Registrar};
pub use storage::{
    apply_links, CsvStorage, EnrollmentLink, LinkStatus, MemoryStorage, Storage,
};
pub use validation::{ValidationError, MAX_CAPACITY, MIN_CAPACITY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
