pub mod enums;
pub mod error;
pub mod filter;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::Board;
pub use error::ValidationError;
pub use filter::SchoolFilter;
pub use structs::{NewSchool, SchoolRecord, SchoolSubmission};
