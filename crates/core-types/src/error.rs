use thiserror::Error;

/// A submission that cannot be persisted. The `Display` text is what the
/// caller sees, so every message names the problem in plain words.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All required fields must be filled: {0} is missing")]
    MissingField(&'static str),

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid contact number")]
    InvalidContact,

    #[error("Invalid image path")]
    InvalidImage(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Image exceeds the maximum allowed size of {max} bytes")]
    ImageTooLarge { max: usize },
}
