use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown {kind} algorithm: {name}")]
    UnknownAlgorithm { kind: &'static str, name: String },

    #[error("search target is required")]
    EmptyTarget,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("student not found: {0}")]
    NotFound(u64),

    #[error("student number already exists: {0}")]
    DuplicateStudentNumber(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("student number must contain only digits: {0:?}")]
    InvalidStudentNumber(String),

    #[error("name must contain only letters, spaces, or dots: {0:?}")]
    InvalidName(String),

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("gpa must be between 0.00 and 4.00, got {0}")]
    GpaOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
