use thiserror::Error;

/// Conditions that stop the machine abnormally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("Overflow occurred: {0}")]
    WordOverflow(i64),

    #[error("Address out of bounds: {0}")]
    AddressOutOfBounds(i64),

    #[error("Attempt to divide by zero")]
    DivisionByZero,

    #[error("Invalid operation code: {0:02}")]
    InvalidOpcode(i32),

    #[error("Invalid input: `{0}`")]
    InvalidInput(String),

    #[error("Input closed")]
    InputClosed,

    #[error("Cycle limit reached after {0} instructions")]
    CycleLimit(u64),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Fault {
    fn from(err: std::io::Error) -> Self {
        Fault::Io(err.to_string())
    }
}

/// Failures while setting the emulator up, before the first cycle.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error(transparent)]
    Image(#[from] sml::ImageError),
}
