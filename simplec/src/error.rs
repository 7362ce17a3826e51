use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Missing line number")]
    MissingLineNumber,

    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    #[error("Invalid operator: `{0}`")]
    InvalidOperator(String),

    #[error("Unbalanced parenthesis in `{0}`")]
    UnbalancedParen(String),

    #[error("Constant out of range: {0}")]
    ConstantOutOfRange(String),

    #[error("Re-defined line number: {0}")]
    DuplicateLine(i32),

    #[error("Undefined line number: {0}")]
    UnresolvedLabel(i32),

    #[error("Program does not fit in memory")]
    MemoryExhausted,

    #[error("Unreachable statement after `end` is ignored")]
    AfterEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
}

/// A message attached to one physical source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub level: Level,
    pub error: Error,
    /// 1-based physical line in the source file
    pub row: usize,
    pub raw: String,
}

impl Diag {
    pub fn error(error: Error, row: usize, raw: &str) -> Self {
        Diag {
            level: Level::Error,
            error,
            row,
            raw: raw.to_string(),
        }
    }

    pub fn warn(error: Error, row: usize, raw: &str) -> Self {
        Diag {
            level: Level::Warn,
            error,
            row,
            raw: raw.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// Print with the file location and line content
    pub fn print(&self, file: &str) {
        match self.level {
            Level::Error => cprintln!("<red,bold>error</>: {}", self.error),
            Level::Warn => cprintln!("<yellow,bold>warn</>: {}", self.error),
        }
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.row);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.row, self.raw);
        cprintln!("      <blue>|</>");
    }
}

pub fn has_error(diags: &[Diag]) -> bool {
    diags.iter().any(Diag::is_error)
}
