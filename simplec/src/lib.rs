mod codegen;
mod error;
mod listing;
mod memory;
mod postfix;
mod stmt;
mod symbol;

pub use codegen::{compile, lower, Compare, Compiler, Program};
pub use error::{has_error, Diag, Error, Level};
pub use listing::{print_dump, Listing};
pub use memory::Memory;
pub use postfix::{to_postfix, Operator, Postfix, Token};
pub use stmt::{Command, Line, Operand, Relop, Stmt};
pub use symbol::{Entry, Kind, SymbolTable};
