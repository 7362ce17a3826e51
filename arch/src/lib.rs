pub mod image;
pub mod inst;
pub mod op;
pub mod word;

pub use image::{Image, ImageError};
pub use inst::{DecodeError, Inst};
pub use op::Opcode;
pub use word::{fmt_word, is_word, Word, MEMORY_SIZE, WORD_MAX, WORD_MIN};
