use crate::op::Opcode;
use crate::word::{Word, MEMORY_SIZE};

use color_print::cformat;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid operation code: {0:02}")]
    InvalidOpcode(i32),

    #[error("Operand out of bounds: {0}")]
    OperandOutOfBounds(i32),
}

/// A decoded instruction word: `opcode * 1000 + operand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inst {
    pub op: Opcode,
    pub operand: u16,
}

impl Inst {
    pub fn new(op: Opcode, operand: u16) -> Self {
        Inst { op, operand }
    }

    pub fn to_word(self) -> Word {
        self.op.code() * 1000 + self.operand as Word
    }

    pub fn from_word(word: Word) -> Result<Inst, DecodeError> {
        let (code, operand) = split(word);
        if operand < 0 || operand as usize >= MEMORY_SIZE {
            return Err(DecodeError::OperandOutOfBounds(operand));
        }
        let op = Opcode::from_code(code).ok_or(DecodeError::InvalidOpcode(code))?;
        Ok(Inst::new(op, operand as u16))
    }
}

/// Split a word into its raw `(opcode, operand)` fields using truncating division.
pub fn split(word: Word) -> (i32, i32) {
    (word / 1000, word % 1000)
}

impl Inst {
    pub fn cformat(&self) -> String {
        let op = self.op.to_string();
        match self.op {
            Opcode::NEWLINE | Opcode::HALT => cformat!("<r>{:<10}</>", op),
            code if code.is_branch() => cformat!("<r>{:<10}</><g>@{:0>3}</>", op, self.operand),
            _ => cformat!("<r>{:<10}</><b>[{:0>3}]</>", op, self.operand),
        }
    }
}
