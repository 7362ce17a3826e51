use sml::{Image, Inst, Word, MEMORY_SIZE};

use crate::error::Error;

/// Code grows up from address 0, data grows down from the top of memory.
/// The two arenas are kept apart and may never meet.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    code: Vec<Word>,
    data: Vec<Word>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Address the next instruction will be placed at.
    pub fn pc(&self) -> u16 {
        self.code.len() as u16
    }

    fn is_full(&self) -> bool {
        self.code.len() + self.data.len() >= MEMORY_SIZE
    }

    pub fn emit(&mut self, inst: Inst) -> Result<u16, Error> {
        if self.is_full() || inst.operand as usize >= MEMORY_SIZE {
            return Err(Error::MemoryExhausted);
        }
        let addr = self.pc();
        self.code.push(inst.to_word());
        Ok(addr)
    }

    pub fn alloc(&mut self, init: Word) -> Result<u16, Error> {
        if self.is_full() {
            return Err(Error::MemoryExhausted);
        }
        let addr = (MEMORY_SIZE - 1 - self.data.len()) as u16;
        self.data.push(init);
        Ok(addr)
    }

    /// Fill in the operand of a placeholder instruction.
    /// A label placed past the last word cannot be a branch target.
    pub fn patch(&mut self, addr: u16, operand: u16) -> Result<(), Error> {
        if operand as usize >= MEMORY_SIZE {
            return Err(Error::MemoryExhausted);
        }
        self.code[addr as usize] += operand as Word;
        Ok(())
    }

    pub fn to_image(&self) -> Image {
        let mut image = Image::new();
        for (addr, word) in self.code.iter().enumerate() {
            image.set(addr, *word);
        }
        for (idx, word) in self.data.iter().enumerate() {
            image.set(MEMORY_SIZE - 1 - idx, *word);
        }
        image
    }
}
