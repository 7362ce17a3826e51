use log::{debug, trace};
use sml::inst::split;
use sml::{is_word, Image, Opcode, Word, MEMORY_SIZE};

use crate::console::Port;
use crate::error::Fault;

pub const PROMPT: &str = "Enter an integer: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
    Faulted,
}

pub struct State {
    memory: Vec<Word>,
    accumulator: Word,
    instruction_counter: i32,
    instruction_register: Word,
    operation_code: i32,
    operand: i32,
    status: Status,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

// Registers & memory access
impl State {
    pub fn new() -> Self {
        State {
            memory: vec![0; MEMORY_SIZE],
            accumulator: 0,
            instruction_counter: 0,
            instruction_register: 0,
            operation_code: 0,
            operand: 0,
            status: Status::Running,
        }
    }

    /// Reset every register and copy the image into memory.
    pub fn load(&mut self, image: &Image) {
        *self = State::new();
        self.memory.copy_from_slice(image.words());
        debug!("loaded {} words", image.words().iter().filter(|w| **w != 0).count());
    }

    pub fn get(&self, addr: usize) -> Word {
        self.memory[addr]
    }

    pub fn memory(&self) -> &[Word] {
        &self.memory
    }

    pub fn accumulator(&self) -> Word {
        self.accumulator
    }

    pub fn instruction_counter(&self) -> i32 {
        self.instruction_counter
    }

    pub fn instruction_register(&self) -> Word {
        self.instruction_register
    }

    pub fn operation_code(&self) -> i32 {
        self.operation_code
    }

    pub fn operand(&self) -> i32 {
        self.operand
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminated(&self) -> bool {
        self.status != Status::Running
    }

    fn store(&mut self, addr: usize, value: i64) -> Result<(), Fault> {
        if !is_word(value) {
            return Err(Fault::WordOverflow(value));
        }
        self.memory[addr] = value as Word;
        Ok(())
    }

    fn set_accumulator(&mut self, value: i64) -> Result<(), Fault> {
        if !is_word(value) {
            return Err(Fault::WordOverflow(value));
        }
        self.accumulator = value as Word;
        Ok(())
    }
}

// Fetch, decode & execute
impl State {
    /// Run one cycle and return the address of the executed instruction.
    /// A fault leaves the registers as they were when it was detected.
    pub fn exec(&mut self, port: &mut dyn Port) -> Result<u16, Fault> {
        self.step(port).map_err(|fault| {
            self.status = Status::Faulted;
            fault
        })
    }

    /// Stop the machine from outside the cycle, e.g. at a cycle limit.
    pub fn abort(&mut self, fault: Fault) -> Fault {
        self.status = Status::Faulted;
        fault
    }

    fn step(&mut self, port: &mut dyn Port) -> Result<u16, Fault> {
        let ic = self.instruction_counter;
        if ic < 0 || ic as usize >= MEMORY_SIZE {
            return Err(Fault::AddressOutOfBounds(ic as i64));
        }
        let word = self.memory[ic as usize];
        let (code, operand) = split(word);
        self.instruction_register = word;
        self.operation_code = code;
        self.operand = operand;

        if !is_word(self.accumulator as i64) {
            return Err(Fault::WordOverflow(self.accumulator as i64));
        }
        if operand < 0 || operand as usize >= MEMORY_SIZE {
            return Err(Fault::AddressOutOfBounds(operand as i64));
        }
        let op = Opcode::from_code(code).ok_or(Fault::InvalidOpcode(code))?;
        trace!("[{:03}] {} {:03} acc={}", ic, op, operand, self.accumulator);

        let addr = operand as usize;
        let acc = self.accumulator as i64;
        let value = self.memory[addr] as i64;
        let mut next = ic + 1;

        match op {
            Opcode::READ => {
                port.message(PROMPT)?;
                let input = port.read()?;
                self.store(addr, input)?;
            }
            Opcode::WRITE => port.write(self.memory[addr])?,
            Opcode::NEWLINE => port.newline()?,
            Opcode::LOAD => self.accumulator = self.memory[addr],
            Opcode::STORE => {
                self.store(addr, acc)?;
                self.accumulator = 0;
            }
            Opcode::ADD => self.set_accumulator(acc + value)?,
            Opcode::SUBTRACT => self.set_accumulator(acc - value)?,
            Opcode::MULTIPLY => self.set_accumulator(acc * value)?,
            Opcode::DIVIDE => {
                if value == 0 {
                    return Err(Fault::DivisionByZero);
                }
                self.set_accumulator(acc / value)?;
            }
            Opcode::REMAINDER => {
                if value == 0 {
                    return Err(Fault::DivisionByZero);
                }
                self.set_accumulator(acc % value)?;
            }
            Opcode::POWER => self.set_accumulator(power(acc, value)?)?,
            Opcode::BRANCH => next = operand,
            Opcode::BRANCHNEG => {
                if self.accumulator < 0 {
                    next = operand;
                }
            }
            Opcode::BRANCHZERO => {
                if self.accumulator == 0 {
                    next = operand;
                }
            }
            Opcode::HALT => {
                self.status = Status::Halted;
                next = ic;
            }
        }

        self.instruction_counter = next;
        Ok(ic as u16)
    }
}

/// Integer exponentiation; a negative exponent truncates the real result toward zero.
fn power(base: i64, exp: i64) -> Result<i64, Fault> {
    if exp >= 0 {
        return Ok(base.saturating_pow(exp.min(u32::MAX as i64) as u32));
    }
    match base {
        0 => Err(Fault::DivisionByZero),
        1 => Ok(1),
        -1 => Ok(if exp % 2 == 0 { 1 } else { -1 }),
        _ => Ok(0),
    }
}

#[test]
fn test_power() {
    assert_eq!(power(2, 10), Ok(1024));
    assert_eq!(power(-3, 3), Ok(-27));
    assert_eq!(power(7, 0), Ok(1));
    assert_eq!(power(0, 0), Ok(1));
    assert_eq!(power(5, -1), Ok(0));
    assert_eq!(power(-1, -3), Ok(-1));
    assert_eq!(power(-1, -2), Ok(1));
    assert_eq!(power(0, -2), Err(Fault::DivisionByZero));
    assert!(!is_word(power(10, 99999).unwrap()));
}
