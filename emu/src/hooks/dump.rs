use serde::{Deserialize, Serialize};
use sml::{fmt_word, MEMORY_SIZE};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use super::Hook;
use crate::error::Error;
use crate::model::State;

/// Print registers, plus selected memory words, whenever execution reaches
/// one of the configured instruction addresses.
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    list: List,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<u16, Config>);

#[derive(Debug, Default, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    memory: Vec<u16>,
}

impl Dump {
    pub fn arg(file: &Path) -> Result<Self, Error> {
        let fname = file.display().to_string();
        let text =
            std::fs::read_to_string(file).map_err(|e| Error::FileOpen(fname.clone(), e))?;
        let mut dump = Dump::parse(&text).map_err(|e| Error::Config(fname.clone(), e))?;
        dump.file = Some(fname);
        Ok(dump)
    }

    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let list: List = serde_yaml::from_str(yaml)?;
        Ok(Self { file: None, list })
    }

    fn get(&self, addr: u16) -> Option<&Config> {
        self.list.0.get(&addr)
    }

    /// Text printed when execution reaches `addr`, if it is configured.
    pub fn report(&self, addr: u16, state: &State) -> Option<String> {
        let cfg = self.get(addr)?;
        let mut out = registers(state);
        for addr in cfg.memory.iter().filter(|a| (**a as usize) < MEMORY_SIZE) {
            let _ = writeln!(out, "  [{:03}] {}", addr, fmt_word(state.get(*addr as usize)));
        }
        Some(out)
    }
}

impl Hook for Dump {
    fn init(&mut self, _state: &State) {
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
    }

    fn exec(&mut self, _time: u64, addr: u16, state: &State) {
        if let Some(text) = self.report(addr, state) {
            print!("{}", text);
        }
    }
}

// ----------------------------------------------------------------------------
// Full state dump

pub fn registers(state: &State) -> String {
    let mut out = String::new();
    let word = |name: &str, value: i32| format!("{:<21}{}", name, fmt_word(value));
    let code = |name: &str, value: i32| format!("{:<21}{:>6}", name, format!("{:0>2}", value));
    let _ = writeln!(out, "REGISTERS:");
    let _ = writeln!(out, "{}", word("accumulator", state.accumulator()));
    let _ = writeln!(out, "{}", code("instructionCounter", state.instruction_counter()));
    let _ = writeln!(out, "{}", word("instructionRegister", state.instruction_register()));
    let _ = writeln!(out, "{}", code("operationCode", state.operation_code()));
    let _ = writeln!(out, "{}", code("operand", state.operand()));
    out
}

const DIMEN: usize = 10;

/// 100 rows of 10 words, labelled by the address of the first word.
pub fn memory(state: &State) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MEMORY:");
    let _ = write!(out, "   ");
    for col in 0..DIMEN {
        let _ = write!(out, " {:>6}", col);
    }
    let _ = writeln!(out);
    for (row, words) in state.memory().chunks(DIMEN).enumerate() {
        let _ = write!(out, "{:>3}", row * DIMEN);
        for word in words {
            let _ = write!(out, " {}", fmt_word(*word));
        }
        let _ = writeln!(out);
    }
    out
}

pub fn state_dump(state: &State) -> String {
    format!("{}\n{}", registers(state), memory(state))
}
