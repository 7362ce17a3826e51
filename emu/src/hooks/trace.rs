use sml::{fmt_word, Inst};

use super::Hook;
use crate::model::State;

/// Print every executed instruction.
pub struct Trace;

impl Hook for Trace {
    fn init(&mut self, _state: &State) {
        println!(" * Trace all");
    }

    fn exec(&mut self, time: u64, addr: u16, state: &State) {
        let inst = match Inst::from_word(state.instruction_register()) {
            Ok(inst) => inst.cformat(),
            Err(_) => format!("{}", state.instruction_register()),
        };
        println!(
            "[{:0>4}] @{:03} {} | acc: {}",
            time,
            addr,
            inst,
            fmt_word(state.accumulator())
        );
    }
}
