pub mod dump;
pub mod trace;

use crate::model::State;

/// Side effects run after every executed instruction.
pub trait Hook {
    fn init(&mut self, _state: &State) {}
    fn exec(&mut self, time: u64, addr: u16, state: &State);
}
