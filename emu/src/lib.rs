pub mod console;
pub mod error;
pub mod hooks;
pub mod model;

pub use console::{Console, Port, Script};
pub use error::{Error, Fault};
pub use hooks::Hook;
pub use model::{State, Status, PROMPT};

pub const HALT_MESSAGE: &str = "*** Simpletron execution terminated ***";
pub const ABORT_MESSAGE: &str = "*** Simpletron execution abnormally terminated ***";

/// Run until `HALT` or a fault. Hooks see the machine after every cycle.
pub fn run(
    state: &mut State,
    port: &mut dyn Port,
    hooks: &mut [Box<dyn Hook>],
    tmax: Option<u64>,
) -> Result<u64, Fault> {
    for hook in hooks.iter_mut() {
        hook.init(state);
    }
    let mut time = 0_u64;
    while !state.is_terminated() {
        if tmax.is_some_and(|tmax| time >= tmax) {
            return Err(state.abort(Fault::CycleLimit(time)));
        }
        let addr = state.exec(port)?;
        for hook in hooks.iter_mut() {
            hook.exec(time, addr, state);
        }
        time += 1;
    }
    Ok(time)
}

/// The diagnostic printed when a run ends in a fault.
pub fn report(state: &State, fault: &Fault) -> String {
    format!(
        "*** {} ***\n{}\n{}",
        fault,
        ABORT_MESSAGE,
        hooks::dump::state_dump(state)
    )
}
