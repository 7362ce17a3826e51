use std::cell::RefCell;
use std::rc::Rc;

use simpletron::hooks::Hook;
use simpletron::{report, run, Fault, Script, State, Status, ABORT_MESSAGE, PROMPT};
use sml::{Image, Word, MEMORY_SIZE};
use test_log::test;

fn load(words: &[Word]) -> State {
    let mut state = State::new();
    state.load(&Image::from_words(words).unwrap());
    state
}

fn execute(words: &[Word], input: &[i64]) -> (State, Script, Result<u64, Fault>) {
    let mut state = load(words);
    let mut script = Script::new(input.iter().copied());
    let result = run(&mut state, &mut script, &mut [], Some(10_000));
    println!("{}", script.text);
    (state, script, result)
}

fn fault(words: &[Word], input: &[i64], expect: Fault) -> State {
    let (state, _, result) = execute(words, input);
    assert_eq!(result, Err(expect));
    assert_eq!(state.status(), Status::Faulted);
    state
}

#[test]
fn store_clears_accumulator() {
    let mut state = load(&[20003, 21004, 43000, 7]);
    let mut script = Script::default();

    assert_eq!(state.exec(&mut script), Ok(0));
    assert_eq!(state.accumulator(), 7);
    assert_eq!(state.exec(&mut script), Ok(1));
    assert_eq!(state.accumulator(), 0);
    assert_eq!(state.get(4), 7);
    assert_eq!(state.instruction_counter(), 2);
}

#[test]
fn halt_keeps_counter() {
    let (state, _, result) = execute(&[20003, 43000, 0, 5], &[]);
    assert_eq!(result, Ok(2));
    assert_eq!(state.status(), Status::Halted);
    assert_eq!(state.instruction_counter(), 1);
    assert_eq!(state.accumulator(), 5);
    assert_eq!(state.operation_code(), 43);
}

#[test]
fn read_and_write() {
    let (state, script, result) = execute(&[10005, 11005, 12000, 43000], &[42]);
    assert!(result.is_ok());
    assert_eq!(state.get(5), 42);
    assert_eq!(script.output, vec![42]);
    assert_eq!(script.text, format!("{}42\n42\n\n", PROMPT));
}

#[test]
fn arithmetic() {
    // ((9 - 2) * 3 / 2 % 4) ^ 2
    let words = [
        20010, 31011, 33012, 32013, 34014, 35013, 21015, 11015, 43000, 0, 9, 2, 3, 2, 4,
    ];
    let (state, script, result) = execute(&words, &[]);
    assert!(result.is_ok());
    assert_eq!(script.output, vec![4]);
    assert_eq!(state.get(15), 4);

    let (state, script, result) = execute(&[20005, 35006, 21007, 11007, 43000, 2, 10], &[]);
    assert_eq!(result, Ok(5));
    assert_eq!(script.output, vec![1024]);
    assert_eq!(state.get(7), 1024);

    // a negative exponent truncates toward zero
    let (_, script, _) = execute(&[20005, 35006, 21007, 11007, 43000, 2, -1], &[]);
    assert_eq!(script.output, vec![0]);
}

#[test]
fn conditional_branches() {
    let words = [20007, 41004, 11008, 43000, 11007, 42006, 43000, -3, 9];
    let (_, script, _) = execute(&words, &[]);
    assert_eq!(script.output, vec![-3]);

    // zero, not negative
    let words = [20007, 41005, 42004, 43000, 11008, 43000, 0, 0, 9];
    let (_, script, _) = execute(&words, &[]);
    assert_eq!(script.output, vec![9]);
}

#[test]
fn division_by_zero() {
    for op in [32, 34] {
        let words = [20003, op * 1000 + 4, 43000, 10, 0];
        let state = fault(&words, &[], Fault::DivisionByZero);
        assert_eq!(state.accumulator(), 10);
        assert_eq!(state.instruction_counter(), 1);
    }
}

#[test]
fn word_overflow() {
    let state = fault(&[20003, 30003, 43000, 99999], &[], Fault::WordOverflow(199998));
    assert_eq!(state.accumulator(), 99999);

    fault(&[20003, 31004, 43000, -99999, 1], &[], Fault::WordOverflow(-100000));
    fault(&[20003, 33003, 43000, 1000], &[], Fault::WordOverflow(1_000_000));
    fault(&[20003, 35004, 43000, 10, 5], &[], Fault::WordOverflow(100000));
}

#[test]
fn read_out_of_range() {
    let state = fault(&[10005, 43000], &[100000], Fault::WordOverflow(100000));
    assert_eq!(state.get(5), 0);
    fault(&[10005, 43000], &[], Fault::InputClosed);
}

#[test]
fn invalid_opcode() {
    fault(&[99000], &[], Fault::InvalidOpcode(99));
    let state = fault(&[], &[], Fault::InvalidOpcode(0));
    assert_eq!(state.instruction_counter(), 0);
}

#[test]
fn address_out_of_bounds() {
    // -20005 splits into opcode -20 and operand -5
    let state = fault(&[-20005], &[], Fault::AddressOutOfBounds(-5));
    assert_eq!(state.operand(), -5);

    // falling off the end of memory
    let mut words = vec![0; MEMORY_SIZE];
    words[0] = 40999;
    words[999] = 20998;
    let state = fault(&words, &[], Fault::AddressOutOfBounds(1000));
    assert_eq!(state.instruction_counter(), 1000);
}

#[test]
fn cycle_limit() {
    let mut state = load(&[40000]);
    let mut script = Script::default();
    let result = run(&mut state, &mut script, &mut [], Some(25));
    assert_eq!(result, Err(Fault::CycleLimit(25)));
    assert!(state.is_terminated());
}

#[test]
fn load_resets_state() {
    let (mut state, _, _) = execute(&[20003, 43000, 0, 5], &[]);
    state.load(&Image::from_words(&[43000]).unwrap());
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.accumulator(), 0);
    assert_eq!(state.instruction_counter(), 0);
    assert_eq!(state.get(3), 0);
}

#[test]
fn fault_report() {
    let (state, _, result) = execute(&[20003, 32004, 43000, 10, 0], &[]);
    let text = report(&state, &result.unwrap_err());
    println!("{}", text);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "*** Attempt to divide by zero ***");
    assert_eq!(lines[1], ABORT_MESSAGE);
    assert_eq!(lines[2], "REGISTERS:");
    assert_eq!(lines[3], "accumulator          +00010");
    assert_eq!(lines[4], "instructionCounter       01");
    assert_eq!(lines[5], "instructionRegister  +32004");
    assert!(text.contains("MEMORY:"));
}

#[test]
fn hooks_see_every_cycle() {
    struct Record(Rc<RefCell<Vec<(u64, u16, Word)>>>);
    impl Hook for Record {
        fn exec(&mut self, time: u64, addr: u16, state: &State) {
            self.0.borrow_mut().push((time, addr, state.accumulator()));
        }
    }

    let log = Rc::new(RefCell::new(vec![]));
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Record(log.clone()))];
    let mut state = load(&[20004, 40003, 43000, 43000, 6]);
    let mut script = Script::default();
    assert_eq!(run(&mut state, &mut script, &mut hooks, None), Ok(3));
    assert_eq!(*log.borrow(), vec![(0, 0, 6), (1, 1, 6), (2, 3, 6)]);
}
