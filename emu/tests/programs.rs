use simplec::compile;
use simpletron::{run, Fault, Script, State, Status};
use sml::Word;
use test_log::test;

fn execute(source: &str, input: &[i64]) -> (Result<u64, Fault>, Script) {
    let program = match compile(source) {
        Ok(program) => program,
        Err(diags) => {
            for diag in &diags {
                diag.print("test.smp");
            }
            panic!("compilation failed");
        }
    };
    let mut state = State::new();
    state.load(&program.image);
    let mut script = Script::new(input.iter().copied());
    let result = run(&mut state, &mut script, &mut [], Some(100_000));
    println!("{}", script.text);
    if result.is_ok() {
        assert_eq!(state.status(), Status::Halted);
    }
    (result, script)
}

fn output(source: &str, input: &[i64]) -> Vec<Word> {
    let (result, script) = execute(source, input);
    assert!(result.is_ok(), "{:?}", result);
    script.output
}

#[test]
fn add_two_inputs() {
    let source = "10 input a\n20 input b\n30 let c = a + b\n40 print c\n50 end\n";
    assert_eq!(output(source, &[3, 4]), vec![7]);
}

#[test]
fn forward_goto_skips() {
    let source = "10 let x = 1\n20 print x\n30 goto 50\n40 let x = 2\n50 print x\n60 end\n";
    assert_eq!(output(source, &[]), vec![1, 1]);
}

#[test]
fn branch_on_zero() {
    let source = "10 input a
20 if a == 0 goto 50
30 print a
40 goto 60
50 print 0
60 end
";
    assert_eq!(output(source, &[0]), vec![0]);
    assert_eq!(output(source, &[5]), vec![5]);
}

#[test]
fn relational_lowering() {
    let cases: [(&str, fn(i64, i64) -> bool); 6] = [
        ("==", |l, r| l == r),
        ("!=", |l, r| l != r),
        (">=", |l, r| l >= r),
        ("<=", |l, r| l <= r),
        (">", |l, r| l > r),
        ("<", |l, r| l < r),
    ];
    for (sym, holds) in cases {
        let source = format!(
            "10 input l\n20 input r\n30 if l {} r goto 60\n40 print 0\n50 goto 70\n60 print 1\n70 end\n",
            sym
        );
        for l in -1..=1 {
            for r in -1..=1 {
                let expect = holds(l, r) as Word;
                assert_eq!(output(&source, &[l, r]), vec![expect], "{l} {sym} {r}");
            }
        }
    }
}

#[test]
fn constant_operands() {
    let source = "10 input a\n20 if 3 < a goto 50\n30 print 0\n40 goto 60\n50 print a\n60 end\n";
    assert_eq!(output(source, &[4]), vec![4]);
    assert_eq!(output(source, &[3]), vec![0]);
}

#[test]
fn expressions() {
    let source = "10 input a
20 input b
30 let c = (a + b) * 3 - b / 2 % 3
40 print c
50 let d = 2 ^ a ^ 2
60 print d
70 let e = a - b - 1
80 print e
90 end
";
    let (a, b) = (2_i64, 7_i64);
    let c = (a + b) * 3 - b / 2 % 3;
    let d = (2_i64.pow(a as u32)).pow(2);
    let e = a - b - 1;
    assert_eq!(
        output(source, &[a, b]),
        vec![c as Word, d as Word, e as Word]
    );
}

#[test]
fn loop_sum() {
    let source = "10 rem sum of squares 1..n
20 input n
30 let s = s + n * n
40 let n = n - 1
50 if n > 0 goto 30
60 print s
70 end
";
    assert_eq!(output(source, &[4]), vec![30]);
    assert_eq!(output(source, &[1]), vec![1]);
}

#[test]
fn runtime_faults() {
    let (result, _) = execute("10 input a\n20 let b = 10 / a\n30 end\n", &[0]);
    assert_eq!(result, Err(Fault::DivisionByZero));

    let (result, _) = execute("10 input a\n20 let b = a * a\n30 end\n", &[1000]);
    assert_eq!(result, Err(Fault::WordOverflow(1_000_000)));

    let (result, _) = execute("10 goto 10\n20 end\n", &[]);
    assert_eq!(result, Err(Fault::CycleLimit(100_000)));
}
