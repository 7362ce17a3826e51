use clap::Parser;
use color_print::{cformat, cprintln};
use std::path::PathBuf;
use std::process::ExitCode;

use simpletron::hooks::{dump::Dump, trace::Trace, Hook};
use simpletron::{report, run, Console, Port, State, HALT_MESSAGE};
use sml::Image;

#[derive(Parser, Debug)]
#[clap(
    name = "Simpletron",
    author = "kanade-k-1228",
    version = "v1.0.0",
    about = "Emulator for the Simpletron machine"
)]
struct Args {
    /// Stop after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// YAML file: instruction address -> memory words to dump
    #[arg(short, long)]
    dump_cfg: Option<PathBuf>,

    /// Trace every instruction
    #[arg(short = 'a', long)]
    trace_all: bool,

    /// Read input values from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Transcript file [default: image with `.out` extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(default_value = "main.sml")]
    image_file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    println!("Simpletron");

    println!("+-----------------------------------------------+");
    println!("| Execute: {:<36} |", args.image_file.display());
    if let Some(fname) = &args.input {
        println!("|  - Input: {:<35} |", fname.display());
    }
    if let Some(fname) = &args.dump_cfg {
        println!("|  - Dump: {:<36} |", fname.display());
    }
    println!("+-----------------------------------------------+");

    // ------------------------------------------------------------------------
    // Load image & open ports
    let image = match Image::load(&args.image_file) {
        Ok(image) => image,
        Err(err) => {
            cprintln!("<r,s>*** error loading program ***</>: {}", err);
            return ExitCode::from(2);
        }
    };
    let mut state = State::new();
    state.load(&image);

    let output = args
        .output
        .unwrap_or_else(|| args.image_file.with_extension("out"));
    let mut console = match Console::arg(args.input.as_deref(), Some(output.as_path())) {
        Ok(console) => console,
        Err(err) => {
            cprintln!("<r,s>{}</>", err);
            return ExitCode::from(2);
        }
    };

    // ------------------------------------------------------------------------
    // Initialize hooks
    let mut hooks: Vec<Box<dyn Hook>> = vec![];
    if let Some(path) = &args.dump_cfg {
        match Dump::arg(path) {
            Ok(dump) => hooks.push(Box::new(dump)),
            Err(err) => {
                cprintln!("<r,s>{}</>", err);
                return ExitCode::from(2);
            }
        }
    }
    if args.trace_all {
        hooks.push(Box::new(Trace));
    }

    // ------------------------------------------------------------------------
    // Main loop
    let result = run(&mut state, &mut console, &mut hooks, args.tmax);

    // Exit
    println!();
    let (text, code) = match result {
        Ok(_) => (format!("{}\n", HALT_MESSAGE), ExitCode::SUCCESS),
        Err(fault) => (report(&state, &fault), ExitCode::from(1)),
    };
    if let Err(err) = console.message(&text) {
        eprint!("{}", text);
        eprintln!("{}", cformat!("<r,s>Failed to write transcript</>: {}", err));
    }
    code
}
