use color_print::cprintln;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.smp")]
    input: PathBuf,

    /// Output file [default: input with `.sml` extension]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Dump the listing
    #[clap(short, long)]
    dump: bool,

    /// Write the symbol table as YAML
    #[clap(short, long)]
    symbols: Option<PathBuf>,
}

fn main() -> ExitCode {
    use clap::Parser;

    env_logger::init();
    let args: Args = Args::parse();
    println!("Simple Compiler");

    println!("1. Read Source & Translate Lines");
    println!("  < {}", args.input.display());
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            cprintln!("<r,s>Failed to open File</>: {}: {}", args.input.display(), err);
            return ExitCode::from(2);
        }
    };
    let file = args.input.display().to_string();

    let program = match simplec::compile(&source) {
        Ok(program) => program,
        Err(diags) => {
            for diag in &diags {
                diag.print(&file);
            }
            let errors = diags.iter().filter(|d| d.is_error()).count();
            cprintln!("<r,s>Compilation failed</>: {} error(s), no output written", errors);
            return ExitCode::from(1);
        }
    };
    for diag in &program.warnings {
        diag.print(&file);
    }

    println!("2. Resolve Lines & Write Image");
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("sml"));
    println!("  > {}", output.display());
    if let Err(err) = program.image.save(&output) {
        cprintln!("<r,s>{}</>", err);
        return ExitCode::from(2);
    }

    if let Some(path) = &args.symbols {
        println!("  > {}", path.display());
        let written = program
            .symbols
            .to_yaml()
            .map_err(|e| e.to_string())
            .and_then(|yaml| std::fs::write(path, yaml).map_err(|e| e.to_string()));
        if let Err(err) = written {
            cprintln!("<r,s>Failed to write File</>: {}: {}", path.display(), err);
            return ExitCode::from(2);
        }
    }

    if args.dump {
        simplec::print_dump(&program);
    }
    ExitCode::SUCCESS
}
