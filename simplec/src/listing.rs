use color_print::cformat;
use sml::{fmt_word, Inst};
use std::ops::Range;

use crate::codegen::Program;
use crate::symbol::Kind;

/// Where the words of one source line ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub row: usize,
    pub number: Option<i32>,
    pub raw: String,
    pub code: Range<u16>,
}

pub fn print_dump(program: &Program) {
    println!("{}+{}", "-".repeat(14), "-".repeat(56));
    for line in &program.listing {
        if line.code.is_empty() {
            println!("{:14}| {:>4}: {}", "", line.row, line.raw);
            continue;
        }
        for addr in line.code.clone() {
            let word = program.image.get(addr as usize);
            let asm = match Inst::from_word(word) {
                Ok(inst) => inst.cformat(),
                Err(_) => cformat!("<r,s>??</>"),
            };
            let src = if addr == line.code.start {
                format!("{:>4}: {:<28}", line.row, line.raw)
            } else {
                format!("{:34}", "")
            };
            println!("[{:03}] {} | {} {}", addr, fmt_word(word), src, asm);
        }
    }

    println!("{}+{}", "-".repeat(14), "-".repeat(56));
    for entry in program.symbols.entries() {
        let name = match entry.kind {
            Kind::Line => continue,
            Kind::Variable => {
                let name = char::from_u32(entry.key as u32).unwrap_or('?');
                cformat!("<c>{}</>", name)
            }
            Kind::Constant => cformat!("<y>#{}</>", entry.key),
        };
        let word = program.image.get(entry.location as usize);
        println!("[{:03}] {} | {}", entry.location, fmt_word(word), name);
    }
    println!("{}+{}", "-".repeat(14), "-".repeat(56));
}
