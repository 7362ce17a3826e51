use indexmap::IndexMap;
use log::debug;
use sml::{Image, Inst, Opcode};

use crate::error::{has_error, Diag, Error};
use crate::listing::Listing;
use crate::memory::Memory;
use crate::postfix::{Postfix, Token};
use crate::stmt::{split_number, Operand, Relop, Stmt};
use crate::symbol::{Entry, Kind, SymbolTable};

/// A branch emitted before its target line was seen.
#[derive(Debug, Clone)]
struct Fixup {
    target: i32,
    row: usize,
    raw: String,
}

/// Successful compilation output.
#[derive(Debug, Clone)]
pub struct Program {
    pub image: Image,
    pub symbols: SymbolTable,
    pub listing: Vec<Listing>,
    pub warnings: Vec<Diag>,
}

pub struct Compiler {
    symbols: SymbolTable,
    memory: Memory,
    fixups: IndexMap<u16, Fixup>,
    diags: Vec<Diag>,
    listing: Vec<Listing>,
    row: usize,
    raw: String,
    ended: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a whole source text. Every line is attempted even after an error.
pub fn compile(source: &str) -> Result<Program, Vec<Diag>> {
    let mut compiler = Compiler::new();
    for raw in source.lines() {
        compiler.line(raw);
    }
    compiler.finish()
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            symbols: SymbolTable::new(),
            memory: Memory::new(),
            fixups: IndexMap::new(),
            diags: Vec::new(),
            listing: Vec::new(),
            row: 0,
            raw: String::new(),
            ended: false,
        }
    }

    /// First pass over one physical source line.
    pub fn line(&mut self, raw: &str) {
        self.row += 1;
        if raw.trim().is_empty() {
            return;
        }
        if self.ended {
            self.diags.push(Diag::warn(Error::AfterEnd, self.row, raw));
            return;
        }
        self.raw = raw.to_string();

        let start = self.memory.pc();
        let number = match split_number(raw) {
            Ok((number, code)) => {
                if let Err(err) = self.translate(number, code) {
                    self.diags.push(Diag::error(err, self.row, raw));
                }
                Some(number)
            }
            Err(err) => {
                self.diags.push(Diag::error(err, self.row, raw));
                None
            }
        };
        self.listing.push(Listing {
            row: self.row,
            number,
            raw: raw.trim().to_string(),
            code: start..self.memory.pc(),
        });
    }

    /// Second pass: patch forward references, then hand out the image if nothing failed.
    pub fn finish(mut self) -> Result<Program, Vec<Diag>> {
        for (addr, fixup) in std::mem::take(&mut self.fixups) {
            match self.symbols.get(Kind::Line, fixup.target) {
                Some(entry) => {
                    debug!(
                        "resolve [{:03}] -> line {} @{:03}",
                        addr, fixup.target, entry.location
                    );
                    if let Err(err) = self.memory.patch(addr, entry.location) {
                        self.diags.push(Diag::error(err, fixup.row, &fixup.raw));
                    }
                }
                None => self.diags.push(Diag::error(
                    Error::UnresolvedLabel(fixup.target),
                    fixup.row,
                    &fixup.raw,
                )),
            }
        }
        self.diags.sort_by_key(|diag| diag.row);

        if has_error(&self.diags) {
            return Err(self.diags);
        }
        Ok(Program {
            image: self.memory.to_image(),
            symbols: self.symbols,
            listing: self.listing,
            warnings: self.diags,
        })
    }
}

// ----------------------------------------------------------------------------
// Statements

impl Compiler {
    fn translate(&mut self, number: i32, code: &str) -> Result<(), Error> {
        self.symbols.put(Entry::line(number, self.memory.pc()))?;
        let stmt = Stmt::parse(code)?;
        debug!("line {} @{:03}: {:?}", number, self.memory.pc(), stmt);

        match stmt {
            Stmt::Rem => {}
            Stmt::Input(var) => {
                let loc = self.variable(var)?;
                self.emit(Opcode::READ, loc)?;
            }
            Stmt::Print(value) => {
                let loc = self.operand(value)?;
                self.emit(Opcode::WRITE, loc)?;
            }
            Stmt::Let(var, expr) => self.assign(var, &expr)?,
            Stmt::Goto(target) => self.branch(Opcode::BRANCH, target)?,
            Stmt::If(lhs, op, rhs, target) => self.condition(lhs, op, rhs, target)?,
            Stmt::End => {
                self.emit(Opcode::HALT, 0)?;
                self.ended = true;
            }
        }
        Ok(())
    }

    fn emit(&mut self, op: Opcode, operand: u16) -> Result<u16, Error> {
        self.memory.emit(Inst::new(op, operand))
    }

    /// Evaluate the postfix stream over data slots, spilling each
    /// intermediate result into a fresh temporary.
    fn assign(&mut self, var: char, expr: &Postfix) -> Result<(), Error> {
        let mut stack: Vec<u16> = Vec::new();
        for token in &expr.0 {
            match token {
                Token::Number(value) => {
                    let loc = self.constant(*value)?;
                    stack.push(loc);
                }
                Token::Ident(name) => {
                    if !name.is_ascii_alphabetic() {
                        return Err(Error::MalformedStatement(format!(
                            "unexpected `{}` in expression",
                            name
                        )));
                    }
                    let loc = self.variable(*name)?;
                    stack.push(loc);
                }
                Token::Op(op) => {
                    let right = self.pop(&mut stack)?;
                    let left = self.pop(&mut stack)?;
                    let temp = self.memory.alloc(0)?;
                    self.emit(Opcode::LOAD, left)?;
                    self.emit(op.opcode(), right)?;
                    self.emit(Opcode::STORE, temp)?;
                    stack.push(temp);
                }
            }
        }
        let result = self.pop(&mut stack)?;
        if !stack.is_empty() {
            return Err(Error::MalformedStatement(format!(
                "missing operator in `{}`",
                expr
            )));
        }
        let target = self.variable(var)?;
        self.emit(Opcode::LOAD, result)?;
        self.emit(Opcode::STORE, target)?;
        Ok(())
    }

    // An exhausted stack reads as zero
    fn pop(&mut self, stack: &mut Vec<u16>) -> Result<u16, Error> {
        match stack.pop() {
            Some(loc) => Ok(loc),
            None => self.constant(0),
        }
    }

    fn branch(&mut self, op: Opcode, target: i32) -> Result<(), Error> {
        match self.symbols.get(Kind::Line, target) {
            Some(entry) => {
                self.emit(op, entry.location)?;
            }
            None => {
                let addr = self.emit(op, 0)?;
                self.fixups.insert(
                    addr,
                    Fixup {
                        target,
                        row: self.row,
                        raw: self.raw.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn condition(
        &mut self,
        lhs: Operand,
        op: Relop,
        rhs: Operand,
        target: i32,
    ) -> Result<(), Error> {
        let l = self.operand(lhs)?;
        let r = self.operand(rhs)?;
        for group in lower(op, l, r) {
            self.emit(Opcode::LOAD, group.minuend)?;
            self.emit(Opcode::SUBTRACT, group.subtrahend)?;
            for branch in group.branches {
                self.branch(*branch, target)?;
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Relational lowering

/// `LOAD minuend; SUBTRACT subtrahend` followed by the listed branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compare {
    pub minuend: u16,
    pub subtrahend: u16,
    pub branches: &'static [Opcode],
}

const ZERO: &[Opcode] = &[Opcode::BRANCHZERO];
const NEG: &[Opcode] = &[Opcode::BRANCHNEG];
const ZERO_OR_NEG: &[Opcode] = &[Opcode::BRANCHZERO, Opcode::BRANCHNEG];

/// Reduce a comparison to subtraction plus branch-on-zero / branch-on-negative.
/// `!=` is the union of `>` and `<`, so it yields two groups.
pub fn lower(op: Relop, l: u16, r: u16) -> Vec<Compare> {
    let cmp = |minuend, subtrahend, branches| Compare {
        minuend,
        subtrahend,
        branches,
    };
    match op {
        Relop::Eq => vec![cmp(l, r, ZERO)],
        Relop::Ne => vec![cmp(r, l, NEG), cmp(l, r, NEG)],
        Relop::Ge => vec![cmp(r, l, ZERO_OR_NEG)],
        Relop::Le => vec![cmp(l, r, ZERO_OR_NEG)],
        Relop::Gt => vec![cmp(r, l, NEG)],
        Relop::Lt => vec![cmp(l, r, NEG)],
    }
}

// ----------------------------------------------------------------------------
// Symbols

impl Compiler {
    fn variable(&mut self, name: char) -> Result<u16, Error> {
        if let Some(entry) = self.symbols.get(Kind::Variable, name as i32) {
            return Ok(entry.location);
        }
        let loc = self.memory.alloc(0)?;
        self.symbols.put(Entry::variable(name, loc))?;
        Ok(loc)
    }

    fn constant(&mut self, value: i32) -> Result<u16, Error> {
        if let Some(entry) = self.symbols.get(Kind::Constant, value) {
            return Ok(entry.location);
        }
        let loc = self.memory.alloc(value)?;
        self.symbols.put(Entry::constant(value, loc))?;
        Ok(loc)
    }

    fn operand(&mut self, operand: Operand) -> Result<u16, Error> {
        match operand {
            Operand::Variable(name) => self.variable(name),
            Operand::Constant(value) => self.constant(value),
        }
    }
}
