use strum::{Display, EnumString};

use crate::error::Error;
use crate::postfix::{to_postfix, Postfix};
use sml::is_word;

// ----------------------------------------------------------------------------
// Keywords

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Rem,
    Input,
    Print,
    Let,
    Goto,
    If,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Relop {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
}

impl Relop {
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse()
            .map_err(|_| Error::InvalidOperator(s.to_string()))
    }
}

// ----------------------------------------------------------------------------
// Operands

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Variable(char),
    Constant(i32),
}

impl Operand {
    pub fn parse(s: &str) -> Result<Self, Error> {
        let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Operand::Constant(literal(s)?));
        }
        Ok(Operand::Variable(variable(s)?))
    }
}

/// Parse an integer literal that must fit in one word.
pub fn literal(s: &str) -> Result<i32, Error> {
    match s.parse::<i64>() {
        Ok(value) if is_word(value) => Ok(value as i32),
        _ => Err(Error::ConstantOutOfRange(s.to_string())),
    }
}

fn variable(s: &str) -> Result<char, Error> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c),
        _ => Err(Error::MalformedStatement(format!(
            "expected a variable, found `{}`",
            s
        ))),
    }
}

fn line_number(s: &str) -> Result<i32, Error> {
    match s.parse::<i32>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(Error::MalformedStatement(format!(
            "expected a line number, found `{}`",
            s
        ))),
    }
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Rem,
    Input(char),
    Print(Operand),
    Let(char, Postfix),
    Goto(i32),
    If(Operand, Relop, Operand, i32),
    End,
}

impl Stmt {
    /// Parse everything after the line number.
    pub fn parse(code: &str) -> Result<Stmt, Error> {
        let code = code.trim();
        let (keyword, rest) = match code.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (code, ""),
        };
        if keyword.is_empty() {
            return Err(Error::MalformedStatement("missing command".to_string()));
        }
        let command: Command = keyword
            .parse()
            .map_err(|_| Error::UnknownCommand(keyword.to_string()))?;

        let args: Vec<&str> = rest.split_whitespace().collect();

        // Check the argument count and return the arguments as an array
        macro_rules! args {
            ($n:expr) => {{
                let args: [&str; $n] = args.as_slice().try_into().map_err(|_| {
                    Error::MalformedStatement(format!(
                        "`{}` takes {} argument(s), found {}",
                        command,
                        $n,
                        args.len()
                    ))
                })?;
                args
            }};
        }

        match command {
            Command::Rem => Ok(Stmt::Rem),
            Command::Input => {
                let [var] = args!(1);
                Ok(Stmt::Input(variable(var)?))
            }
            Command::Print => {
                let [value] = args!(1);
                Ok(Stmt::Print(Operand::parse(value)?))
            }
            Command::Let => {
                let (lhs, rhs) = rest.split_once('=').ok_or_else(|| {
                    Error::MalformedStatement("`let` requires `=`".to_string())
                })?;
                let var = variable(lhs.trim())?;
                if rhs.trim().is_empty() {
                    return Err(Error::MalformedStatement("empty expression".to_string()));
                }
                Ok(Stmt::Let(var, to_postfix(rhs)?))
            }
            Command::Goto => {
                let [target] = args!(1);
                Ok(Stmt::Goto(line_number(target)?))
            }
            Command::If => {
                let [lhs, op, rhs, goto, target] = args!(5);
                let op = Relop::parse(op)?;
                if !goto.eq_ignore_ascii_case("goto") {
                    return Err(Error::MalformedStatement(format!(
                        "expected `goto`, found `{}`",
                        goto
                    )));
                }
                Ok(Stmt::If(
                    Operand::parse(lhs)?,
                    op,
                    Operand::parse(rhs)?,
                    line_number(target)?,
                ))
            }
            Command::End => {
                let [] = args!(0);
                Ok(Stmt::End)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: i32,
    pub stmt: Stmt,
}

/// Split off the leading line number.
pub fn split_number(raw: &str) -> Result<(i32, &str), Error> {
    let raw = raw.trim_start();
    let (head, rest) = match raw.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (raw, ""),
    };
    match head.parse::<i32>() {
        Ok(n) if n >= 0 => Ok((n, rest)),
        _ => Err(Error::MissingLineNumber),
    }
}

impl Line {
    pub fn parse(raw: &str) -> Result<Line, Error> {
        let (number, code) = split_number(raw)?;
        Ok(Line {
            number,
            stmt: Stmt::parse(code)?,
        })
    }
}
