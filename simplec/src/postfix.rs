use sml::Opcode;
use std::fmt;

use crate::error::Error;
use crate::stmt::literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '%' => Some(Operator::Rem),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Rem => '%',
            Operator::Pow => '^',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 0,
            Operator::Mul | Operator::Div | Operator::Rem => 1,
            Operator::Pow => 2,
        }
    }

    pub fn opcode(self) -> Opcode {
        match self {
            Operator::Add => Opcode::ADD,
            Operator::Sub => Opcode::SUBTRACT,
            Operator::Mul => Opcode::MULTIPLY,
            Operator::Div => Opcode::DIVIDE,
            Operator::Rem => Opcode::REMAINDER,
            Operator::Pow => Opcode::POWER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(i32),
    Ident(char),
    Op(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(c) => write!(f, "{}", c),
            Token::Op(op) => write!(f, "{}", op.symbol()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix(pub Vec<Token>);

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.0.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", tokens.join(" "))
    }
}

enum Stacked {
    Paren,
    Op(Operator),
}

/// Reorder an infix expression into postfix.
///
/// An implicit `)` closes the expression so the final flush is the same code
/// path as any other closing parenthesis. Operators of equal precedence are
/// popped before the incoming one is pushed, making every tier left-associative.
pub fn to_postfix(infix: &str) -> Result<Postfix, Error> {
    let chars: Vec<char> = infix.chars().chain(std::iter::once(')')).collect();
    let unbalanced = || Error::UnbalancedParen(infix.trim().to_string());

    let mut stack = vec![Stacked::Paren];
    let mut out = Vec::new();
    let mut idx = 0;

    while !stack.is_empty() {
        let c = *chars.get(idx).ok_or_else(unbalanced)?;

        if c.is_ascii_digit() {
            let len = chars[idx..].iter().take_while(|c| c.is_ascii_digit()).count();
            let digits: String = chars[idx..idx + len].iter().collect();
            out.push(Token::Number(literal(&digits)?));
            idx += len;
            continue;
        }

        match c {
            c if c.is_whitespace() => {}
            '(' => stack.push(Stacked::Paren),
            ')' => loop {
                match stack.pop() {
                    Some(Stacked::Op(op)) => out.push(Token::Op(op)),
                    Some(Stacked::Paren) => break,
                    None => return Err(unbalanced()),
                }
            },
            c => match Operator::from_char(c) {
                Some(op) => {
                    while let Some(Stacked::Op(top)) = stack.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        out.push(Token::Op(*top));
                        stack.pop();
                    }
                    stack.push(Stacked::Op(op));
                }
                None => out.push(Token::Ident(c)),
            },
        }
        idx += 1;
    }

    // A stray `)` empties the stack early; anything left over would be dropped
    if chars[idx..].iter().any(|c| !c.is_whitespace()) {
        return Err(unbalanced());
    }
    Ok(Postfix(out))
}
