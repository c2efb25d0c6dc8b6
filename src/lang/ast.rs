use super::{Error, LineNumber};
pub use super::token::Command;
use std::fmt::Write;

/// The result of parsing one line.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    /// A numbered statement destined for the program.
    Line(LineNumber, Statement),
    /// A line number alone; removes that line.
    Delete(LineNumber),
    Command(Command),
    /// A blank line.
    Nop,
    Invalid(Error),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Rem(String),
    Let(String, Expression),
    Print(Expression),
    Input(String),
    Goto(LineNumber),
    If(Expression, LineNumber),
    End,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Var(String),
    Integer(u64),
    Negation(Box<Expression>),
    Identity(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
}

/// ## Tree dump
///
/// One node per line, each child one tab deeper than its parent.
/// The output for a given tree never varies.
pub trait Dump {
    fn dump_into(&self, indent: usize, out: &mut String);

    fn dump(&self) -> String {
        let mut s = String::new();
        self.dump_into(0, &mut s);
        s
    }
}

fn dump_line(indent: usize, text: &dyn std::fmt::Display, out: &mut String) {
    for _ in 0..indent {
        out.push('\t');
    }
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", text);
}

impl Dump for Node {
    fn dump_into(&self, indent: usize, out: &mut String) {
        use Node::*;
        match self {
            Line(number, statement) => {
                dump_line(indent, number, out);
                statement.dump_into(indent + 1, out);
            }
            Delete(number) => dump_line(indent, number, out),
            Command(command) => dump_line(indent, command, out),
            Nop => {}
            Invalid(error) => {
                dump_line(indent, &"INVALID", out);
                dump_line(indent + 1, &error.text(), out);
            }
        }
    }
}

impl Dump for Statement {
    fn dump_into(&self, indent: usize, out: &mut String) {
        use Statement::*;
        match self {
            Rem(text) => {
                dump_line(indent, &"REM", out);
                dump_line(indent + 1, text, out);
            }
            Let(var, expr) => {
                dump_line(indent, &"LET", out);
                dump_line(indent + 1, &"=", out);
                dump_line(indent + 2, var, out);
                expr.dump_into(indent + 2, out);
            }
            Print(expr) => {
                dump_line(indent, &"PRINT", out);
                expr.dump_into(indent + 1, out);
            }
            Input(var) => {
                dump_line(indent, &"INPUT", out);
                dump_line(indent + 1, var, out);
            }
            Goto(number) => {
                dump_line(indent, &"GOTO", out);
                dump_line(indent + 1, number, out);
            }
            If(expr, number) => {
                dump_line(indent, &"IF", out);
                expr.dump_into(indent + 1, out);
                dump_line(indent, &"THEN", out);
                dump_line(indent + 1, number, out);
            }
            End => dump_line(indent, &"END", out),
        }
    }
}

impl Dump for Expression {
    fn dump_into(&self, indent: usize, out: &mut String) {
        use Expression::*;
        match self {
            Var(name) => dump_line(indent, name, out),
            Integer(n) => dump_line(indent, n, out),
            Negation(expr) | Identity(expr) => {
                dump_line(indent, &self.symbol(), out);
                expr.dump_into(indent + 1, out);
            }
            Power(lhs, rhs)
            | Multiply(lhs, rhs)
            | Divide(lhs, rhs)
            | Add(lhs, rhs)
            | Subtract(lhs, rhs)
            | Equal(lhs, rhs)
            | Less(lhs, rhs)
            | Greater(lhs, rhs) => {
                dump_line(indent, &self.symbol(), out);
                lhs.dump_into(indent + 1, out);
                rhs.dump_into(indent + 1, out);
            }
        }
    }
}

impl Expression {
    fn symbol(&self) -> &'static str {
        use Expression::*;
        match self {
            Var(_) | Integer(_) => "",
            Negation(_) | Subtract(..) => "-",
            Identity(_) | Add(..) => "+",
            Power(..) => "**",
            Multiply(..) => "*",
            Divide(..) => "/",
            Equal(..) => "=",
            Less(..) => "<",
            Greater(..) => ">",
        }
    }
}
