use super::{Operation, Var};
use crate::lang::ast::{Expression, Statement};
use crate::lang::{Error, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// What a statement asks of the machine once it has run.
#[derive(Debug, PartialEq, Clone)]
pub enum Flow {
    Next,
    Print(String),
    Input(String),
    Jump(LineNumber),
    Halt,
}

impl Expression {
    /// Evaluation never fails on an unknown variable: it reads as zero
    /// and a warning is returned alongside the value.
    pub fn evaluate(&self, var: &Var) -> Result<(i64, Vec<String>)> {
        let mut warnings = vec![];
        let value = self.eval(var, &mut warnings)?;
        Ok((value, warnings))
    }

    /// Warnings pushed before an error stay in `warnings`.
    pub fn eval(&self, var: &Var, warnings: &mut Vec<String>) -> Result<i64> {
        use Expression::*;
        match self {
            Var(name) => match var.fetch(name) {
                Some(value) => Ok(value),
                None => {
                    warnings.push(format!("unknown variable `{}`", name));
                    Ok(0)
                }
            },
            Integer(n) => Operation::literal(*n),
            Negation(expr) => match **expr {
                Integer(n) => Operation::negative_literal(n),
                _ => Operation::negate(expr.eval(var, warnings)?),
            },
            Identity(expr) => expr.eval(var, warnings),
            Power(lhs, rhs) => {
                Operation::power(lhs.eval(var, warnings)?, rhs.eval(var, warnings)?)
            }
            Multiply(lhs, rhs) => {
                Operation::multiply(lhs.eval(var, warnings)?, rhs.eval(var, warnings)?)
            }
            Divide(lhs, rhs) => {
                Operation::divide(lhs.eval(var, warnings)?, rhs.eval(var, warnings)?)
            }
            Add(lhs, rhs) => Operation::add(lhs.eval(var, warnings)?, rhs.eval(var, warnings)?),
            Subtract(lhs, rhs) => {
                Operation::subtract(lhs.eval(var, warnings)?, rhs.eval(var, warnings)?)
            }
            Equal(lhs, rhs) => Ok(Operation::equal(
                lhs.eval(var, warnings)?,
                rhs.eval(var, warnings)?,
            )),
            Less(lhs, rhs) => Ok(Operation::less(
                lhs.eval(var, warnings)?,
                rhs.eval(var, warnings)?,
            )),
            Greater(lhs, rhs) => Ok(Operation::greater(
                lhs.eval(var, warnings)?,
                rhs.eval(var, warnings)?,
            )),
        }
    }
}

impl Statement {
    /// Execute one statement against the variables. `INPUT` only names
    /// the variable; the caller stores the value once it arrives.
    /// Warnings land in `warnings` even when the statement fails.
    pub fn run(&self, var: &mut Var, warnings: &mut Vec<String>) -> Result<Flow> {
        use Statement::*;
        match self {
            Rem(_) => Ok(Flow::Next),
            Let(name, expr) => {
                let value = expr.eval(var, warnings)?;
                var.store(name, value);
                Ok(Flow::Next)
            }
            Print(expr) => Ok(Flow::Print(expr.eval(var, warnings)?.to_string())),
            Input(name) => Ok(Flow::Input(name.clone())),
            Goto(number) => Ok(Flow::Jump(*number)),
            If(expr, number) => {
                if expr.eval(var, warnings)? != 0 {
                    Ok(Flow::Jump(*number))
                } else {
                    Ok(Flow::Next)
                }
            }
            End => Ok(Flow::Halt),
        }
    }
}
