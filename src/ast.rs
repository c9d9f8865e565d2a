//! Syntax tree produced by the parser and consumed by the generator.

use std::fmt;

/// The only top-level production: one definition per compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
  pub name: String,
  pub params: Vec<String>,
  pub body: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  IntegerLiteral { value: i64 },
  VariableRef { name: String },
  Call { name: String, args: Vec<Expr> },
  /// An operator standing alone in expression position. It carries no
  /// operands; `a + b` parses as three sibling statements.
  BinaryOp { operator: Operator },
}

impl Expr {
  pub fn integer(value: i64) -> Self {
    Self::IntegerLiteral { value }
  }

  pub fn var(name: impl Into<String>) -> Self {
    Self::VariableRef { name: name.into() }
  }

  pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
    Self::Call {
      name: name.into(),
      args,
    }
  }

  pub fn binary(operator: Operator) -> Self {
    Self::BinaryOp { operator }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Add,
  Sub,
  Mul,
  Div,
  Assign,
  Gt,
  Lt,
  Ge,
  Le,
  And,
  Or,
  Rem,
  Not,
}

impl Operator {
  pub fn from_symbol(symbol: &str) -> Option<Self> {
    let op = match symbol {
      "+" => Self::Add,
      "-" => Self::Sub,
      "*" => Self::Mul,
      "/" => Self::Div,
      "=" => Self::Assign,
      ">" => Self::Gt,
      "<" => Self::Lt,
      ">=" => Self::Ge,
      "<=" => Self::Le,
      "&" => Self::And,
      "|" => Self::Or,
      "%" => Self::Rem,
      "!" => Self::Not,
      _ => return None,
    };
    Some(op)
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Self::Add => "+",
      Self::Sub => "-",
      Self::Mul => "*",
      Self::Div => "/",
      Self::Assign => "=",
      Self::Gt => ">",
      Self::Lt => "<",
      Self::Ge => ">=",
      Self::Le => "<=",
      Self::And => "&",
      Self::Or => "|",
      Self::Rem => "%",
      Self::Not => "!",
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}
