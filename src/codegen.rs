//! Code generation: render the parsed definition back into normalized text.
//!
//! The output is a flat rendering rather than source in the input grammar:
//! parentheses are dropped and lists are comma-joined, so feeding the result
//! back through the parser is not expected to work.

use crate::ast::{Expr, FunctionDef};

/// Render a definition as `def <name> <params> <body> end`.
pub fn generate(func: &FunctionDef) -> String {
  let body: Vec<String> = func.body.iter().map(emit_expr).collect();
  format!(
    "def {} {} {} end",
    func.name,
    func.params.join(","),
    body.join(" ")
  )
}

fn emit_expr(node: &Expr) -> String {
  match node {
    Expr::IntegerLiteral { value } => value.to_string(),
    Expr::VariableRef { name } => name.clone(),
    Expr::Call { name, args } => {
      let args: Vec<String> = args.iter().map(emit_expr).collect();
      format!("{name} {}", args.join(","))
    }
    Expr::BinaryOp { operator } => operator.symbol().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::Operator;

  fn def(name: &str, params: &[&str], body: Vec<Expr>) -> FunctionDef {
    FunctionDef {
      name: name.to_string(),
      params: params.iter().map(|p| p.to_string()).collect(),
      body,
    }
  }

  #[test]
  fn call_with_params() {
    let func = def(
      "add",
      &["a", "b"],
      vec![Expr::call("add", vec![Expr::var("a"), Expr::var("b")])],
    );
    assert_eq!(generate(&func), "def add a,b add a,b end");
  }

  #[test]
  fn empty_params_and_body_keep_separators() {
    assert_eq!(generate(&def("f", &[], vec![])), "def f   end");
  }

  #[test]
  fn nested_calls_and_leaves() {
    let func = def(
      "f",
      &["x"],
      vec![
        Expr::call(
          "g",
          vec![
            Expr::call("h", vec![Expr::var("x"), Expr::integer(1)]),
            Expr::integer(2),
          ],
        ),
        Expr::binary(Operator::Le),
        Expr::call("print", vec![]),
      ],
    );
    assert_eq!(generate(&func), "def f x g h x,1,2 <= print  end");
  }
}
