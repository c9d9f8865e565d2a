//! Crate root: wires together the compilation pipeline.
//!
//! The stages are small pure functions that compose left to right:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` turns the tokens into a single `FunctionDef`.
//! - `codegen` renders the definition back into normalized text.
//! - `error` holds the per-stage errors and caret diagnostics.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::{Expr, FunctionDef, Operator};
pub use codegen::generate;
pub use error::{CompileError, CompileResult, LexError, ParseError};
pub use parser::{Parser, parse};
pub use tokenizer::{Lexer, Syntax, Token, TokenKind, tokenize};

/// Knobs shared by every stage of one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
  pub syntax: Syntax,
  /// Treat tokens after the closing block marker as an error.
  pub strict: bool,
}

/// Run the tokenizer and parser over a source string.
pub fn parse_source(source: &str, options: &Options) -> CompileResult<FunctionDef> {
  let tokens = Lexer::new(options.syntax).tokenize(source)?;
  let func = Parser::new(options.syntax)
    .strict(options.strict)
    .parse(tokens)?;
  Ok(func)
}

/// Compile a source string into its normalized rendering.
pub fn compile(source: &str, options: &Options) -> CompileResult<String> {
  let func = parse_source(source, options)?;
  Ok(generate(&func))
}
