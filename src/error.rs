//! Error types shared across the compilation pipeline.
//!
//! Each stage has its own error: the tokenizer fails with [`LexError`] and the
//! parser with [`ParseError`]. [`CompileError`] wraps both so the pipeline can
//! propagate with `?`. Diagnostics follow the chibicc style of pointing at the
//! offending byte with a caret.

use snafu::Snafu;

use crate::tokenizer::TokenKind;

pub type CompileResult<T> = Result<T, CompileError>;

/// No token pattern matched at `position`.
#[derive(Debug, Snafu)]
#[snafu(
  visibility(pub(crate)),
  display("no token matches at byte {position}: {remaining:?}")
)]
pub struct LexError {
  pub position: usize,
  pub remaining: String,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
  #[snafu(display("expected {expected}, but got {found} \"{lexeme}\""))]
  Unexpected {
    expected: TokenKind,
    found: TokenKind,
    lexeme: String,
    loc: usize,
  },
  #[snafu(display("expected {expected}, but reached end of input"))]
  UnexpectedEof { expected: TokenKind },
  #[snafu(display(
    "reached end of input while looking {offset} token(s) ahead for {expected}"
  ))]
  LookaheadEof { expected: TokenKind, offset: usize },
  #[snafu(display("integer literal \"{lexeme}\" does not fit in 64 bits"))]
  IntegerOverflow { lexeme: String, loc: usize },
  #[snafu(display("unknown operator \"{lexeme}\""))]
  UnknownOperator { lexeme: String, loc: usize },
  #[snafu(display("unexpected {found} \"{lexeme}\" after the definition"))]
  TrailingTokens {
    found: TokenKind,
    lexeme: String,
    loc: usize,
  },
}

impl ParseError {
  /// Byte offset the error points at; `None` means end of input.
  pub fn loc(&self) -> Option<usize> {
    match self {
      Self::Unexpected { loc, .. }
      | Self::IntegerOverflow { loc, .. }
      | Self::UnknownOperator { loc, .. }
      | Self::TrailingTokens { loc, .. } => Some(*loc),
      Self::UnexpectedEof { .. } | Self::LookaheadEof { .. } => None,
    }
  }
}

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(context(false), display("{source}"))]
  Lex { source: LexError },
  #[snafu(context(false), display("{source}"))]
  Parse { source: ParseError },
}

impl CompileError {
  /// Render the error against the source it came from:
  ///
  /// ```text
  /// 1:5: expected identifier, but got open-paren "("
  /// def (
  ///     ^
  /// ```
  pub fn report(&self, source: &str) -> String {
    let loc = match self {
      Self::Lex { source: err } => Some(err.position),
      Self::Parse { source: err } => err.loc(),
    };
    let loc = loc.unwrap_or(source.len()).min(source.len());

    let line_start = source[..loc].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[loc..].find('\n').map_or(source.len(), |i| loc + i);
    let line_no = source[..line_start].matches('\n').count() + 1;
    let column = source[line_start..loc].chars().count();
    let line = source[line_start..line_end].trim_end_matches('\r');
    let marker = format!("{}^", " ".repeat(column));

    format!("{line_no}:{}: {self}\n{line}\n{marker}", column + 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn report_points_at_offending_token() {
    let err = CompileError::from(ParseError::Unexpected {
      expected: TokenKind::Identifier,
      found: TokenKind::OpenParen,
      lexeme: "(".to_string(),
      loc: 4,
    });
    assert_eq!(
      err.report("def ("),
      "1:5: expected identifier, but got open-paren \"(\"\ndef (\n    ^"
    );
  }

  #[test]
  fn report_uses_the_line_containing_the_error() {
    let source = "def f()\n  x $\nend";
    let err = CompileError::from(LexError {
      position: 12,
      remaining: "$\nend".to_string(),
    });
    let report = err.report(source);
    assert!(report.starts_with("2:5: no token matches at byte 12"));
    assert!(report.ends_with("\n  x $\n    ^"));
  }

  #[test]
  fn end_of_input_points_past_last_byte() {
    let err = CompileError::from(ParseError::UnexpectedEof {
      expected: TokenKind::BlockEnd,
    });
    assert_eq!(
      err.report("def f()"),
      "1:8: expected block-end, but reached end of input\ndef f()\n       ^"
    );
  }
}
