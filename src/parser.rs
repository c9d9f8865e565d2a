//! Recursive-descent parser producing a single function definition.
//!
//! One function per nonterminal:
//!
//! ```text
//! def       = "def" ident params block-begin? expr* block-end
//! params    = "(" (ident ("," ident)*)? ")"
//! expr      = integer | operator | ident args | ident
//! args      = "(" (expr ("," expr)*)? ")"
//! ```
//!
//! Alternatives in `expr` are tried in that order. Telling a call from a
//! variable needs a second token of lookahead; every other decision needs one.
//! Lookahead past the end of the stream is an error, never a soft mismatch.

use std::collections::VecDeque;

use snafu::OptionExt;

use crate::ast::{Expr, FunctionDef, Operator};
use crate::error::{
  IntegerOverflowSnafu, LookaheadEofSnafu, ParseError, TrailingTokensSnafu, UnexpectedEofSnafu,
  UnexpectedSnafu, UnknownOperatorSnafu,
};
use crate::tokenizer::{Syntax, Token, TokenKind};

/// Parse a `def ... end` token stream, ignoring anything after the definition.
pub fn parse(tokens: Vec<Token>) -> Result<FunctionDef, ParseError> {
  Parser::default().parse(tokens)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
  syntax: Syntax,
  strict: bool,
}

impl Parser {
  pub fn new(syntax: Syntax) -> Self {
    Self {
      syntax,
      strict: false,
    }
  }

  /// Reject tokens left over after the closing block marker.
  pub fn strict(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  pub fn parse(&self, tokens: Vec<Token>) -> Result<FunctionDef, ParseError> {
    let mut stream = TokenStream::new(tokens);
    let def = parse_def(&mut stream, self.syntax)?;

    if self.strict
      && let Some(token) = stream.tokens.pop_front()
    {
      return TrailingTokensSnafu {
        found: token.kind,
        lexeme: token.lexeme,
        loc: token.loc,
      }
      .fail();
    }

    Ok(def)
  }
}

fn parse_def(stream: &mut TokenStream, syntax: Syntax) -> Result<FunctionDef, ParseError> {
  stream.consume(TokenKind::Def)?;
  let name = stream.consume(TokenKind::Identifier)?.lexeme;
  let params = parse_params(stream)?;

  if syntax.block_begin().is_some() {
    stream.consume(TokenKind::BlockBegin)?;
  }

  let mut body = Vec::new();
  while !stream.check(TokenKind::BlockEnd, 0)? {
    body.push(parse_expr(stream)?);
  }
  stream.consume(TokenKind::BlockEnd)?;

  Ok(FunctionDef { name, params, body })
}

fn parse_params(stream: &mut TokenStream) -> Result<Vec<String>, ParseError> {
  let mut params = Vec::new();
  stream.consume(TokenKind::OpenParen)?;

  if stream.check(TokenKind::Identifier, 0)? {
    params.push(stream.consume(TokenKind::Identifier)?.lexeme);
    while stream.check(TokenKind::Comma, 0)? {
      stream.consume(TokenKind::Comma)?;
      params.push(stream.consume(TokenKind::Identifier)?.lexeme);
    }
  }

  stream.consume(TokenKind::CloseParen)?;
  Ok(params)
}

fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
  if stream.check(TokenKind::Integer, 0)? {
    parse_integer(stream)
  } else if stream.check(TokenKind::Operator, 0)? {
    parse_operator(stream)
  } else if stream.check(TokenKind::Identifier, 0)? && stream.check(TokenKind::OpenParen, 1)? {
    parse_call(stream)
  } else {
    parse_var_ref(stream)
  }
}

fn parse_integer(stream: &mut TokenStream) -> Result<Expr, ParseError> {
  let token = stream.consume(TokenKind::Integer)?;
  let value = token.lexeme.parse::<i64>().ok().context(IntegerOverflowSnafu {
    lexeme: token.lexeme.as_str(),
    loc: token.loc,
  })?;
  Ok(Expr::integer(value))
}

fn parse_operator(stream: &mut TokenStream) -> Result<Expr, ParseError> {
  let token = stream.consume(TokenKind::Operator)?;
  let operator = Operator::from_symbol(&token.lexeme).context(UnknownOperatorSnafu {
    lexeme: token.lexeme.as_str(),
    loc: token.loc,
  })?;
  Ok(Expr::binary(operator))
}

fn parse_call(stream: &mut TokenStream) -> Result<Expr, ParseError> {
  let name = stream.consume(TokenKind::Identifier)?.lexeme;
  let args = parse_args(stream)?;
  Ok(Expr::call(name, args))
}

fn parse_args(stream: &mut TokenStream) -> Result<Vec<Expr>, ParseError> {
  let mut args = Vec::new();
  stream.consume(TokenKind::OpenParen)?;

  if !stream.check(TokenKind::CloseParen, 0)? {
    args.push(parse_expr(stream)?);
    while stream.check(TokenKind::Comma, 0)? {
      stream.consume(TokenKind::Comma)?;
      args.push(parse_expr(stream)?);
    }
  }

  stream.consume(TokenKind::CloseParen)?;
  Ok(args)
}

fn parse_var_ref(stream: &mut TokenStream) -> Result<Expr, ParseError> {
  let name = stream.consume(TokenKind::Identifier)?.lexeme;
  Ok(Expr::var(name))
}

/// Owning cursor over the token stream; consumed tokens are moved out.
struct TokenStream {
  tokens: VecDeque<Token>,
}

impl TokenStream {
  fn new(tokens: Vec<Token>) -> Self {
    Self {
      tokens: tokens.into(),
    }
  }

  /// Whether the token `offset` places ahead has the given kind. Looking past
  /// the end of the stream fails rather than answering `false`.
  fn check(&self, kind: TokenKind, offset: usize) -> Result<bool, ParseError> {
    let token = match offset {
      0 => self
        .tokens
        .front()
        .context(UnexpectedEofSnafu { expected: kind })?,
      _ => self.tokens.get(offset).context(LookaheadEofSnafu {
        expected: kind,
        offset,
      })?,
    };
    Ok(token.kind == kind)
  }

  /// Remove the front token, failing unless it has the expected kind.
  fn consume(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
    let token = self
      .tokens
      .pop_front()
      .context(UnexpectedEofSnafu { expected })?;
    if token.kind != expected {
      return UnexpectedSnafu {
        expected,
        found: token.kind,
        lexeme: token.lexeme,
        loc: token.loc,
      }
      .fail();
    }
    Ok(token)
  }
}
