//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! Matching is first-rule-wins over a fixed priority list, always anchored at
//! the start of the remaining input. The keyword rule runs before the generic
//! identifier rule and two-character operators are tried before their
//! one-character prefixes, so the order of `RULES` is part of the grammar.

use std::fmt;

use crate::error::{LexError, LexSnafu};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Def,
  BlockBegin,
  BlockEnd,
  Identifier,
  Integer,
  OpenParen,
  CloseParen,
  Comma,
  Operator,
  LineBreak,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Def => "def",
      Self::BlockBegin => "block-begin",
      Self::BlockEnd => "block-end",
      Self::Identifier => "identifier",
      Self::Integer => "integer",
      Self::OpenParen => "open-paren",
      Self::CloseParen => "close-paren",
      Self::Comma => "comma",
      Self::Operator => "operator",
      Self::LineBreak => "line-break",
    };
    f.write_str(name)
  }
}

/// A classified lexeme together with where it started in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub lexeme: String,
  pub loc: usize,
}

impl Token {
  pub fn new(kind: TokenKind, lexeme: impl Into<String>, loc: usize) -> Self {
    Self {
      kind,
      lexeme: lexeme.into(),
      loc,
    }
  }
}

/// Surface syntax accepted by the tokenizer. The two keyword sets are
/// mutually exclusive; a source is written in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
  /// `def name(a, b) ... end`
  #[default]
  Def,
  /// `act name(a, b) { ... }`
  Act,
}

impl Syntax {
  pub fn def_keyword(self) -> &'static str {
    match self {
      Self::Def => "def",
      Self::Act => "act",
    }
  }

  /// `None` when the body starts right after the parameter list.
  pub fn block_begin(self) -> Option<&'static str> {
    match self {
      Self::Def => None,
      Self::Act => Some("{"),
    }
  }

  pub fn block_end(self) -> &'static str {
    match self {
      Self::Def => "end",
      Self::Act => "}",
    }
  }
}

/// Rule priority. Earlier entries win when several rules match.
const RULES: [TokenKind; 10] = [
  TokenKind::Def,
  TokenKind::BlockBegin,
  TokenKind::BlockEnd,
  TokenKind::Identifier,
  TokenKind::Integer,
  TokenKind::OpenParen,
  TokenKind::CloseParen,
  TokenKind::Comma,
  TokenKind::Operator,
  TokenKind::LineBreak,
];

/// Two-character operators come first so `>=` is never split into `>` `=`.
const OPERATORS: [&str; 13] = [
  ">=", "<=", "+", "-", "*", "/", "=", ">", "<", "&", "|", "%", "!",
];

/// Whitespace skipped between tokens. Line breaks are left to their own rule.
const HORIZONTAL_SPACE: [char; 4] = [' ', '\t', '\x0b', '\x0c'];

/// Lex `source` with the default `def ... end` syntax.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
  Lexer::new(Syntax::Def).tokenize(source)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer {
  syntax: Syntax,
}

impl Lexer {
  pub fn new(syntax: Syntax) -> Self {
    Self { syntax }
  }

  /// Lex the whole input into a flat vector of tokens. Line breaks are
  /// matched but never emitted; an empty input yields no tokens.
  pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    loop {
      rest = rest.trim_start_matches(HORIZONTAL_SPACE);
      if rest.is_empty() {
        break;
      }
      let loc = source.len() - rest.len();

      let Some((kind, len)) = self.next_token(rest) else {
        return LexSnafu {
          position: loc,
          remaining: rest,
        }
        .fail();
      };

      let (lexeme, tail) = rest.split_at(len);
      if kind != TokenKind::LineBreak {
        tokens.push(Token::new(kind, lexeme, loc));
      }
      rest = tail;
    }

    Ok(tokens)
  }

  /// Classify the token at the very start of `rest`, returning its kind and
  /// byte length.
  pub fn next_token(&self, rest: &str) -> Option<(TokenKind, usize)> {
    RULES
      .into_iter()
      .find_map(|kind| self.match_rule(kind, rest).map(|len| (kind, len)))
  }

  fn match_rule(&self, kind: TokenKind, rest: &str) -> Option<usize> {
    match kind {
      TokenKind::Def => match_marker(rest, self.syntax.def_keyword()),
      TokenKind::BlockBegin => self
        .syntax
        .block_begin()
        .and_then(|marker| match_marker(rest, marker)),
      TokenKind::BlockEnd => match_marker(rest, self.syntax.block_end()),
      TokenKind::Identifier => match_word(rest, |c| c.is_ascii_alphabetic()),
      TokenKind::Integer => match_word(rest, |c| c.is_ascii_digit()),
      TokenKind::OpenParen => match_marker(rest, "("),
      TokenKind::CloseParen => match_marker(rest, ")"),
      TokenKind::Comma => match_marker(rest, ","),
      TokenKind::Operator => OPERATORS
        .into_iter()
        .find(|op| rest.starts_with(op))
        .map(str::len),
      TokenKind::LineBreak => {
        let len = rest.len() - rest.trim_start_matches(['\r', '\n']).len();
        (len > 0).then_some(len)
      }
    }
  }
}

fn is_word_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}

/// Match a fixed marker. Word-like markers must end on a word boundary.
fn match_marker(rest: &str, marker: &str) -> Option<usize> {
  let tail = rest.strip_prefix(marker)?;
  let wordy = marker.ends_with(is_word_char);
  if wordy && tail.starts_with(is_word_char) {
    return None;
  }
  Some(marker.len())
}

/// Match a non-empty run of `class` characters ending on a word boundary.
fn match_word(rest: &str, class: impl Fn(char) -> bool) -> Option<usize> {
  let len = rest.find(|c: char| !class(c)).unwrap_or(rest.len());
  if len == 0 || rest[len..].starts_with(is_word_char) {
    return None;
  }
  Some(len)
}
