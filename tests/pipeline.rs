// End-to-end tests for the tokenize -> parse -> generate pipeline.

use minidef::{
  CompileError, Expr, FunctionDef, Options, ParseError, Syntax, TokenKind, compile, generate,
  parse, parse_source, tokenize,
};

fn def_options() -> Options {
  Options::default()
}

#[test]
fn add_definition_through_every_stage() {
  let tokens = tokenize("def add(a,b) add(a,b) end").unwrap();
  let func = parse(tokens).unwrap();
  assert_eq!(
    func,
    FunctionDef {
      name: "add".to_string(),
      params: vec!["a".to_string(), "b".to_string()],
      body: vec![Expr::call("add", vec![Expr::var("a"), Expr::var("b")])],
    }
  );
  assert_eq!(generate(&func), "def add a,b add a,b end");
}

#[test]
fn multi_line_program() {
  let source = "def area(w, h)\n  mul(w, h)\n  w * h\n  print(area(2, 3))\nend\n";
  assert_eq!(
    compile(source, &def_options()).unwrap(),
    "def area w,h mul w,h w * h print area 2,3 end"
  );
}

#[test]
fn act_syntax_renders_with_def_words() {
  let options = Options {
    syntax: Syntax::Act,
    strict: false,
  };
  let source = "act add(a,b) {\n  add(a,b)\n}";
  assert_eq!(compile(source, &options).unwrap(), "def add a,b add a,b end");
}

#[test]
fn lex_errors_surface_through_compile() {
  let err = compile("def f() $ end", &def_options()).unwrap_err();
  let CompileError::Lex { source } = &err else {
    panic!("expected a lex error, got {err:?}");
  };
  assert_eq!(source.position, 8);
  assert_eq!(source.remaining, "$ end");
}

#[test]
fn parse_errors_surface_through_compile() {
  let err = compile("def (", &def_options()).unwrap_err();
  assert!(matches!(
    err,
    CompileError::Parse {
      source: ParseError::Unexpected {
        expected: TokenKind::Identifier,
        ..
      }
    }
  ));
  assert_eq!(
    err.report("def ("),
    "1:5: expected identifier, but got open-paren \"(\"\ndef (\n    ^"
  );
}

#[test]
fn missing_block_end_names_the_kind() {
  let err = compile("def f(a)\n  g(a)\n", &def_options()).unwrap_err();
  assert_eq!(err.to_string(), "expected block-end, but reached end of input");
}

#[test]
fn strict_mode_rejects_trailing_input() {
  let source = "def f() end\ndef g() end";
  assert_eq!(compile(source, &def_options()).unwrap(), "def f   end");

  let strict = Options {
    strict: true,
    ..Options::default()
  };
  let err = compile(source, &strict).unwrap_err();
  assert!(matches!(
    err,
    CompileError::Parse {
      source: ParseError::TrailingTokens {
        found: TokenKind::Def,
        ..
      }
    }
  ));
  assert!(err.report(source).starts_with("2:1: unexpected def \"def\""));
}

#[test]
fn empty_source_is_a_parse_error() {
  assert!(tokenize("").unwrap().is_empty());
  let err = compile("", &def_options()).unwrap_err();
  assert_eq!(err.to_string(), "expected def, but reached end of input");
}

#[test]
fn parse_source_feeds_compile() {
  let source = "def f(a)\x0b\n  g(a)\x0c\nend";
  let func = parse_source(source, &def_options()).unwrap();
  assert_eq!(func.body, vec![Expr::call("g", vec![Expr::var("a")])]);
  assert_eq!(compile(source, &def_options()).unwrap(), generate(&func));
}

#[test]
fn lookahead_at_end_of_input_is_reported() {
  let err = compile("def f() x", &def_options()).unwrap_err();
  assert!(matches!(
    err,
    CompileError::Parse {
      source: ParseError::LookaheadEof { offset: 1, .. }
    }
  ));
  assert!(err.report("def f() x").ends_with("def f() x\n         ^"));
}
