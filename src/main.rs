use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser as ClapParser, ValueEnum};
use colored::Colorize;

use minidef::{CompileResult, Lexer, Options, Syntax, compile, parse_source};

#[derive(ClapParser)]
#[command(
  name = "minidef",
  about = "Compile a single def/end definition into its normalized rendering",
  version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
  /// Source file to compile
  #[arg(default_value = "test.src")]
  file: PathBuf,

  /// Surface syntax of the source
  #[arg(long, value_enum, default_value_t = SyntaxArg::Def)]
  syntax: SyntaxArg,

  /// Which pipeline stage to print
  #[arg(long, value_enum, default_value_t = Emit::Output)]
  emit: Emit,

  /// Reject tokens after the end of the definition
  #[arg(long)]
  strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SyntaxArg {
  /// def name(a, b) ... end
  Def,
  /// act name(a, b) { ... }
  Act,
}

impl From<SyntaxArg> for Syntax {
  fn from(arg: SyntaxArg) -> Self {
    match arg {
      SyntaxArg::Def => Syntax::Def,
      SyntaxArg::Act => Syntax::Act,
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
  Tokens,
  Ast,
  Output,
}

fn run(source: &str, options: &Options, emit: Emit) -> CompileResult<String> {
  match emit {
    Emit::Tokens => {
      let tokens = Lexer::new(options.syntax).tokenize(source)?;
      let lines: Vec<String> = tokens
        .iter()
        .map(|token| format!("{} {:?}", token.kind, token.lexeme))
        .collect();
      Ok(lines.join("\n"))
    }
    Emit::Ast => Ok(format!("{:#?}", parse_source(source, options)?)),
    Emit::Output => compile(source, options),
  }
}

fn main() {
  let cli = Cli::parse();

  let source = match fs::read_to_string(&cli.file) {
    Ok(source) => source,
    Err(err) => {
      eprintln!(
        "{}: cannot read {}: {err}",
        "error".red().bold(),
        cli.file.display()
      );
      process::exit(1);
    }
  };

  let options = Options {
    syntax: cli.syntax.into(),
    strict: cli.strict,
  };

  match run(&source, &options, cli.emit) {
    Ok(text) => println!("{text}"),
    Err(err) => {
      eprintln!(
        "{}: {}:{}",
        "error".red().bold(),
        cli.file.display(),
        err.report(&source)
      );
      process::exit(1);
    }
  }
}
