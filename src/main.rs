//! Purpose: `hello` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, prints the greeting on stdout.
//! Invariants: Stdout carries only the greeting (text line or one JSON line).
//! Invariants: Non-interactive errors are emitted as JSON on stderr unless `--color always`.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, Write};

use clap::{CommandFactory, Parser, ValueEnum, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use hello::api::{DEFAULT_GREETING, Error, ErrorKind, Greeting, print_greet, to_exit_code};
use tracing_subscriber::EnvFilter;

mod diagnostics;

use diagnostics::{clap_error_hint, clap_error_summary, emit_error};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    dispatch(cli)
        .map_err(add_invalid_argument_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "hello",
    version,
    about = "Print a greeting",
    long_about = None,
    after_help = r#"EXAMPLES
  $ hello                       # Hello, World!
  $ hello Alice                 # Hello, Alice!
  $ hello Bob --greeting Hi     # Hi, Bob!
  $ hello --format json Alice   # {"greeting":"Hello","target":"Alice","message":"Hello, Alice!"}

NOTES
  - Set RUST_LOG=debug to trace what is printed."#
)]
struct Cli {
    #[arg(help = "Name to greet; must not be blank (default: World)")]
    name: Option<String>,
    #[arg(
        short,
        long,
        default_value = DEFAULT_GREETING,
        help = "Greeting phrase placed before the name"
    )]
    greeting: String,
    #[arg(
        long,
        default_value = "text",
        value_enum,
        help = "Output format for the greeting: text|json"
    )]
    format: OutputFormat,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        long,
        value_name = "SHELL",
        value_enum,
        exclusive = true,
        help = "Print a shell completion script and exit"
    )]
    completions: Option<Shell>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn dispatch(cli: Cli) -> Result<RunOutcome, Error> {
    if let Some(shell) = cli.completions {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        write_completions(shell, &mut lock)?;
        return Ok(RunOutcome::ok());
    }

    let greeting = match cli.name {
        Some(name) => Greeting::for_person(name, Some(&cli.greeting))?,
        None => Greeting::default().with_greeting(cli.greeting),
    };
    tracing::debug!(
        greeting = greeting.greeting(),
        target = greeting.target(),
        format = ?cli.format,
        "dispatching greeting"
    );

    match cli.format {
        OutputFormat::Text => print_greet(greeting.greeting(), greeting.target())?,
        OutputFormat::Json => emit_json(&greeting)?,
    }
    Ok(RunOutcome::ok())
}

// `generate` panics on a failed write, so render into memory first.
fn write_completions<W: Write>(shell: Shell, out: &mut W) -> Result<(), Error> {
    let mut script = Vec::new();
    clap_complete::aot::generate(shell, &mut Cli::command(), "hello", &mut script);
    out.write_all(&script)
        .and_then(|()| out.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write completions")
                .with_source(err)
        })
}

fn emit_json(greeting: &Greeting) -> Result<(), Error> {
    let json = serde_json::to_string(greeting).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode greeting as json")
            .with_source(err)
    })?;
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "{json}").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write greeting")
            .with_source(err)
    })
}

fn add_invalid_argument_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::InvalidArgument || err.hint().is_some() {
        return err;
    }
    err.with_hint("Pass a non-blank NAME, or omit it to greet the World.")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["hello"]).expect("parse");
        assert!(cli.name.is_none());
        assert_eq!(cli.greeting, "Hello");
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.completions.is_none());
    }

    #[test]
    fn parses_name_and_greeting() {
        let cli = Cli::try_parse_from(["hello", "Bob", "-g", "Hi", "--format", "json"])
            .expect("parse");
        assert_eq!(cli.name.as_deref(), Some("Bob"));
        assert_eq!(cli.greeting, "Hi");
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn completions_is_exclusive() {
        let err = Cli::try_parse_from(["hello", "Bob", "--completions", "bash"])
            .err()
            .expect("conflict");
        assert_eq!(err.kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn completions_write_failure_is_io_error() {
        let mut script = Vec::new();
        write_completions(Shell::Bash, &mut script).expect("write");
        assert!(String::from_utf8_lossy(&script).contains("hello"));

        let err = write_completions(Shell::Bash, &mut ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(to_exit_code(err.kind()), 4);
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.use_color(true));
        assert!(!ColorMode::Auto.use_color(false));
        assert!(ColorMode::Always.use_color(false));
        assert!(!ColorMode::Never.use_color(true));
    }

    #[test]
    fn invalid_argument_gets_hint() {
        let err = add_invalid_argument_hint(Error::new(ErrorKind::InvalidArgument));
        assert!(err.hint().is_some());

        let err = add_invalid_argument_hint(Error::new(ErrorKind::Io));
        assert!(err.hint().is_none());

        let err = add_invalid_argument_hint(
            Error::new(ErrorKind::InvalidArgument).with_hint("custom"),
        );
        assert_eq!(err.hint(), Some("custom"));
    }
}
