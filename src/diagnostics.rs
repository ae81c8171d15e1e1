//! Purpose: Render CLI errors on stderr and summarize clap parse failures.
//! Exports: `emit_error`, `clap_error_summary`, `clap_error_hint`.
//! Role: Keep `main.rs` focused on parse/dispatch; owns the stderr error envelope.
//! Invariants: TTY stderr (or `--color always`) gets human text; otherwise one JSON line per error.
//! Invariants: ANSI escapes appear only when color is enabled.
use std::error::Error as StdError;
use std::io::{self, IsTerminal};

use hello::api::{Error, ErrorKind};
use serde_json::{Map, Value, json};

use crate::ColorMode;

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

pub(crate) fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    if is_tty || use_color {
        eprintln!("{}", error_text(err, use_color));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::InvalidArgument => "invalid argument".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

pub(crate) fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

pub(crate) fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);
    match usage {
        Some(usage) => format!("Usage: {usage}. Try `hello --help`."),
        None => "Try `hello --help`.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Parser)]
    #[command(name = "hello")]
    struct ArgsFixture {
        #[arg(long)]
        known: bool,
    }

    #[test]
    fn error_json_has_kind_message_and_hint() {
        let err = Error::new(ErrorKind::InvalidArgument)
            .with_message("name cannot be empty or whitespace only")
            .with_hint("pass a name");
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "InvalidArgument");
        assert_eq!(
            value["error"]["message"],
            "name cannot be empty or whitespace only"
        );
        assert_eq!(value["error"]["hint"], "pass a name");
        assert!(value["error"].get("causes").is_none());
    }

    #[test]
    fn error_json_lists_causes() {
        let err = Error::new(ErrorKind::Io)
            .with_source(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let value = error_json(&err);
        assert_eq!(value["error"]["message"], "i/o error");
        assert_eq!(value["error"]["causes"][0], "pipe closed");
    }

    #[test]
    fn error_text_plain_and_colored() {
        let err = Error::new(ErrorKind::Usage)
            .with_message("unexpected argument")
            .with_hint("Try `hello --help`.");
        assert_eq!(
            error_text(&err, false),
            "error: unexpected argument\nhint: Try `hello --help`."
        );
        let colored = error_text(&err, true);
        assert!(colored.starts_with("\u{1b}[31merror:\u{1b}[0m"));
    }

    #[test]
    fn clap_summary_strips_prefix() {
        ArgsFixture::command().debug_assert();
        let err = ArgsFixture::try_parse_from(["hello", "--bogus"])
            .err()
            .expect("parse error");
        let summary = clap_error_summary(&err);
        assert!(!summary.starts_with("error:"));
        assert!(summary.contains("--bogus"));
        assert!(clap_error_hint(&err).ends_with("Try `hello --help`."));
    }
}
