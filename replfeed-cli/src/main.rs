//! Command-line interface for replfeed
//! Rewrites a code snippet so it can be sent line by line to an interactive interpreter.
//!
//! Usage:
//!   replfeed normalize [CODE] [--line-ending <le>] [--no-merge] [--on-error <policy>]
//!   replfeed tokens [CODE] [--format simple|json]       - Blank-line and dedent markers
//!   replfeed statements [CODE] [--format simple|json]   - Top-level statement ranges
//!
//! CODE defaults to standard input (also when given as `-`). Every subcommand accepts
//! `--config <file>` to layer a TOML file over the built-in defaults.

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, warn};
use replfeed_config::{ConfigError, ErrorPolicy, Loader, ReplfeedConfig};
use replfeed_normalizer::transforms::standard::{analysis, ANALYSIS};
use replfeed_normalizer::{normalize_with, tokenize, TokenKind};
use std::io::{self, Read, Write};

/// Picked up from the working directory when no `--config` is given.
const LOCAL_CONFIG: &str = "replfeed.toml";

fn code_arg() -> Arg {
    Arg::new("code")
        .help("Source code to process; reads standard input when absent or '-'")
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format")
        .value_parser(["simple", "json"])
        .default_value("simple")
}

fn no_merge_arg() -> Arg {
    Arg::new("no-merge")
        .long("no-merge")
        .help("Separate every top-level statement, one-liners included")
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("replfeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prepares code snippets for line-by-line execution in a REPL")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .subcommand(
            Command::new("normalize")
                .about("Remove blank lines and separate top-level statements")
                .arg(code_arg())
                .arg(
                    Arg::new("line-ending")
                        .long("line-ending")
                        .help("Line terminator for the output")
                        .value_parser(["native", "lf", "crlf"]),
                )
                .arg(no_merge_arg())
                .arg(
                    Arg::new("on-error")
                        .long("on-error")
                        .help("Fail, or write the input back unchanged, when normalization fails")
                        .value_parser(["fail", "passthrough"]),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("List the blank-line (NL) and DEDENT markers of the tokenizer")
                .arg(code_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("statements")
                .about("List top-level statement ranges after blank-line removal")
                .arg(code_arg())
                .arg(format_arg())
                .arg(no_merge_arg()),
        )
}

fn main() {
    let matches = cli().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        eprintln!("No subcommand given; see --help");
        std::process::exit(2);
    };

    let config = load_config(sub).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(2);
    });
    init_logging(&config.logging.level);
    debug!("running '{}' with {:?}", name, config);

    let source = read_source(sub).unwrap_or_else(|e| {
        eprintln!("Error reading input: {}", e);
        std::process::exit(1);
    });

    match name {
        "normalize" => handle_normalize_command(&source, &config),
        "tokens" => handle_tokens_command(&source, format_of(sub)),
        "statements" => handle_statements_command(&source, format_of(sub), &config),
        other => {
            eprintln!("Unknown subcommand '{}'", other);
            std::process::exit(2);
        }
    }
}

/// Defaults, then the user file, then flags of the subcommand.
fn load_config(sub: &ArgMatches) -> Result<ReplfeedConfig, ConfigError> {
    let mut loader = match sub.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };

    if let Some(line_ending) = optional_string(sub, "line-ending") {
        loader = loader.set_override("normalize.line_ending", line_ending)?;
    }
    if let Some(policy) = optional_string(sub, "on-error") {
        loader = loader.set_override("output.on_error", policy)?;
    }
    if sub.try_get_one::<bool>("no-merge").ok().flatten() == Some(&true) {
        loader = loader.set_override("normalize.merge_single_line_runs", false)?;
    }

    loader.build()
}

fn optional_string(sub: &ArgMatches, id: &str) -> Option<String> {
    sub.try_get_one::<String>(id).ok().flatten().cloned()
}

fn format_of(sub: &ArgMatches) -> &str {
    sub.get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple")
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn read_source(sub: &ArgMatches) -> io::Result<String> {
    match sub.get_one::<String>("code").map(String::as_str) {
        Some("-") | None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(code) => Ok(code.to_string()),
    }
}

/// Write to stdout and flush right away; the consumer is usually waiting on a pipe.
fn emit(output: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
    {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

/// Handle the normalize command
fn handle_normalize_command(source: &str, config: &ReplfeedConfig) {
    match normalize_with(source, &config.normalize.options()) {
        Ok(output) => emit(&output),
        Err(e) => match config.output.on_error {
            ErrorPolicy::Passthrough => {
                warn!("normalization failed, passing input through: {}", e);
                emit(source);
            }
            ErrorPolicy::Fail => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

/// Handle the tokens command
fn handle_tokens_command(source: &str, format: &str) {
    let tokens = tokenize(source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let formatted = match format {
        "json" => to_json(&tokens),
        _ => tokens
            .iter()
            .filter_map(|token| match token.kind {
                TokenKind::BlankLine => Some(format!("NL,{}\n", token.start.line)),
                TokenKind::Dedent => Some(format!("DEDENT,{}\n", token.start.line)),
                _ => None,
            })
            .collect(),
    };
    emit(&formatted);
}

/// Handle the statements command
fn handle_statements_command(source: &str, format: &str, config: &ReplfeedConfig) {
    let source = source.to_string();
    let result = if config.normalize.merge_single_line_runs {
        ANALYSIS.run(source)
    } else {
        analysis(false).run(source)
    };
    let found = result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let formatted = match format {
        "json" => to_json(&found.ranges),
        _ => found
            .ranges
            .iter()
            .map(|range| format!("{},{}\n", range.start_line, range.end_line))
            .collect(),
    };
    emit(&formatted);
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json + "\n",
        Err(e) => {
            eprintln!("Error formatting output: {}", e);
            std::process::exit(1);
        }
    }
}
