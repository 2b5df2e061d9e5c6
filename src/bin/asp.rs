//! Command-line interface for asp
//! This binary lexes Please BUILD files and prints what the lexer sees.
//!
//! Usage:
//!   asp tokens `<path>` [--format simple|json] [--skip-trivia] [--range FROM..TO]
//!   asp highlight `<path>`     - Styled spans, one per line
//!   asp folds `<path>`         - Collapsible block bodies
//!   asp check `<path>`         - Verify that blocks are balanced (exit status 1 if not)
//!
//! `tokens` and `folds` accept `--config <file>` to layer a TOML file over the defaults.
//! Set `RUST_LOG=asp=trace` to see indentation decisions as they are made.

use asp::asp::config::{AspConfig, DumpFormat, Loader};
use asp::asp::error::AspError;
use asp::asp::folding::{check_balance, fold_regions};
use asp::asp::highlighting::highlight;
use asp::asp::lexing::{parse_range, tokenize, tokenize_range};
use asp::asp::token::{significant, to_json, to_simple_string, Token};
use clap::{Arg, ArgAction, ArgMatches, Command};

fn main() {
    init_tracing();

    let path_arg = || {
        Arg::new("path")
            .help("Path to the BUILD file")
            .required(true)
            .index(1)
    };
    let config_arg = || {
        Arg::new("config")
            .long("config")
            .short('c')
            .help("TOML file layered over the built-in defaults")
    };

    let matches = Command::new("asp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A lexer for Please BUILD files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream")
                .arg(path_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["simple", "json"]),
                )
                .arg(
                    Arg::new("skip-trivia")
                        .long("skip-trivia")
                        .help("Drop whitespace, newline and comment tokens")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("range")
                        .long("range")
                        .short('r')
                        .help("Lex only the byte range FROM..TO"),
                ),
        )
        .subcommand(
            Command::new("highlight")
                .about("Print styled spans")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("folds")
                .about("Print collapsible block bodies")
                .arg(path_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Check that blocks open and close in pairs")
                .arg(path_arg()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("highlight", sub)) => handle_highlight_command(sub),
        Some(("folds", sub)) => handle_folds_command(sub),
        Some(("check", sub)) => handle_check_command(sub),
        _ => unreachable!("clap requires a subcommand"),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install a stderr subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn config_loader(matches: &ArgMatches) -> Loader {
    let loader = Loader::new();
    match matches.get_one::<String>("config") {
        Some(path) => {
            tracing::debug!(path = %path, "layering config file");
            loader.with_file(path)
        }
        None => loader,
    }
}

fn read_source(matches: &ArgMatches) -> Result<(String, String), AspError> {
    let path = matches
        .get_one::<String>("path")
        .cloned()
        .unwrap_or_default();
    let source = std::fs::read_to_string(&path).map_err(|e| AspError::io(&path, e))?;
    tracing::debug!(path = %path, bytes = source.len(), "read source");
    Ok((path, source))
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<(), AspError> {
    let mut loader = config_loader(matches);
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.dump_format(format)?;
    }
    if matches.get_flag("skip-trivia") {
        loader = loader.skip_trivia()?;
    }
    let config: AspConfig = loader.build()?;
    let (_, source) = read_source(matches)?;

    let mut tokens: Vec<Token> = match matches.get_one::<String>("range") {
        Some(range) => {
            let (from, to) = parse_range(range)?;
            tokenize_range(&source, from, to)
        }
        None => tokenize(&source),
    };
    if config.tokens.skip_trivia {
        tokens = significant(tokens).collect();
    }

    let output = match config.tokens.format {
        DumpFormat::Simple => to_simple_string(&source, &tokens),
        DumpFormat::Json => to_json(&source, &tokens)? + "\n",
    };
    print!("{}", output);
    Ok(())
}

/// Handle the highlight command
fn handle_highlight_command(matches: &ArgMatches) -> Result<(), AspError> {
    let (_, source) = read_source(matches)?;

    for span in highlight(&source) {
        let text = source.get(span.start..span.end).unwrap_or_default();
        println!("{}..{} {} {:?}", span.start, span.end, span.style, text);
    }
    Ok(())
}

/// Handle the folds command
fn handle_folds_command(matches: &ArgMatches) -> Result<(), AspError> {
    let config = config_loader(matches).build()?;
    let (_, source) = read_source(matches)?;

    for region in fold_regions(&tokenize(&source)) {
        let lines = region.line_count(&source);
        if lines < config.folding.min_lines {
            continue;
        }
        println!(
            "{}..{} depth={} lines={}",
            region.start, region.end, region.depth, lines
        );
    }
    Ok(())
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> Result<(), AspError> {
    let (path, source) = read_source(matches)?;

    let depth = check_balance(&tokenize(&source))?;
    println!("{}: ok (max depth {})", path, depth);
    Ok(())
}
