//! Command-line interface for rpglex
//! This binary lexes an RPG/RPGLE source file and prints the resulting token
//! stream, either as readable lines or as JSON for downstream tooling.
//!
//! Usage:
//!   rpglex tokens `<path>` [--free] [--json]   - Lex a file and print its tokens

use clap::{Arg, ArgAction, Command};

use rpglex::{lex_source, LexError, Lexer, LexerMode};

fn main() {
    let matches = Command::new("rpglex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A column-sensitive lexer for RPG/RPGLE source")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Lex a source file and print its token stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file to lex")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("free")
                        .long("free")
                        .help("Treat the file as whole-source free-form")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print tokens and diagnostics as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let free = tokens_matches.get_flag("free");
            let json = tokens_matches.get_flag("json");
            if let Err(e) = handle_tokens_command(path, free, json) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        _ => unreachable!(),
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, free: bool, json: bool) -> Result<(), LexError> {
    let source = std::fs::read_to_string(path).map_err(|e| LexError::Io(e.to_string()))?;

    let output = if free {
        Lexer::new(Some(LexerMode::FreeForm)).lex(&source)
    } else {
        lex_source(&source)
    };

    if json {
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|e| LexError::Serialize(e.to_string()))?;
        println!("{}", rendered);
    } else {
        for token in &output.tokens {
            println!("{}", token);
        }
        for diagnostic in &output.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    Ok(())
}
