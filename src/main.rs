//! brushwork - tokenize code snippets from the command line

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{info, warn, Level};

use brushwork::config::Config;
use brushwork::error::Result;
use brushwork::syntax::{strip_tag_prefix, Registry, Token, Tokenizer};

fn main() {
    let matches = command().get_matches();
    init_tracing(matches.get_count("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn command() -> Command {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    Command::new("brushwork")
        .version(VERSION)
        .propagate_version(true)
        .about("Tokenize source code snippets with highlighting brushes.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Configuration file with remaps and extra brushes [default: ~/.brushwork.toml]"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more detail to stderr; repeat for trace output."),
        )
        .subcommand(
            Command::new("highlight")
                .about("Print the token stream of a snippet")
                .arg(
                    Arg::new("lang")
                        .short('l')
                        .long("lang")
                        .required(true)
                        .help("Language tag, bare or as `brush: <tag>` / `language-<tag>`."),
                )
                .arg(
                    Arg::new("filename")
                        .help("The file containing the snippet; standard input when absent."),
                ),
        )
        .subcommand(Command::new("list").about("List available brushes and their aliases"))
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let config = Config::load(config_path)?;

    let mut registry = Registry::with_builtins()?;
    config.apply(&mut registry)?;

    match matches.subcommand() {
        Some(("highlight", submatches)) => {
            let tag = submatches
                .get_one::<String>("lang")
                .map(|lang| strip_tag_prefix(lang))
                .unwrap_or_default();
            let text = match submatches.get_one::<String>("filename") {
                Some(filename) => {
                    info!("Reading snippet from {:?}", filename);
                    fs::read_to_string(filename)?
                }
                None => io::read_to_string(io::stdin())?,
            };
            for token in highlight(&registry, &text, tag) {
                print_token(&token, &text);
            }
        }
        Some(("list", _)) => {
            for brush in registry.brushes() {
                println!("{}\t{}", brush.id(), brush.aliases().join(", "));
            }
        }
        _ => {
            println!("usage: brushwork [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }

    Ok(())
}

/// Tokenize, falling back to plain text for unknown languages
fn highlight(registry: &Registry, text: &str, tag: &str) -> Vec<Token> {
    match Tokenizer::new(registry).highlight(text, tag) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!("{}, printing plain text", e);
            match text.len() {
                0 => Vec::new(),
                len => vec![Token::plain(0, len)],
            }
        }
    }
}

fn print_token(token: &Token, text: &str) {
    let style = token.style.map_or("plain", |s| s.name());
    println!("{}..{}\t{}\t{:?}", token.start, token.end, style, token.text(text));
}
