// Command-line interface for notedown
//
// This binary imports markup files into the notedown document tree and prints
// the tree as JSON. The heavy lifting lives in notedown-engine; this crate is
// a thin shell around the dialect registry.
//
// Importing:
//
// The dialect is auto-detected from the file extension and can be overridden
// with an explicit --dialect flag.
// Usage:
//  notedown <input> [--dialect <name>] [--output <file>]   - Import a markup file
//  notedown --list-dialects                                - List available dialects

use clap::{Arg, ArgAction, Command, ValueHint};
use notedown_config::{Loader, NotedownConfig};
use notedown_engine::DialectRegistry;
use std::fs;

fn build_cli() -> Command {
    Command::new("notedown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Import markup files into a notedown document tree")
        .long_about(
            "notedown imports lightweight-markup files and prints the resulting\n\
            attributed document tree as JSON.\n\n\
            Supported dialects:\n  \
            - markdown: Markdown (.md, .markdown)\n  \
            - wiki:     Zim-style wiki pages (.txt, .wiki)\n\n\
            The dialect is auto-detected from the file extension.\n\
            Output goes to stdout by default, or use -o to specify a file.\n\n\
            Examples:\n  \
            notedown notes.md                       # Import markdown (stdout)\n  \
            notedown page.txt --dialect wiki        # Force the wiki dialect\n  \
            notedown notes.md -o notes.json         # Write the tree to a file",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .short('d')
                .help("Dialect to import with (auto-detected from the file extension if not specified)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path (defaults to stdout)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notedown.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Emit compact JSON instead of pretty-printed")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-dialects")
                .long("list-dialects")
                .help("List available dialects")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(String::as_str),
        matches.get_flag("compact"),
    );
    let builder_config = config.builder.engine_config().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });
    let registry = DialectRegistry::with_defaults(&builder_config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    if matches.get_flag("list-dialects") {
        for name in registry.list_dialects() {
            let dialect = registry.get(&name).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
            println!("{name} - {}", dialect.description());
        }
        return;
    }

    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: an input file is required unless --list-dialects is given");
        std::process::exit(1);
    };

    // Auto-detect --dialect if not provided
    let dialect = match matches.get_one::<String>("dialect") {
        Some(d) => d.clone(),
        None => match registry.detect_dialect_from_filename(input) {
            Some(detected) => detected,
            None => {
                eprintln!("Error: Could not detect dialect from filename '{input}'");
                eprintln!("Please specify --dialect explicitly");
                std::process::exit(1);
            }
        },
    };

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, &dialect).unwrap_or_else(|e| {
        eprintln!("Import error: {e}");
        std::process::exit(1);
    });

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    }
    .unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, json).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{json}"),
    }
}

fn load_cli_config(path: Option<&str>, compact: bool) -> NotedownConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if compact {
        loader = loader.set_override("output.pretty", false).unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        });
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    })
}
