// SPDX-License-Identifier: GPL-3.0-only

//! Command-line interface for chat2quote.
//!
//! Reads transcripts from files, directories, stdin, or the clipboard and
//! emits the canonical markdown quote export (or the HTML preview).

use chat2quote::renderer::RenderOptions;
use chat2quote::session::Session;
use chat2quote::{clipboard, config};
use lexopt::prelude::*;
use snafu::{ensure, prelude::*};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where to write the rendered output.
enum OutputTarget {
    /// Write to the specified file.
    File(PathBuf),
    /// Write to stdout.
    Stdout,
}

#[allow(clippy::struct_excessive_bools)]
struct Cli {
    input: Vec<PathBuf>,
    output: OutputTarget,
    html: bool,
    copy: bool,
    paste: bool,
    name: Option<String>,
    save_name: bool,
    show_timestamps: bool,
    quiet: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("at least one input file, directory, - for stdin, or --paste is required"))]
    NoInput,

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to read stdin: {source}"))]
    ReadStdin { source: std::io::Error },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to save display name: {source}"))]
    SaveName { source: config::ConfigError },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert chat assistant transcripts to shareable Markdown quotes

Usage: {name} [OPTIONS] <INPUT>...

Arguments:
  <INPUT>...  Transcript files (.json, .md, .txt), directories, or - for stdin

Options:
  -o, --output <FILE>       Output file (default: stdout)
      --html                Emit the HTML preview instead of markdown
      --copy                Also copy the markdown export to the clipboard
      --paste               Read a transcript from the clipboard
      --name <NAME>         Display name for the human sender
      --save-name           Persist --name as the default for future runs
      --show-timestamps     Include timestamps in the HTML preview
      --hide-timestamps     Hide timestamps (default)
  -q, --quiet               Suppress progress messages
  -h, --help                Print help
  -V, --version             Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut input = Vec::new();
    let mut output = OutputTarget::Stdout;
    let mut html = false;
    let mut copy = false;
    let mut paste = false;
    let mut name = None;
    let mut save_name = false;
    let mut show_timestamps = false;
    let mut quiet = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => {
                let val: PathBuf = parser.value()?.parse()?;
                output = if val == Path::new("-") {
                    OutputTarget::Stdout
                } else {
                    OutputTarget::File(val)
                };
            }
            Long("html") => html = true,
            Long("copy") => copy = true,
            Long("paste") => paste = true,
            Long("name") => name = Some(parser.value()?.string()?),
            Long("save-name") => save_name = true,
            Long("show-timestamps") => show_timestamps = true,
            Long("hide-timestamps") => show_timestamps = false,
            Short('q') | Long("quiet") => quiet = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) => input.push(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input,
        output,
        html,
        copy,
        paste,
        name,
        save_name,
        show_timestamps,
        quiet,
    })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    ensure!(!cli.input.is_empty() || cli.paste, NoInputSnafu);

    if cli.save_name
        && let Some(name) = &cli.name
    {
        config::save_display_name(name).context(SaveNameSnafu)?;
        if !cli.quiet {
            eprintln!("Saved display name {name:?}");
        }
    }

    let display_name = cli.name.clone().or_else(config::load_display_name);
    let mut session = Session::new(RenderOptions {
        display_name,
        show_timestamps: cli.show_timestamps,
    });

    let sources = collect_sources(&cli)?;

    // The markdown export is built regardless of the selected output format:
    // the clipboard always receives canonical markdown.
    let mut markdown = Vec::new();
    let mut html = Vec::new();
    for (label, text) in &sources {
        if !session.load(text) {
            eprintln!("{label}: could not parse transcript (no recognizable conversation format)");
            continue;
        }
        if !cli.quiet {
            eprintln!("Parsed {label} ({} messages)", session.messages().len());
        }
        markdown.push(session.export_markdown());
        if cli.html {
            html.push(session.render_html());
        }
    }

    let output = if cli.html {
        html.join("\n")
    } else {
        markdown.join("\n\n---\n\n")
    };

    match &cli.output {
        OutputTarget::Stdout => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        OutputTarget::File(path) => {
            std::fs::write(path, &output).context(WriteFileSnafu { path })?;
            if !cli.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
    }

    if cli.copy {
        match clipboard::write_text(&markdown.join("\n\n---\n\n")) {
            Ok(()) => {
                if !cli.quiet {
                    eprintln!("Copied markdown to clipboard");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}

/// Gathers input texts from the clipboard, stdin, files, and directories.
fn collect_sources(cli: &Cli) -> Result<Vec<(String, String)>, Error> {
    let mut sources = Vec::new();

    if cli.paste {
        // Clipboard failure is a status, not a fatal error; file inputs are
        // still processed.
        match clipboard::read_text() {
            Ok(text) => sources.push(("clipboard".to_owned(), text)),
            Err(e) => eprintln!("{e}"),
        }
    }

    for input in &cli.input {
        if input == Path::new("-") {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context(ReadStdinSnafu)?;
            sources.push(("stdin".to_owned(), text));
        } else if input.is_dir() {
            for entry in WalkDir::new(input)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file() && has_transcript_extension(e.path()))
            {
                let path = entry.path();
                let text = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
                sources.push((path.display().to_string(), text));
            }
        } else {
            let text = std::fs::read_to_string(input).context(ReadFileSnafu { path: input })?;
            sources.push((input.display().to_string(), text));
        }
    }

    Ok(sources)
}

fn has_transcript_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "json" || ext == "md" || ext == "txt")
}
