//! CLI tool that prints the token stream of command scripts.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use cmdlang::{ReadError, ReaderSource, Scanner, Source};

const SAMPLE: &str = "
this is a  command
\t,that continues to here

literals 'are in quotes' or these \"quotes\"

this 'is a command' that (some sub command for this param) calls sub commands

someaction
\t,(depends on sub action)
\t,(and this sub action)

# this is an eol comment

#(
\tThis is a block comment?

\t)#

\t#( something )#

";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: ReadError,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Only log when RUST_LOG is set
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .with_target(true)
            .init();
    }
}

fn usage() {
    eprintln!("Usage: cmdlang [--demo] [files...]");
    eprintln!();
    eprintln!("Prints one line per token for each file.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --demo    Scan a built-in sample script");
    eprintln!("  -h, --help  Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG=cmdlang=trace to log scanner decisions.");
}

fn print_tokens(out: &mut impl Write, name: &str, source: impl Source) -> io::Result<()> {
    writeln!(out, ">>> ---------------- {name}")?;
    for token in Scanner::new(source) {
        writeln!(out, "{token}")?;
    }
    writeln!(out, "<<< ---------------- ")
}

fn scan_file(out: &mut impl Write, path: &str) -> Result<(), CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_owned(),
        source,
    })?;
    let mut source = ReaderSource::new(BufReader::new(file));
    print_tokens(out, path, &mut source)?;

    tracing::debug!(path, bytes = source.bytes_read(), "scanned file");
    match source.take_error() {
        Some(source) => Err(CliError::Read {
            path: path.to_owned(),
            source,
        }),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return ExitCode::from(2);
    }

    if let Some(unknown) = args
        .iter()
        .find(|a| a.starts_with("--") && a.as_str() != "--demo")
    {
        eprintln!("Unknown option: {unknown}");
        return ExitCode::from(2);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut had_error = false;

    for arg in &args {
        let result = if arg == "--demo" {
            print_tokens(&mut out, "<demo>", SAMPLE.chars()).map_err(CliError::from)
        } else {
            scan_file(&mut out, arg)
        };

        match result {
            Ok(()) => {}
            Err(e @ CliError::Output(_)) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
